use crate::models::{CrimeRecord, TrendPoint};

/// Orders records by year and annotates each one with its change from the
/// previous year. The earliest year has nothing to compare against.
pub fn build_trend(mut records: Vec<CrimeRecord>) -> Vec<TrendPoint> {
    records.sort_by_key(|record| record.year);

    let mut points = Vec::with_capacity(records.len());
    let mut previous: Option<u64> = None;
    for record in records {
        points.push(TrendPoint {
            year: record.year,
            crimes: record.crimes,
            percentage_change: previous.and_then(|prev| percentage_change(prev, record.crimes)),
        });
        previous = Some(record.crimes);
    }
    points
}

/// `None` when the previous count is zero.
pub fn percentage_change(previous: u64, current: u64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
    Some(round_to_cents(change))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
