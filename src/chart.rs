use crate::models::TrendPoint;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 500.0;
const PAD_LEFT: f64 = 72.0;
const PAD_RIGHT: f64 = 24.0;
const PAD_TOP: f64 = 36.0;
const PAD_BOTTOM: f64 = 44.0;
const TICK_INTERVALS: u64 = 4;

pub const INCREASE_COLOR: &str = "#F44336";
pub const DECREASE_COLOR: &str = "#4CAF50";
const BAR_COLOR: &str = "#8884d8";

/// Renders one bar per year. Each bar carries a tooltip with the raw count and
/// the signed change, and the change is also printed above the bar.
pub fn render_bar_chart(points: &[TrendPoint]) -> String {
    if points.is_empty() {
        return format!(
            r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Crime trend chart"><text class="chart-empty" x="50%" y="50%" text-anchor="middle">No data</text></svg>"#
        );
    }

    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let baseline = PAD_TOP + plot_h;

    let max = points.iter().map(|p| p.crimes).max().unwrap_or(0);
    let (step, top) = axis_scale(max);
    let y = |value: u64| baseline - value as f64 / top as f64 * plot_h;

    let mut svg = format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Crime trend chart">"#
    );

    let mut tick = 0;
    while tick <= top {
        let ty = y(tick);
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{PAD_LEFT}" y1="{ty:.2}" x2="{:.2}" y2="{ty:.2}" stroke-dasharray="3 3" />"#,
            WIDTH - PAD_RIGHT
        ));
        svg.push_str(&format!(
            r#"<text class="chart-axis-label" x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            PAD_LEFT - 8.0,
            ty + 4.0,
            format_count(tick)
        ));
        match tick.checked_add(step) {
            Some(next) => tick = next,
            None => break,
        }
    }

    let band = plot_w / points.len() as f64;
    let bar_w = band * 0.8;
    let crowded = points.len() > 13;
    let change_font = if crowded { 9 } else { 11 };

    for (index, point) in points.iter().enumerate() {
        let x = PAD_LEFT + index as f64 * band + (band - bar_w) / 2.0;
        let bar_top = y(point.crimes);
        let height = baseline - bar_top;
        let center = x + bar_w / 2.0;

        svg.push_str(r#"<g class="bar">"#);
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{bar_top:.2}" width="{bar_w:.2}" height="{height:.2}" fill="{BAR_COLOR}" />"#
        ));
        svg.push_str(&format!("<title>{}</title>", tooltip_text(point)));
        if let Some(change) = point.percentage_change {
            svg.push_str(&format!(
                r#"<text class="chart-change" x="{center:.2}" y="{:.2}" text-anchor="middle" font-size="{change_font}" fill="{}">{}</text>"#,
                bar_top - 6.0,
                change_color(change),
                format_change(change)
            ));
        }
        svg.push_str(&format!(
            r#"<text class="chart-axis-label" x="{center:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            baseline + 20.0,
            point.year
        ));
        svg.push_str("</g>");
    }

    svg.push_str(&format!(
        r#"<line class="chart-axis" x1="{PAD_LEFT}" y1="{baseline}" x2="{:.2}" y2="{baseline}" />"#,
        WIDTH - PAD_RIGHT
    ));
    svg.push_str("</svg>");
    svg
}

fn tooltip_text(point: &TrendPoint) -> String {
    let mut text = format!("{}\n{} crimes", point.year, format_count(point.crimes));
    if let Some(change) = point.percentage_change {
        text.push('\n');
        text.push_str(&format_change(change));
    }
    text
}

/// Grid step and axis maximum for a zero-based axis with about four intervals.
fn axis_scale(max: u64) -> (u64, u64) {
    if max == 0 {
        return (1, TICK_INTERVALS);
    }
    let raw = max as f64 / TICK_INTERVALS as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = ((nice * magnitude).round() as u64).max(1);
    (step, max.div_ceil(step).saturating_mul(step))
}

pub fn change_color(change: f64) -> &'static str {
    if change >= 0.0 {
        INCREASE_COLOR
    } else {
        DECREASE_COLOR
    }
}

/// `+ 12.5%` or `- 3.25%`.
pub fn format_change(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "-" };
    format!("{sign} {}%", change.abs())
}

/// Thousands separators, e.g. `12,345`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, crimes: u64, change: Option<f64>) -> TrendPoint {
        TrendPoint {
            year,
            crimes,
            percentage_change: change,
        }
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn changes_are_signed() {
        assert_eq!(format_change(12.5), "+ 12.5%");
        assert_eq!(format_change(-3.25), "- 3.25%");
        assert_eq!(format_change(0.0), "+ 0%");
        assert_eq!(change_color(0.0), INCREASE_COLOR);
        assert_eq!(change_color(-0.01), DECREASE_COLOR);
    }

    #[test]
    fn axis_scale_rounds_up_to_nice_steps() {
        assert_eq!(axis_scale(0), (1, 4));
        assert_eq!(axis_scale(3), (1, 3));
        assert_eq!(axis_scale(7), (2, 8));
        assert_eq!(axis_scale(150), (50, 150));
        assert_eq!(axis_scale(812), (500, 1000));
    }

    #[test]
    fn huge_counts_saturate_the_axis() {
        let (step, top) = axis_scale(u64::MAX);
        assert!(step > u64::MAX / 4 && step < u64::MAX / 3);
        assert_eq!(top, u64::MAX);

        let svg = render_bar_chart(&[point(2020, u64::MAX, None), point(2021, 1, Some(-100.0))]);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert_eq!(svg.matches(r#"class="chart-grid""#).count(), 4);
    }

    #[test]
    fn empty_chart_shows_placeholder() {
        let svg = render_bar_chart(&[]);
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn chart_draws_a_bar_per_year_with_tooltips() {
        let svg = render_bar_chart(&[
            point(2021, 1200, None),
            point(2022, 1500, Some(25.0)),
            point(2023, 1350, Some(-10.0)),
        ]);
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("<title>2021\n1,200 crimes</title>"));
        assert!(svg.contains("<title>2022\n1,500 crimes\n+ 25%</title>"));
        assert!(svg.contains(&format!(r#"fill="{DECREASE_COLOR}">- 10%</text>"#)));
        assert!(svg.contains(">2023</text>"));
    }
}
