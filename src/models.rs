use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrimeType {
    #[default]
    Homicide,
    Assault,
    Robbery,
    Battery,
    Arson,
    Theft,
}

impl CrimeType {
    pub const ALL: [CrimeType; 6] = [
        CrimeType::Homicide,
        CrimeType::Assault,
        CrimeType::Robbery,
        CrimeType::Battery,
        CrimeType::Arson,
        CrimeType::Theft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CrimeType::Homicide => "Homicide",
            CrimeType::Assault => "Assault",
            CrimeType::Robbery => "Robbery",
            CrimeType::Battery => "Battery",
            CrimeType::Arson => "Arson",
            CrimeType::Theft => "Theft",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| AppError::bad_request(format!("unknown crime type '{raw}'")))
    }
}

/// Number of years shown on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow(u8);

impl YearWindow {
    pub const CHOICES: [u8; 6] = [4, 8, 10, 12, 16, 20];

    pub fn new(years: u8) -> Result<Self, AppError> {
        if Self::CHOICES.contains(&years) {
            Ok(Self(years))
        } else {
            Err(AppError::bad_request(format!(
                "yearsToDisplay must be one of 4, 8, 10, 12, 16 or 20, got {years}"
            )))
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let years = raw
            .parse::<u8>()
            .map_err(|_| AppError::bad_request(format!("yearsToDisplay must be a number, got '{raw}'")))?;
        Self::new(years)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for YearWindow {
    fn default() -> Self {
        Self(12)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationArea {
    North,
    South,
    West,
    Loop,
    #[default]
    All,
    /// Postal code, passed through to the data service as-is.
    Zip(String),
}

impl LocationArea {
    pub const NAMED: [LocationArea; 5] = [
        LocationArea::North,
        LocationArea::South,
        LocationArea::West,
        LocationArea::Loop,
        LocationArea::All,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => LocationArea::All,
            "north" => LocationArea::North,
            "south" => LocationArea::South,
            "west" => LocationArea::West,
            "loop" => LocationArea::Loop,
            zip => LocationArea::Zip(zip.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LocationArea::North => "north",
            LocationArea::South => "south",
            LocationArea::West => "west",
            LocationArea::Loop => "loop",
            LocationArea::All => "all",
            LocationArea::Zip(zip) => zip,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LocationArea::North => "North",
            LocationArea::South => "South",
            LocationArea::West => "West",
            LocationArea::Loop => "Loop",
            LocationArea::All => "All",
            LocationArea::Zip(zip) => zip,
        }
    }

    /// Phrase completing "How many crimes happened in the past N years ...?".
    pub fn describe(&self) -> String {
        match self {
            LocationArea::North => "on the north side".to_string(),
            LocationArea::South => "on the south side".to_string(),
            LocationArea::West => "on the west side".to_string(),
            LocationArea::Loop => "in the Loop".to_string(),
            LocationArea::All => "in all of Chicago".to_string(),
            LocationArea::Zip(zip) => format!("in the zipcode {zip}"),
        }
    }
}

/// Raw query string as sent by the dashboard form or an API caller.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub crime_type: Option<String>,
    pub years_to_display: Option<String>,
    pub location_area: Option<String>,
    /// Free-form postal code from the page form; wins over `locationArea`.
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrendFilters {
    pub crime_type: CrimeType,
    pub years: YearWindow,
    pub location: LocationArea,
}

impl TrendFilters {
    pub fn from_params(params: &FilterParams) -> Result<Self, AppError> {
        let crime_type = match params.crime_type.as_deref() {
            Some(raw) if !raw.trim().is_empty() => CrimeType::parse(raw)?,
            _ => CrimeType::default(),
        };
        let years = match params.years_to_display.as_deref() {
            Some(raw) if !raw.trim().is_empty() => YearWindow::parse(raw)?,
            _ => YearWindow::default(),
        };
        let location = match params.zipcode.as_deref().map(str::trim) {
            Some(zip) if !zip.is_empty() => LocationArea::Zip(zip.to_string()),
            _ => params
                .location_area
                .as_deref()
                .map(LocationArea::parse)
                .unwrap_or_default(),
        };

        Ok(Self {
            crime_type,
            years,
            location,
        })
    }

    /// One extra year seeds the change figure of the first displayed year.
    pub fn upstream_years(&self) -> u16 {
        u16::from(self.years.get()) + 1
    }

    pub fn headline(&self) -> String {
        format!(
            "How many '{}' crimes happened in the past {} years {}?",
            self.crime_type.as_str(),
            self.years.get(),
            self.location.describe()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeRecord {
    pub year: i32,
    pub crimes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub year: i32,
    pub crimes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_change: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub crime_type: CrimeType,
    pub years_to_display: u8,
    pub location_area: String,
    pub description: String,
    pub fetched_at: DateTime<Utc>,
    pub data: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub crime_types: Vec<OptionEntry>,
    pub years_to_display: Vec<u8>,
    pub location_areas: Vec<OptionEntry>,
    pub accepts_zipcode: bool,
}

impl FilterOptions {
    pub fn current() -> Self {
        Self {
            crime_types: CrimeType::ALL
                .into_iter()
                .map(|kind| OptionEntry {
                    value: kind.as_str().to_string(),
                    label: kind.as_str().to_string(),
                })
                .collect(),
            years_to_display: YearWindow::CHOICES.to_vec(),
            location_areas: LocationArea::NAMED
                .iter()
                .map(|area| OptionEntry {
                    value: area.as_str().to_string(),
                    label: area.label().to_string(),
                })
                .collect(),
            accepts_zipcode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(crime: Option<&str>, years: Option<&str>, area: Option<&str>) -> FilterParams {
        FilterParams {
            crime_type: crime.map(str::to_string),
            years_to_display: years.map(str::to_string),
            location_area: area.map(str::to_string),
            zipcode: None,
        }
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let filters = TrendFilters::from_params(&FilterParams::default()).unwrap();
        assert_eq!(filters.crime_type, CrimeType::Homicide);
        assert_eq!(filters.years.get(), 12);
        assert_eq!(filters.location, LocationArea::All);
        assert_eq!(filters.upstream_years(), 13);
    }

    #[test]
    fn unknown_crime_type_is_rejected() {
        let err = TrendFilters::from_params(&params(Some("Jaywalking"), None, None)).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(err.message.contains("Jaywalking"));
    }

    #[test]
    fn window_outside_choices_is_rejected() {
        assert!(TrendFilters::from_params(&params(None, Some("5"), None)).is_err());
        assert!(TrendFilters::from_params(&params(None, Some("ten"), None)).is_err());
        let filters = TrendFilters::from_params(&params(None, Some(" 20 "), None)).unwrap();
        assert_eq!(filters.upstream_years(), 21);
    }

    #[test]
    fn unrecognised_area_is_a_zipcode() {
        assert_eq!(LocationArea::parse("loop"), LocationArea::Loop);
        assert_eq!(LocationArea::parse(""), LocationArea::All);
        let zip = LocationArea::parse(" 60614 ");
        assert_eq!(zip, LocationArea::Zip("60614".to_string()));
        assert_eq!(zip.as_str(), "60614");
        assert_eq!(zip.describe(), "in the zipcode 60614");
    }

    #[test]
    fn zipcode_field_overrides_area_select() {
        let mut raw = params(None, None, Some("north"));
        raw.zipcode = Some("60608".to_string());
        let filters = TrendFilters::from_params(&raw).unwrap();
        assert_eq!(filters.location, LocationArea::Zip("60608".to_string()));

        raw.zipcode = Some("  ".to_string());
        let filters = TrendFilters::from_params(&raw).unwrap();
        assert_eq!(filters.location, LocationArea::North);
    }

    #[test]
    fn headline_reads_like_a_question() {
        let filters =
            TrendFilters::from_params(&params(Some("Theft"), Some("8"), Some("loop"))).unwrap();
        assert_eq!(
            filters.headline(),
            "How many 'Theft' crimes happened in the past 8 years in the Loop?"
        );
    }

    #[test]
    fn trend_point_omits_missing_change() {
        let first = TrendPoint {
            year: 2020,
            crimes: 10,
            percentage_change: None,
        };
        let json = serde_json::to_value(&first).unwrap();
        assert!(json.get("percentageChange").is_none());

        let second = TrendPoint {
            percentage_change: Some(-12.5),
            ..first
        };
        let json = serde_json::to_value(&second).unwrap();
        assert_eq!(json["percentageChange"], -12.5);
    }

    #[test]
    fn options_list_every_choice() {
        let options = FilterOptions::current();
        assert_eq!(options.crime_types.len(), 6);
        assert_eq!(options.years_to_display, vec![4, 8, 10, 12, 16, 20]);
        assert_eq!(options.location_areas.len(), 5);
        assert_eq!(options.location_areas[3].value, "loop");
    }
}
