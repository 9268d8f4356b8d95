use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CrimeRecord, TrendFilters};
use reqwest::Client;
use tracing::{info, warn};

/// Talks to the remote crime-trend aggregation endpoint.
#[derive(Clone)]
pub struct CrimeClient {
    http: Client,
    endpoint: String,
}

impl CrimeClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.api_timeout)
            .build()
            .map_err(AppError::internal)?;
        Ok(Self {
            http,
            endpoint: config.api_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self, filters: &TrendFilters) -> Result<Vec<CrimeRecord>, AppError> {
        let years = filters.upstream_years().to_string();
        let query = [
            ("crimeType", filters.crime_type.as_str()),
            ("yearsToDisplay", years.as_str()),
            ("locationArea", filters.location.as_str()),
        ];

        let response = self
            .http
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                warn!("crime data request failed: {err}");
                AppError::from(err)
            })?;

        let records: Vec<CrimeRecord> = response.json().await.map_err(|err| {
            warn!("crime data response could not be decoded: {err}");
            AppError::from(err)
        })?;

        info!(
            crime_type = filters.crime_type.as_str(),
            years = %years,
            location = filters.location.as_str(),
            records = records.len(),
            "fetched crime trend"
        );
        Ok(records)
    }
}
