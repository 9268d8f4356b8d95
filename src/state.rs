use crate::client::CrimeClient;
use crate::config::Config;
use crate::errors::AppError;

#[derive(Clone)]
pub struct AppState {
    pub client: CrimeClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: CrimeClient::new(config)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_client_uses_configured_endpoint() {
        let config = Config::from_lookup(|key| {
            (key == "CRIME_API_URL").then(|| "http://127.0.0.1:9/crime-trend".to_string())
        });
        let state = AppState::new(&config).unwrap();
        assert_eq!(state.client.endpoint(), "http://127.0.0.1:9/crime-trend");
    }
}
