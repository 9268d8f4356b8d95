use std::{env, net::SocketAddr, time::Duration};
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://crime-graph-backend.vercel.app/crime-trend";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub api_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        let api_url = lookup("CRIME_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = parse_or(
            "CRIME_API_TIMEOUT_SECS",
            lookup("CRIME_API_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        );

        Self {
            port,
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}");
            default
        }),
    }
}
