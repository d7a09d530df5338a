use std::time::Duration;

use crate::Credentials;

const DEFAULT_BASE_URL: &str = "https://bittrex.com";

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Exchange credentials
    pub credentials: Credentials,

    // Exchange endpoint
    pub base_url: String,
    pub request_timeout: Duration,

    // Indicator config file path
    pub indicator_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let timeout_secs = optional_env("BITTREX_TIMEOUT_SECS")
            .map(|v| {
                v.trim().parse::<u64>().unwrap_or_else(|_| {
                    panic!("BITTREX_TIMEOUT_SECS must be a whole number of seconds, got: '{v}'")
                })
            })
            .unwrap_or(10);
        if timeout_secs == 0 {
            panic!("BITTREX_TIMEOUT_SECS must be greater than zero");
        }

        Config {
            credentials: Credentials::new(
                required_env("BITTREX_API_KEY"),
                required_env("BITTREX_API_SECRET"),
            ),
            base_url: optional_env("BITTREX_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            indicator_config_path: optional_env("INDICATOR_CONFIG_PATH")
                .unwrap_or_else(|| "config/indicators.toml".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
