use dotenvy::dotenv;
use serde::Deserialize;
use std::time::Duration;

use crate::error::Result;

/// Configuration for the dashboard
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Pool cap; one connection is shared by every caller unless raised
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long to wait for a connection before giving up
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are picked up first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(pairs)?)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config =
            Config::from_pairs(pairs(&[("DATABASE_URL", "postgres://localhost/dashboard")]))
                .unwrap();

        assert_eq!(config.database_url(), "postgres://localhost/dashboard");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_pairs(pairs(&[
            ("DATABASE_URL", "postgres://db/dashboard"),
            ("MAX_CONNECTIONS", "4"),
            ("ACQUIRE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout_secs, 2);
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = Config::from_pairs(Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
