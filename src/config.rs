use crate::errors::{AnalyzerError, Result};
use dotenv::dotenv;
use std::env;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Transaction history API configuration
    pub api_url: String,
    pub network: String,
    pub account: String,
    pub api_key: String,

    // Verbose progress logging
    pub debug: bool,
}

impl Config {
    // Runs before the logger is up (the filter depends on `debug`), so any
    // diagnostics here go through the returned error, not the log.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = Config {
            api_url: required_var("API_URL")?,
            network: required_var("NETWORK")?,
            account: required_var("ACCOUNT")?,
            api_key: required_var("API_KEY")?,
            debug: required_var("DEBUG")? == "true",
        };

        Url::parse(&config.api_url)
            .map_err(|e| AnalyzerError::Config(format!("Invalid API_URL '{}': {}", config.api_url, e)))?;

        Ok(config)
    }
}

fn required_var(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AnalyzerError::Config(format!(
            "Environment variable {} is not set",
            key
        ))),
    }
}
