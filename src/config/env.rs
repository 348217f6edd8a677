use crate::adapters::DEFAULT_GEOCODER_ENDPOINT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use std::env;

/// Configuration read from environment variables, used when no TOML file is given.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub geocoder_endpoint: String,
    pub geocoder_api_key: Option<String>,
    pub ip_database_path: Option<String>,
    pub concurrent_requests: usize,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            geocoder_endpoint: env::var("GEOCODER_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_ENDPOINT.to_string()),
            geocoder_api_key: env::var("GEOCODER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            ip_database_path: env::var("GEOIP_DB_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            concurrent_requests: match env::var("CONCURRENT_REQUESTS") {
                Ok(raw) => raw.parse().map_err(|_| GeoError::InvalidConfigValueError {
                    field: "CONCURRENT_REQUESTS".to_string(),
                    value: raw.clone(),
                    reason: "must be a positive integer".to_string(),
                })?,
                Err(_) => 5,
            },
        })
    }
}

impl ConfigProvider for EnvConfig {
    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder_endpoint
    }

    fn geocoder_api_key(&self) -> Option<&str> {
        self.geocoder_api_key.as_deref()
    }

    fn ip_database_path(&self) -> Option<&str> {
        self.ip_database_path.as_deref()
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validate_url("GEOCODER_ENDPOINT", &self.geocoder_endpoint)?;
        if let Some(path) = &self.ip_database_path {
            validate_path("GEOIP_DB_PATH", path)?;
        }
        validate_range("CONCURRENT_REQUESTS", self.concurrent_requests, 1, 100)?;
        Ok(())
    }
}
