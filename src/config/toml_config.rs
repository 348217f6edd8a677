use crate::adapters::DEFAULT_GEOCODER_ENDPOINT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GeoError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    pub ip_database: Option<IpDatabaseConfig>,
    pub batch: Option<BatchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_GEOCODER_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpDatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub concurrent_requests: Option<usize>,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GeoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` placeholders with environment values; unset
    /// variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn geocoder_endpoint(&self) -> &str {
        &self.geocoder.endpoint
    }

    fn geocoder_api_key(&self) -> Option<&str> {
        self.geocoder
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty() && !ENV_VAR.is_match(k))
    }

    fn ip_database_path(&self) -> Option<&str> {
        self.ip_database.as_ref().map(|db| db.path.as_str())
    }

    fn concurrent_requests(&self) -> usize {
        self.batch
            .as_ref()
            .and_then(|b| b.concurrent_requests)
            .unwrap_or(5)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("geocoder.endpoint", &self.geocoder.endpoint)?;

        if let Some(db) = &self.ip_database {
            crate::utils::validation::validate_path("ip_database.path", &db.path)?;
        }

        crate::utils::validation::validate_range(
            "batch.concurrent_requests",
            self.concurrent_requests(),
            1,
            100,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[geocoder]
endpoint = "https://geo.example.com/json"
api_key = "abc123"

[ip_database]
path = "/var/lib/geoip/GeoLite2-City.mmdb"

[batch]
concurrent_requests = 8
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.geocoder_endpoint(), "https://geo.example.com/json");
        assert_eq!(config.geocoder_api_key(), Some("abc123"));
        assert_eq!(
            config.ip_database_path(),
            Some("/var/lib/geoip/GeoLite2-City.mmdb")
        );
        assert_eq!(config.concurrent_requests(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.geocoder_endpoint(), DEFAULT_GEOCODER_ENDPOINT);
        assert_eq!(config.geocoder_api_key(), None);
        assert_eq!(config.ip_database_path(), None);
        assert_eq!(config.concurrent_requests(), 5);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GEO_TARGETING_TEST_KEY", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[geocoder]
api_key = "${GEO_TARGETING_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.geocoder_api_key(), Some("from-env"));

        std::env::remove_var("GEO_TARGETING_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_means_no_key() {
        let config = TomlConfig::from_toml_str(
            r#"
[geocoder]
api_key = "${GEO_TARGETING_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(config.geocoder_api_key(), None);
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = TomlConfig::from_toml_str(
            r#"
[geocoder]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_concurrency = TomlConfig::from_toml_str(
            r#"
[batch]
concurrent_requests = 0
"#,
        )
        .unwrap();
        assert!(bad_concurrency.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[ip_database]\npath = \"GeoLite2-City.mmdb\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.ip_database_path(), Some("GeoLite2-City.mmdb"));
    }
}
