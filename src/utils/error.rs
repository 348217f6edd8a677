use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Geocoder request failed: {0}")]
    GeocoderError(#[from] reqwest::Error),

    #[error("Geocoder returned HTTP {status}")]
    GeocoderStatus { status: u16 },

    #[error("IP database error: {0}")]
    DatabaseError(#[from] maxminddb::MaxMindDbError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid geo target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },
}

impl GeoError {
    /// Short message suitable for printing to a terminal user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoError::GeocoderError(_) | GeoError::GeocoderStatus { .. } => {
                "The geocoding service could not be reached".to_string()
            }
            GeoError::DatabaseError(_) => "The IP location database could not be read".to_string(),
            GeoError::IoError(e) => format!("File access failed: {}", e),
            GeoError::SerializationError(e) => format!("Invalid JSON input: {}", e),
            GeoError::ConfigError { .. }
            | GeoError::ConfigValidationError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            GeoError::InvalidTarget { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GeoError::GeocoderError(_) | GeoError::GeocoderStatus { .. } => {
                "Check the geocoder endpoint and API key"
            }
            GeoError::DatabaseError(_) => "Check that the .mmdb file is a GeoIP2/GeoLite2 City database",
            GeoError::IoError(_) => "Check that the file exists and is readable",
            GeoError::SerializationError(_) => "Check the input file is valid JSON",
            GeoError::ConfigError { .. }
            | GeoError::ConfigValidationError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. } => "Fix the configuration file or environment variables",
            GeoError::InvalidTarget { .. } => {
                "Use ISO country codes; state targeting is only allowed for US and CA"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
