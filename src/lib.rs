pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;
pub use config::{EnvConfig, TomlConfig};

pub use adapters::{GoogleGeocoder, MaxMindDatabase};
pub use crate::core::{is_geo_match, is_valid_geo, is_valid_geo_target, GeoLocator};
pub use domain::model::{latest_geo, GeoRecord, GeoSignal, GeoSource};
pub use utils::error::{GeoError, Result};
