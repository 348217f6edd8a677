use anyhow::Context;
use clap::Parser;
use geo_targeting::app::{run_batch, Profile};
use geo_targeting::config::{Cli, Command};
use geo_targeting::core::{is_geo_match, matching_targets, validate_geo_targets};
use geo_targeting::domain::ports::{ConfigProvider, IpDatabase};
use geo_targeting::utils::logger;
use geo_targeting::utils::validation::{validate_required_field, Validate};
use geo_targeting::{EnvConfig, GeoError, GeoLocator, GeoRecord, GoogleGeocoder, MaxMindDatabase, TomlConfig};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<GeoError>() {
                Some(geo_err) => {
                    tracing::error!("❌ {}", geo_err);
                    eprintln!("❌ {}", geo_err.user_friendly_message());
                    eprintln!("💡 {}", geo_err.recovery_suggestion());
                }
                None => eprintln!("❌ {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Box<dyn ConfigProvider>> {
    let config: Box<dyn ConfigProvider> = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Box::new(config)
        }
        None => {
            let config = EnvConfig::from_env()?;
            config.validate()?;
            Box::new(config)
        }
    };
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(GeoError::IoError)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .map_err(GeoError::SerializationError)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}

fn open_database(path: Option<&str>) -> anyhow::Result<Option<Arc<dyn IpDatabase>>> {
    match path {
        Some(path) => {
            let db: Arc<dyn IpDatabase> = Arc::new(MaxMindDatabase::open(path)?);
            Ok(Some(db))
        }
        None => Ok(None),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let geocoder = GoogleGeocoder::new(
        config.geocoder_endpoint(),
        config.geocoder_api_key().map(str::to_string),
    );

    match cli.command {
        Command::Coords { lat, lng, ts } => {
            let locator = GeoLocator::new(geocoder);
            let ts = ts.unwrap_or_else(|| chrono::Utc::now().timestamp());
            let record = locator.from_coordinates(lat, lng, ts).await;
            print_json(&record)?;
        }

        Command::Ip { address, db } => {
            let db_path = db
                .as_deref()
                .and_then(|p| p.to_str())
                .or(config.ip_database_path());
            let db_path = *validate_required_field("ip_database.path", &db_path)?;
            let locator =
                GeoLocator::new(geocoder).with_ip_database(Arc::new(MaxMindDatabase::open(db_path)?));
            print_json(&locator.from_ip(&address))?;
        }

        Command::Match {
            targets,
            candidate,
            candidate_file,
        } => {
            let targets: Vec<GeoRecord> = read_json(&targets)?;
            let candidate: Option<GeoRecord> = match (candidate, candidate_file) {
                (Some(inline), _) => serde_json::from_str(&inline).map_err(GeoError::SerializationError)?,
                (None, Some(path)) => read_json(&path)?,
                (None, None) => None,
            };

            let matched = is_geo_match(&targets, candidate.as_ref());
            if let Some(candidate) = &candidate {
                for hit in matching_targets(&targets, candidate) {
                    tracing::debug!("Matched target {}", hit);
                }
            }
            println!("{}", matched);
        }

        Command::Targets { file } => {
            let targets: Vec<GeoRecord> = read_json(&file)?;
            let normalized = validate_geo_targets(&targets)?;
            tracing::info!("✅ {} targets valid", normalized.len());
            print_json(&normalized)?;
        }

        Command::Batch { profiles, targets } => {
            let profiles: Vec<Profile> = read_json(&profiles)?;
            let targets: Vec<GeoRecord> = read_json(&targets)?;

            let mut locator = GeoLocator::new(geocoder);
            if let Some(db) = open_database(config.ip_database_path())? {
                locator = locator.with_ip_database(db);
            }

            let outcomes = run_batch(
                Arc::new(locator),
                profiles,
                &targets,
                config.concurrent_requests(),
            )
            .await?;
            print_json(&outcomes)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
