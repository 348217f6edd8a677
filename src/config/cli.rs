use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-targeting")]
#[command(about = "Resolve profile locations and check campaign geo targeting")]
pub struct Cli {
    /// Path to TOML configuration file (falls back to environment variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a coordinate pair through the geocoder
    Coords {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Creation time in seconds since epoch (defaults to now)
        #[arg(long)]
        ts: Option<i64>,
    },

    /// Resolve an IP address through the offline database
    Ip {
        address: String,
        /// Override the configured .mmdb path
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Check a candidate location against a target list
    Match {
        /// JSON file holding the target list
        #[arg(long)]
        targets: PathBuf,
        /// Candidate record as inline JSON (`null` for unknown)
        #[arg(long, conflicts_with = "candidate_file")]
        candidate: Option<String>,
        #[arg(long)]
        candidate_file: Option<PathBuf>,
    },

    /// Validate a campaign target list
    Targets { file: PathBuf },

    /// Resolve a list of profiles and report eligibility for a target list
    Batch {
        #[arg(long)]
        profiles: PathBuf,
        #[arg(long)]
        targets: PathBuf,
    },
}
