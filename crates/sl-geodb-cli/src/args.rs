use clap::{ArgAction, Args, Parser, Subcommand};
use sl_geodb_core::LocationKind;
use std::path::PathBuf;

/// CLI arguments for sl-geodb
#[derive(Debug, Parser)]
#[command(
    name = "sl-geodb",
    version,
    about = "Search, browse and validate Sierra Leone locations offline"
)]
pub struct CliArgs {
    /// Path to the input CSV (plain or .gz; default: the bundled sl_locations.csv)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// JSON file overriding engine settings (cache size, rate limits, ...)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the database contents
    Stats,

    /// List all regions
    Regions,

    /// List the districts of a region
    Districts {
        /// Region name (case-insensitive)
        region: String,
    },

    /// List the chiefdoms of a district
    Chiefdoms {
        /// District name (case-insensitive)
        district: String,
    },

    /// List the towns of a chiefdom
    Towns {
        /// Chiefdom name (case-insensitive)
        chiefdom: String,
    },

    /// Ranked search over every location kind
    Search {
        query: String,

        /// Maximum number of hits
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        /// Minimum similarity score in [0, 1]
        #[arg(long)]
        min_score: Option<f64>,

        /// Restrict to these kinds (repeatable: --kind town --kind chiefdom)
        #[arg(short = 'k', long = "kind", value_parser = parse_kind)]
        kinds: Vec<LocationKind>,

        /// Disable the phonetic fallback
        #[arg(long)]
        no_fuzzy: bool,
    },

    /// Names overlapping a query, best first
    Autocomplete {
        query: String,

        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },

    /// Alphabetical completions of a name prefix
    Suggest {
        partial: String,

        #[arg(short = 'k', long, value_parser = parse_kind)]
        kind: Option<LocationKind>,

        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },

    /// Check that the given levels exist and belong together
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub council: Option<String>,
    #[arg(long)]
    pub chiefdom: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub town: Option<String>,
}

fn parse_kind(s: &str) -> Result<LocationKind, String> {
    s.parse::<LocationKind>().map_err(|e| e.to_string())
}
