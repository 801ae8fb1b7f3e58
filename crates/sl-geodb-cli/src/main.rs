//! sl-geodb: command-line interface for sl-geodb-core
//!
//! Loads the location table once, then answers a single query.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ sl-geodb stats
//!
//! - Browse the hierarchy
//!   $ sl-geodb regions
//!   $ sl-geodb districts northern
//!   $ sl-geodb chiefdoms tonkolili
//!   $ sl-geodb towns "kholifa mamuntha/mayosso"
//!
//! - Search, autocomplete, suggest
//!   $ sl-geodb search magbass --kind town
//!   $ sl-geodb autocomplete ken --limit 5
//!   $ sl-geodb suggest ma --kind chiefdom
//!
//! - Validate an address
//!   $ sl-geodb validate --region southern --district tonkolili
//!
//! Data source
//! -----------
//!
//! By default the CSV bundled with `sl-geodb-core` is used. Point `--input`
//! at another `.csv` or `.csv.gz` file to use your own table, and `--config`
//! at a JSON file to tune cache size, rate limits and scoring. Add `--json`
//! for machine-readable output.
mod args;

use crate::args::{CliArgs, Commands, ValidateArgs};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use sl_geodb_core::loader::default_dataset_path;
use sl_geodb_core::{EngineConfig, GeoError, HierarchyInput, LocationService, SearchOptions};
use std::process::ExitCode;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const CLIENT_ID: &str = "cli";

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// A named node with its code, for listings.
#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    code: &'a str,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_entries(json: bool, entries: &[Entry<'_>], empty: &str) -> anyhow::Result<()> {
    if json {
        return print_json(entries);
    }
    if entries.is_empty() {
        eprintln!("{empty}");
    }
    for e in entries {
        println!("{} ({})", e.name, e.code);
    }
    Ok(())
}

fn print_names(json: bool, names: &[String], empty: &str) -> anyhow::Result<()> {
    if json {
        return print_json(names);
    }
    if names.is_empty() {
        eprintln!("{empty}");
    }
    for n in names {
        println!("{n}");
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    init_logging(args.verbose)?;

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let default_limit = config.default_limit;

    let input = args.input.clone().unwrap_or_else(default_dataset_path);
    debug!(input = %input.display(), "loading dataset");

    let service = LocationService::new(config);
    service
        .initialize_from_path(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let db = service.db()?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            if args.json {
                print_json(&stats)?;
            } else {
                println!("Database statistics:");
                println!("  Records:   {}", stats.records);
                println!("  Regions:   {}", stats.regions);
                println!("  Districts: {}", stats.districts);
                println!("  Councils:  {}", stats.councils);
                println!("  Chiefdoms: {}", stats.chiefdoms);
                println!("  Sections:  {}", stats.sections);
                println!("  Towns:     {}", stats.towns);
            }
        }

        Commands::Regions => {
            let entries: Vec<_> = db
                .regions()
                .iter()
                .map(|r| Entry { name: r.name(), code: r.code() })
                .collect();
            print_entries(args.json, &entries, "No regions loaded")?;
        }

        Commands::Districts { region } => {
            let entries: Vec<_> = db
                .districts_of(&region)
                .iter()
                .map(|d| Entry { name: d.name(), code: d.code() })
                .collect();
            print_entries(args.json, &entries, &format!("Region {region} not found"))?;
        }

        Commands::Chiefdoms { district } => {
            let entries: Vec<_> = db
                .chiefdoms_of(&district)
                .into_iter()
                .map(|c| Entry { name: c.name(), code: c.code() })
                .collect();
            print_entries(args.json, &entries, &format!("District {district} not found"))?;
        }

        Commands::Towns { chiefdom } => {
            let towns = db.towns_of(&chiefdom);
            if args.json {
                print_json(&towns)?;
            } else {
                if towns.is_empty() {
                    eprintln!("Chiefdom {chiefdom} not found");
                }
                for t in towns {
                    match t.section() {
                        Some(section) => println!("{} ({}, section {})", t.name(), t.code(), section),
                        None => println!("{} ({})", t.name(), t.code()),
                    }
                }
            }
        }

        Commands::Search {
            query,
            limit,
            min_score,
            kinds,
            no_fuzzy,
        } => {
            let mut options = SearchOptions::default()
                .limit(limit.unwrap_or(default_limit))
                .fuzzy(!no_fuzzy);
            if let Some(score) = min_score {
                options = options.min_score(score);
            }
            if !kinds.is_empty() {
                options = options.kinds(kinds);
            }

            let hits = service.search(&query, &options, CLIENT_ID)?;
            if args.json {
                print_json(&hits)?;
            } else if hits.is_empty() {
                println!("No locations found matching: {query}");
            } else {
                for h in &hits {
                    println!("{:.2}  {:<9} {}  [{}]", h.score, h.kind.as_str(), h.full_path, h.code);
                }
            }
        }

        Commands::Autocomplete { query, limit } => {
            let names = service.autocomplete(&query, CLIENT_ID, limit.unwrap_or(default_limit))?;
            print_names(args.json, &names, &format!("No completions for: {query}"))?;
        }

        Commands::Suggest {
            partial,
            kind,
            limit,
        } => {
            let names = service.suggestions(&partial, kind, limit.unwrap_or(default_limit))?;
            print_names(args.json, &names, &format!("No suggestions for: {partial}"))?;
        }

        Commands::Validate(v) => return validate(&service, v, args.json),
    }

    Ok(ExitCode::SUCCESS)
}

fn validate(service: &LocationService, v: ValidateArgs, json: bool) -> anyhow::Result<ExitCode> {
    let input = HierarchyInput {
        region: v.region,
        district: v.district,
        council: v.council,
        chiefdom: v.chiefdom,
        section: v.section,
        town: v.town,
    };

    match service.validate_hierarchy(&input) {
        Ok(()) => {
            if json {
                print_json(&json!({ "valid": true }))?;
            } else {
                println!("valid");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(GeoError::Validation {
            message,
            suggestions,
        }) => {
            if json {
                print_json(&json!({
                    "valid": false,
                    "message": message,
                    "suggestions": suggestions,
                }))?;
            } else {
                println!("invalid: {message}");
                if !suggestions.is_empty() {
                    println!("did you mean: {}", suggestions.join(", "));
                }
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
