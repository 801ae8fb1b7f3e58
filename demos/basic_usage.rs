//! Basic usage example for sl-geodb
//!
//! This example demonstrates how to:
//! - Load the bundled location table
//! - Walk the region / district / chiefdom / town hierarchy
//! - Search, autocomplete and suggest names

use sl_geodb_core::loader::default_dataset_path;
use sl_geodb_core::{LocationKind, LocationService, Result, SearchOptions};

fn main() -> Result<()> {
    println!("=== SL-GeoDB Basic Usage Example ===\n");

    // Load the database
    println!("Loading location table...");
    let service = LocationService::default();
    service.initialize_from_path(default_dataset_path())?;
    let db = service.db()?;
    println!("✓ Database loaded successfully\n");

    // Example 1: Statistics
    println!("--- Example 1: Database statistics ---");
    let stats = db.stats();
    println!(
        "{} regions, {} districts, {} chiefdoms, {} towns\n",
        stats.regions, stats.districts, stats.chiefdoms, stats.towns
    );

    // Example 2: Regions and their districts
    println!("--- Example 2: Regions and districts ---");
    for region in db.regions() {
        let names: Vec<_> = region.districts().iter().map(|d| d.name()).collect();
        println!("{} ({}): {}", region.name(), region.code(), names.join(", "));
    }
    println!();

    // Example 3: Chiefdoms and towns of a district
    println!("--- Example 3: Chiefdoms of Tonkolili ---");
    for chiefdom in db.chiefdoms_of("Tonkolili") {
        println!("{}", chiefdom.name());
        for town in chiefdom.towns() {
            println!("  - {} [{}]", town.name(), town.code());
        }
    }
    println!();

    // Example 4: Ranked search
    println!("--- Example 4: Search for \"MAG\" ---");
    for hit in service.search("MAG", &SearchOptions::default(), "demo")? {
        println!("{:.2} {:<9} {}", hit.score, hit.kind.as_str(), hit.full_path);
    }
    println!();

    // Example 5: Misspelled search falls back to sound-alike keys
    println!("--- Example 5: Search for \"Tonkollili\" (misspelled) ---");
    let options = SearchOptions::default().only(LocationKind::District);
    for hit in service.search("Tonkollili", &options, "demo")? {
        println!("{:.2} {}", hit.score, hit.name);
    }
    println!();

    // Example 6: Autocomplete and suggestions
    println!("--- Example 6: Autocomplete and suggestions ---");
    println!("autocomplete(\"ken\"): {:?}", service.autocomplete("ken", "demo", 5)?);
    println!(
        "suggestions(\"ka\", chiefdom): {:?}",
        service.suggestions("ka", Some(LocationKind::Chiefdom), 5)?
    );

    Ok(())
}
