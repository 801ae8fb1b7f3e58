//! Validation example for sl-geodb
//!
//! Shows single-level checks with corrections, full-address validation and
//! how rate-limit errors surface.

use sl_geodb_core::loader::default_dataset_path;
use sl_geodb_core::{EngineConfig, GeoError, HierarchyInput, LocationService, Result};

fn main() -> Result<()> {
    println!("=== SL-GeoDB Validation Example ===\n");

    let config = EngineConfig::builder().autocomplete_rate(3, 60_000).build();
    let service = LocationService::new(config);
    service.initialize_from_path(default_dataset_path())?;
    let validator = service.validator()?;

    // Example 1: Single level, inside a scope
    println!("--- Example 1: District inside a region ---");
    for (district, region) in [("Tonkolili", "Northern"), ("Tonkolili", "Southern")] {
        let out = validator.is_valid_district(district, Some(region));
        match out.message {
            None => println!("✓ {district} is in {region}"),
            Some(msg) => println!("✗ {msg} (suggestions: {:?})", out.suggestions),
        }
    }
    println!();

    // Example 2: Misspelled chiefdom
    println!("--- Example 2: Misspelled chiefdom ---");
    let out = validator.is_valid_chiefdom("Nangowa", Some("Kenema"));
    println!("valid: {}, did you mean: {:?}\n", out.is_valid, out.suggestions);

    // Example 3: Whole address
    println!("--- Example 3: Whole address ---");
    let addresses = [
        HierarchyInput::new()
            .region("Southern")
            .district("Bo")
            .chiefdom("Kakua")
            .town("Bo"),
        HierarchyInput::new()
            .region("Southern")
            .district("Tonkolili")
            .chiefdom("Kakua")
            .town(""),
    ];
    for address in &addresses {
        match service.validate_hierarchy(address) {
            Ok(()) => println!("✓ {address:?}"),
            Err(e) => println!("✗ {e}"),
        }
    }
    println!();

    // Example 4: Rate limiting
    println!("--- Example 4: Rate limiting (3 autocompletes per minute) ---");
    for i in 1..=4 {
        match service.autocomplete("bo", "demo-client", 5) {
            Ok(names) => println!("call {i}: {names:?}"),
            Err(e @ GeoError::RateLimit { .. }) => println!("call {i}: {e}"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
