//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use sl_geodb_core::loader::default_dataset_path;
use sl_geodb_core::{EngineConfig, FlatRecord, LocationService};

/// The single row used by the search scenarios.
pub fn magbass_record() -> FlatRecord {
    FlatRecord::new(
        "NORTHERN",
        "TONKOLILI",
        "",
        "KHOLIFA MAMUNTHA/MAYOSSO",
        "MAMUNTHA",
        "MAGBASS (KHOLIFA MAMUNTHA/MAYOSSO)",
    )
}

/// Service initialized from the bundled CSV with default settings.
pub fn bundled_service() -> LocationService {
    service_with(EngineConfig::default())
}

pub fn service_with(config: EngineConfig) -> LocationService {
    let service = LocationService::new(config);
    service
        .initialize_from_path(default_dataset_path())
        .expect("bundled dataset loads");
    service
}
