// crates/sl-geodb-core/src/lib.rs

//! Offline lookup, fuzzy search and hierarchy validation for Sierra Leone
//! administrative locations (region → district → chiefdom → town, with
//! council and section carried per record).
//!
//! ```rust
//! use sl_geodb_core::{FlatRecord, LocationKind, LocationService, SearchOptions};
//!
//! let service = LocationService::default();
//! service.initialize(vec![FlatRecord::new(
//!     "NORTHERN",
//!     "TONKOLILI",
//!     "",
//!     "KHOLIFA MAMUNTHA/MAYOSSO",
//!     "MAMUNTHA",
//!     "MAGBASS (KHOLIFA MAMUNTHA/MAYOSSO)",
//! )])?;
//!
//! let hits = service.search("MAGBASS", &SearchOptions::default(), "docs")?;
//! assert!(hits.iter().any(|h| h.kind == LocationKind::Town));
//!
//! let check = service.validator()?.is_valid_district("TONKOLILI", Some("SOUTHERN"));
//! assert!(!check.is_valid);
//! # Ok::<(), sl_geodb_core::GeoError>(())
//! ```

pub mod cache;
pub mod common;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod rate_limit;
pub mod sanitize;
pub mod search;
pub mod service;
pub mod similarity;
pub mod text;
pub mod traits;
pub mod validate;

// Re-exports
pub use crate::cache::{CacheKey, CacheLayer, CacheStats, DEFAULT_CACHE_SIZE};
pub use crate::common::DbStats;
pub use crate::config::{EngineConfig, EngineConfigBuilder};
pub use crate::error::{GeoError, Result};
pub use crate::index::{IndexEntry, InvertedIndex};
pub use crate::loader::{load_records_from_path, load_records_from_reader};
pub use crate::model::{
    build_hierarchy, Chiefdom, District, FlatRecord, GeoDb, LocationKind, NodeRef, Region, Town,
};
pub use crate::rate_limit::{RateLimit, RateLimiter};
pub use crate::sanitize::{BasicSanitizer, Sanitizer};
pub use crate::search::{SearchEngine, SearchHit, SearchOptions};
pub use crate::service::{Loaded, LocationService};
pub use crate::similarity::similarity;
pub use crate::text::normalize;
pub use crate::traits::NameMatch;
pub use crate::validate::{HierarchyInput, HierarchyValidator, ValidationOutcome};
