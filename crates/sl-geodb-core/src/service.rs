// crates/sl-geodb-core/src/service.rs

//! # Location Service
//!
//! Owns the loaded dataset and the search engine built over it. Loading
//! happens once per service; later calls to `initialize` return the state
//! that is already there.

use crate::common::DbStats;
use crate::config::EngineConfig;
use crate::error::{GeoError, Result};
use crate::loader::load_records_from_path;
use crate::model::{FlatRecord, GeoDb, LocationKind};
use crate::sanitize::BasicSanitizer;
use crate::search::{SearchEngine, SearchHit, SearchOptions};
use crate::validate::{HierarchyInput, HierarchyValidator};
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Dataset and engine, built together during initialization.
#[derive(Debug)]
pub struct Loaded {
    db: GeoDb,
    engine: SearchEngine,
}

impl Loaded {
    fn build(records: Vec<FlatRecord>, config: &EngineConfig) -> Result<Self> {
        let db = GeoDb::from_records(records)?;
        let engine = SearchEngine::new(db.shared_records(), config.clone());
        Ok(Loaded { db, engine })
    }

    pub fn db(&self) -> &GeoDb {
        &self.db
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn validator(&self) -> HierarchyValidator<'_> {
        HierarchyValidator::new(&self.db, &self.engine)
    }
}

/// Owner of one loaded location dataset.
///
/// Created empty, then initialized exactly once; later `initialize*` calls
/// return the state built by the first successful one. A failed
/// initialization leaves the service empty, so it can be retried. Every query
/// method fails with [`GeoError::NotInitialized`] until then.
///
/// The service is `Sync` and can be shared between threads behind an `Arc`.
///
/// ```rust
/// use sl_geodb_core::{FlatRecord, LocationService, SearchOptions};
///
/// let service = LocationService::default();
/// service
///     .initialize(vec![FlatRecord::new("SOUTHERN", "BO", "", "KAKUA", "", "BO")])
///     .unwrap();
/// let hits = service.search("bo", &SearchOptions::default(), "doc").unwrap();
/// assert_eq!(hits[0].score, 1.0);
/// ```
#[derive(Debug, Default)]
pub struct LocationService {
    config: EngineConfig,
    state: OnceCell<Loaded>,
}

impl LocationService {
    pub fn new(config: EngineConfig) -> Self {
        LocationService {
            config,
            state: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the tree and index from `records`.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn initialize(&self, records: Vec<FlatRecord>) -> Result<&Loaded> {
        if let Some(loaded) = self.state.get() {
            debug!("location service already initialized");
            return Ok(loaded);
        }
        let loaded = self
            .state
            .get_or_try_init(|| Loaded::build(records, &self.config))?;
        let stats = loaded.db.stats();
        info!(
            regions = stats.regions,
            districts = stats.districts,
            chiefdoms = stats.chiefdoms,
            towns = stats.towns,
            "location service initialized"
        );
        Ok(loaded)
    }

    /// Load a CSV (optionally `.gz`) dataset and initialize from it.
    pub fn initialize_from_path(&self, path: impl AsRef<Path>) -> Result<&Loaded> {
        if let Some(loaded) = self.state.get() {
            debug!("location service already initialized");
            return Ok(loaded);
        }
        let records = load_records_from_path(path, &BasicSanitizer::default())?;
        self.initialize(records)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn loaded(&self) -> Result<&Loaded> {
        self.state.get().ok_or(GeoError::NotInitialized)
    }

    pub fn db(&self) -> Result<&GeoDb> {
        self.loaded().map(Loaded::db)
    }

    pub fn engine(&self) -> Result<&SearchEngine> {
        self.loaded().map(Loaded::engine)
    }

    pub fn validator(&self) -> Result<HierarchyValidator<'_>> {
        self.loaded().map(Loaded::validator)
    }

    pub fn stats(&self) -> Result<DbStats> {
        self.db().map(GeoDb::stats)
    }

    pub fn autocomplete(&self, query: &str, client_id: &str, limit: usize) -> Result<Vec<String>> {
        self.engine()?.autocomplete(query, client_id, limit)
    }

    pub fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        client_id: &str,
    ) -> Result<Vec<SearchHit>> {
        self.engine()?.search(query, options, client_id)
    }

    pub fn suggestions(
        &self,
        partial: &str,
        kind: Option<LocationKind>,
        limit: usize,
    ) -> Result<Vec<String>> {
        self.engine()?.suggestions(partial, kind, limit)
    }

    pub fn validate_hierarchy(&self, input: &HierarchyInput) -> Result<()> {
        self.validator()?.validate_hierarchy(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FlatRecord> {
        vec![
            FlatRecord::new("SOUTHERN", "BO", "", "KAKUA", "", "BO"),
            FlatRecord::new("EASTERN", "KENEMA", "", "NONGOWA", "", "KENEMA"),
        ]
    }

    #[test]
    fn queries_fail_before_initialization() {
        let service = LocationService::default();
        assert!(!service.is_initialized());
        assert!(matches!(
            service.search("bo", &SearchOptions::default(), "t"),
            Err(GeoError::NotInitialized)
        ));
        assert!(matches!(service.stats(), Err(GeoError::NotInitialized)));
    }

    #[test]
    fn second_initialize_is_a_no_op() {
        let service = LocationService::default();
        service.initialize(rows()).unwrap();
        let again = service
            .initialize(vec![FlatRecord::new("NORTHERN", "BOMBALI", "", "", "", "MAKENI")])
            .unwrap();
        assert_eq!(again.db().records().len(), 2);
        assert!(again.db().find_region("NORTHERN").is_none());
    }

    #[test]
    fn failed_initialize_can_be_retried() {
        let service = LocationService::default();
        let err = service.initialize(Vec::new()).unwrap_err();
        assert!(matches!(err, GeoError::Format(_)));
        assert!(!service.is_initialized());

        service.initialize(rows()).unwrap();
        assert!(service.is_initialized());
        assert_eq!(service.stats().unwrap().regions, 2);
    }

    #[test]
    fn delegates_queries() {
        let service = LocationService::default();
        service.initialize(rows()).unwrap();
        assert_eq!(service.autocomplete("ken", "t", 5).unwrap(), vec!["KENEMA"]);
        assert_eq!(service.suggestions("ka", None, 5).unwrap(), vec!["KAKUA"]);
        assert!(service
            .validate_hierarchy(&HierarchyInput::new().region("Eastern").district("Kenema"))
            .is_ok());
    }
}
