// crates/sl-geodb-core/src/config.rs

//! Engine configuration: defaults, a builder and JSON loading.

use crate::cache::DEFAULT_CACHE_SIZE;
use crate::error::{GeoError, Result};
use crate::rate_limit::RateLimit;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Tunables of the search engine and validator.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```rust
/// use sl_geodb_core::EngineConfig;
///
/// let cfg: EngineConfig = serde_json::from_str(r#"{ "cache_size": 64 }"#).unwrap();
/// assert_eq!(cfg.cache_size, 64);
/// assert_eq!(cfg.search_rate.max_requests, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of cached query results.
    pub cache_size: usize,
    pub autocomplete_rate: RateLimit,
    pub search_rate: RateLimit,
    /// Result limit used when the caller does not give one.
    pub default_limit: usize,
    /// Lowest similarity score a search hit or validator suggestion may have.
    pub min_score: f64,
    /// Number of corrections offered by a failed validation.
    pub suggestion_count: usize,
    /// Longest accepted query, in characters, after trimming.
    pub max_query_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cache_size: DEFAULT_CACHE_SIZE,
            autocomplete_rate: RateLimit::per_minute(50),
            search_rate: RateLimit::per_minute(30),
            default_limit: 20,
            min_score: 0.3,
            suggestion_count: 3,
            max_query_len: 100,
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Read a JSON configuration file; missing keys keep their defaults.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                GeoError::NotFound(format!("config file {}", path.display()))
            }
            _ => GeoError::Io(e),
        })?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(GeoError::validation(format!(
                "min_score must be within [0, 1], got {}",
                self.min_score
            )));
        }
        if self.max_query_len == 0 {
            return Err(GeoError::validation("max_query_len must be positive"));
        }
        Ok(())
    }
}

/// Fluent construction of an [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn cache_size(mut self, size: usize) -> Self {
        self.config.cache_size = size;
        self
    }

    pub fn autocomplete_rate(mut self, max_requests: usize, window_ms: u64) -> Self {
        self.config.autocomplete_rate = RateLimit {
            max_requests,
            window_ms,
        };
        self
    }

    pub fn search_rate(mut self, max_requests: usize, window_ms: u64) -> Self {
        self.config.search_rate = RateLimit {
            max_requests,
            window_ms,
        };
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Clamped into `[0, 1]`.
    pub fn min_score(mut self, score: f64) -> Self {
        self.config.min_score = score.clamp(0.0, 1.0);
        self
    }

    pub fn suggestion_count(mut self, count: usize) -> Self {
        self.config.suggestion_count = count;
        self
    }

    pub fn max_query_len(mut self, len: usize) -> Self {
        self.config.max_query_len = len.max(1);
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
