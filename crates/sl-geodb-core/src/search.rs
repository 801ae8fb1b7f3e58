// crates/sl-geodb-core/src/search.rs

//! # Search Engine
//!
//! Query side of the crate, built over an [`InvertedIndex`]:
//!
//! * [`SearchEngine::autocomplete`]: names whose keys overlap the query,
//! * [`SearchEngine::search`]: tiered ranking (exact key, word prefixes,
//!   phonetic fallback) returning scored [`SearchHit`]s,
//! * [`SearchEngine::suggestions`]: alphabetical key-prefix completions.
//!
//! Autocomplete and search pass a per-client rate limiter first (one limiter
//! each). All three consult the shared LRU cache before touching the index.

use crate::cache::{CacheKey, CacheLayer, CacheStats};
use crate::config::EngineConfig;
use crate::error::{GeoError, Result};
use crate::index::{IndexEntry, InvertedIndex};
use crate::model::{FlatRecord, LocationKind};
use crate::rate_limit::RateLimiter;
use crate::sanitize::{BasicSanitizer, Sanitizer};
use crate::similarity::normalized_similarity;
use crate::text::{normalize, phonetic_key, significant_words};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Scores from the phonetic tier are scaled by this factor.
pub const PHONETIC_PENALTY: f64 = 0.8;

/// Shortest normalized query accepted by autocomplete and suggestions.
pub const MIN_QUERY_LEN: usize = 2;

/// Knobs of a single [`SearchEngine::search`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub limit: usize,
    pub min_score: f64,
    /// Only entities of these kinds are returned.
    pub kinds: Vec<LocationKind>,
    /// Enables the phonetic tier.
    pub fuzzy: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 20,
            min_score: 0.3,
            kinds: LocationKind::ALL.to_vec(),
            fuzzy: true,
        }
    }
}

impl SearchOptions {
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = LocationKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Restrict to a single kind.
    pub fn only(self, kind: LocationKind) -> Self {
        self.kinds([kind])
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    fn wants(&self, kind: LocationKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn cache_key(&self, query: &str) -> CacheKey {
        let mut kinds = self.kinds.clone();
        kinds.sort();
        kinds.dedup();
        CacheKey::Search {
            query: query.to_owned(),
            limit: self.limit,
            min_score_bits: self.min_score.to_bits(),
            kinds,
            fuzzy: self.fuzzy,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub kind: LocationKind,
    /// Ancestors down to the entity, e.g. `NORTHERN > TONKOLILI`.
    pub full_path: String,
    pub code: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub(crate) enum CachedResult {
    Names(Vec<String>),
    Hits(Vec<SearchHit>),
}

/// Read-only query engine over a fixed record set.
pub struct SearchEngine {
    index: InvertedIndex,
    records: Arc<[FlatRecord]>,
    cache: CacheLayer<CacheKey, CachedResult>,
    autocomplete_limiter: RateLimiter,
    search_limiter: RateLimiter,
    sanitizer: Box<dyn Sanitizer>,
    config: EngineConfig,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("keys", &self.index.len())
            .field("records", &self.records.len())
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    /// Index `records` and set up cache and limiters from `config`.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn new(records: Arc<[FlatRecord]>, config: EngineConfig) -> Self {
        let index = InvertedIndex::build(&records);
        info!(
            keys = index.len(),
            postings = index.postings(),
            cache_size = config.cache_size,
            "search engine ready"
        );
        SearchEngine {
            index,
            records,
            cache: CacheLayer::new(config.cache_size),
            autocomplete_limiter: RateLimiter::new(config.autocomplete_rate),
            search_limiter: RateLimiter::new(config.search_rate),
            sanitizer: Box::new(BasicSanitizer::new(config.max_query_len)),
            config,
        }
    }

    pub fn from_records(records: Vec<FlatRecord>, config: EngineConfig) -> Self {
        Self::new(records.into(), config)
    }

    /// Replace the query sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Names whose index keys overlap `query`, best first.
    ///
    /// Fails with `RateLimit` once `client_id` exhausts its autocomplete
    /// budget, and with `Validation` when the normalized query is shorter
    /// than two characters.
    #[instrument(skip(self), level = "debug")]
    pub fn autocomplete(&self, query: &str, client_id: &str, limit: usize) -> Result<Vec<String>> {
        self.autocomplete_limiter.check(client_id)?;
        let query = normalize(&self.sanitizer.sanitize(query)?);
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(GeoError::validation(format!(
                "Query must be at least {MIN_QUERY_LEN} characters"
            )));
        }

        let key = CacheKey::Autocomplete {
            query: query.clone(),
            limit,
        };
        if let Some(CachedResult::Names(names)) = self.cache.get(&key) {
            debug!(%query, "autocomplete cache hit");
            return Ok(names);
        }

        let mut best: HashMap<&str, f64> = HashMap::new();
        for (k, entries) in self.index.iter() {
            if !(k.contains(query.as_str()) || query.contains(k)) {
                continue;
            }
            for entry in entries {
                let score = normalized_similarity(&entry.normalized, &query);
                if score < self.config.min_score {
                    continue;
                }
                best.entry(entry.name.as_str())
                    .and_modify(|s| *s = s.max(score))
                    .or_insert(score);
            }
        }

        let mut ranked: Vec<(&str, f64)> = best.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let names: Vec<String> = ranked
            .into_iter()
            .take(limit)
            .map(|(name, _)| name.to_owned())
            .collect();

        debug!(%query, results = names.len(), "autocomplete");
        self.cache.set(key, CachedResult::Names(names.clone()));
        Ok(names)
    }

    /// Ranked hits for `query`.
    ///
    /// An empty query yields no hits. Fails with `RateLimit` once `client_id`
    /// exhausts its search budget.
    #[instrument(skip(self, options), fields(limit = options.limit))]
    pub fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        client_id: &str,
    ) -> Result<Vec<SearchHit>> {
        self.search_limiter.check(client_id)?;
        let query = normalize(&self.sanitizer.sanitize(query)?);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let key = options.cache_key(&query);
        if let Some(CachedResult::Hits(hits)) = self.cache.get(&key) {
            debug!(%query, "search cache hit");
            return Ok(hits);
        }

        let hits = self.rank_normalized(&query, options);
        debug!(%query, results = hits.len(), "search");
        self.cache.set(key, CachedResult::Hits(hits.clone()));
        Ok(hits)
    }

    /// Distinct names whose keys start with `partial`, alphabetically.
    ///
    /// Not rate limited. Partials shorter than two normalized characters
    /// give an empty list.
    pub fn suggestions(
        &self,
        partial: &str,
        kind: Option<LocationKind>,
        limit: usize,
    ) -> Result<Vec<String>> {
        let partial = normalize(&self.sanitizer.sanitize(partial)?);
        if partial.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let key = CacheKey::Suggestions {
            partial: partial.clone(),
            kind,
            limit,
        };
        if let Some(CachedResult::Names(names)) = self.cache.get(&key) {
            return Ok(names);
        }

        let names: BTreeSet<&str> = self
            .index
            .prefixed(&partial)
            .flat_map(|(_, entries)| entries)
            .filter(|e| kind.map_or(true, |k| e.kind == k))
            .map(|e| e.name.as_str())
            .collect();
        let names: Vec<String> = names.into_iter().take(limit).map(str::to_owned).collect();

        self.cache.set(key, CachedResult::Names(names.clone()));
        Ok(names)
    }

    /// Tiered ranking without admission control or caching.
    pub(crate) fn rank(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }
        self.rank_normalized(&query, options)
    }

    fn rank_normalized(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        let mut seen: HashSet<(&str, LocationKind)> = HashSet::new();
        let mut hits = Vec::new();

        // exact key
        for entry in self.index.get(query) {
            if options.wants(entry.kind) && seen.insert((entry.name.as_str(), entry.kind)) {
                hits.push(self.hit(entry, 1.0));
            }
        }

        // word prefixes
        for word in significant_words(query) {
            for (_, entries) in self.index.prefixed(word) {
                for entry in entries {
                    if !options.wants(entry.kind) || seen.contains(&(entry.name.as_str(), entry.kind)) {
                        continue;
                    }
                    let score = normalized_similarity(&entry.normalized, query);
                    if score >= options.min_score {
                        seen.insert((entry.name.as_str(), entry.kind));
                        hits.push(self.hit(entry, score));
                    }
                }
            }
        }

        // phonetic fallback
        if options.fuzzy && hits.len() * 2 < options.limit {
            let key = phonetic_key(query);
            if !key.is_empty() {
                for entry in self.index.get(&key) {
                    if !options.wants(entry.kind) || seen.contains(&(entry.name.as_str(), entry.kind)) {
                        continue;
                    }
                    let score = normalized_similarity(&entry.normalized, query) * PHONETIC_PENALTY;
                    if score >= options.min_score {
                        seen.insert((entry.name.as_str(), entry.kind));
                        hits.push(self.hit(entry, score));
                    }
                }
            }
        }

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(options.limit);
        hits
    }

    fn hit(&self, entry: &IndexEntry, score: f64) -> SearchHit {
        let full_path = self
            .records
            .get(entry.record)
            .map(|r| r.path_to(entry.kind))
            .unwrap_or_else(|| entry.name.clone());
        SearchHit {
            name: entry.name.clone(),
            kind: entry.kind,
            full_path,
            code: entry.kind.code_for(&entry.name),
            score,
        }
    }
}
