// crates/sl-geodb-core/src/index.rs

//! # Inverted Name Index
//!
//! Maps normalized keys to the entities reachable through them. Every
//! non-empty name of every record is posted under:
//!
//! 1. its full normalized form (`partial_match = false`),
//! 2. each significant word when the name has two or more words,
//! 3. its phonetic key, when that differs from the full form.
//!
//! Keys live in a `BTreeMap`, so prefix scans are ordered range walks.

use crate::model::{FlatRecord, LocationKind};
use crate::text::{normalize, phonetic_key, significant_words};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use tracing::{info, instrument};

/// One posting: an entity of some kind, reachable from a key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    /// Name in its original casing.
    pub name: String,
    pub kind: LocationKind,
    pub normalized: String,
    /// Position of the originating row in the record set.
    pub record: usize,
    /// Set when the key is a sub-word or phonetic key rather than the full name.
    pub partial_match: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    map: BTreeMap<String, Vec<IndexEntry>>,
    postings: usize,
}

impl InvertedIndex {
    /// Build the complete index for `records` in one pass.
    ///
    /// Rows without a region or town are left out, matching the tree.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(records: &[FlatRecord]) -> Self {
        let mut index = InvertedIndex::default();
        // (key, name, kind) triples already posted; normalized is a function of name
        let mut posted: HashSet<(String, String, LocationKind)> = HashSet::new();

        for (row, record) in records.iter().enumerate() {
            if !record.has_region_and_town() {
                continue;
            }
            for kind in LocationKind::ALL {
                let name = record.field(kind).trim();
                let normalized = normalize(name);
                if normalized.is_empty() {
                    continue;
                }

                let mut post = |key: &str, partial_match: bool| {
                    if !posted.insert((key.to_owned(), name.to_owned(), kind)) {
                        return;
                    }
                    index.map.entry(key.to_owned()).or_default().push(IndexEntry {
                        name: name.to_owned(),
                        kind,
                        normalized: normalized.clone(),
                        record: row,
                        partial_match,
                    });
                    index.postings += 1;
                };

                // 1. Full name
                post(&normalized, false);

                // 2. Words of multi-word names
                if normalized.split(' ').count() >= 2 {
                    for word in significant_words(&normalized) {
                        post(word, true);
                    }
                }

                // 3. Phonetic key
                let phonetic = phonetic_key(&normalized);
                if !phonetic.is_empty() && phonetic != normalized {
                    post(&phonetic, true);
                }
            }
        }

        info!(
            keys = index.map.len(),
            postings = index.postings,
            "built search index"
        );
        index
    }

    /// Entries posted under exactly `key`.
    pub fn get(&self, key: &str) -> &[IndexEntry] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// All `(key, entries)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexEntry])> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `(key, entries)` pairs whose key starts with `prefix`, ascending.
    pub fn prefixed<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [IndexEntry])> + 'a {
        self.map
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Total number of postings across all keys.
    pub fn postings(&self) -> usize {
        self.postings
    }
}
