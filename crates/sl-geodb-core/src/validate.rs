// crates/sl-geodb-core/src/validate.rs

//! # Hierarchy Validation
//!
//! Checks that a name exists at a level, optionally inside a parent scope
//! (a district inside a region, a town inside a chiefdom and section, ...).
//! Membership is decided against the distinct names of the flat records,
//! compared on normalized form. Failed checks carry corrections ranked by
//! the search engine.

use crate::error::{GeoError, Result};
use crate::model::{GeoDb, LocationKind};
use crate::search::{SearchEngine, SearchOptions};
use crate::text::{equals_normalized, normalize};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a single membership check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub message: Option<String>,
    pub suggestions: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        ValidationOutcome {
            is_valid: true,
            message: None,
            suggestions: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        ValidationOutcome {
            is_valid: false,
            message: Some(message.into()),
            suggestions,
        }
    }

    /// `Ok(())` when valid, otherwise a `GeoError::Validation`.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            return Ok(());
        }
        Err(GeoError::Validation {
            message: self.message.unwrap_or_default(),
            suggestions: self.suggestions,
        })
    }
}

/// A possibly partial address to validate as a whole. Absent levels are not
/// checked; present but empty levels fail as required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyInput {
    pub region: Option<String>,
    pub district: Option<String>,
    pub council: Option<String>,
    pub chiefdom: Option<String>,
    pub section: Option<String>,
    pub town: Option<String>,
}

impl HierarchyInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, v: impl Into<String>) -> Self {
        self.region = Some(v.into());
        self
    }

    pub fn district(mut self, v: impl Into<String>) -> Self {
        self.district = Some(v.into());
        self
    }

    pub fn council(mut self, v: impl Into<String>) -> Self {
        self.council = Some(v.into());
        self
    }

    pub fn chiefdom(mut self, v: impl Into<String>) -> Self {
        self.chiefdom = Some(v.into());
        self
    }

    pub fn section(mut self, v: impl Into<String>) -> Self {
        self.section = Some(v.into());
        self
    }

    pub fn town(mut self, v: impl Into<String>) -> Self {
        self.town = Some(v.into());
        self
    }
}

/// Membership checks over a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyValidator<'a> {
    db: &'a GeoDb,
    engine: &'a SearchEngine,
}

impl<'a> HierarchyValidator<'a> {
    pub fn new(db: &'a GeoDb, engine: &'a SearchEngine) -> Self {
        HierarchyValidator { db, engine }
    }

    pub fn is_valid_region(&self, name: &str) -> ValidationOutcome {
        self.check(LocationKind::Region, name, &[])
    }

    pub fn is_valid_district(&self, name: &str, region: Option<&str>) -> ValidationOutcome {
        self.check(LocationKind::District, name, &[(LocationKind::Region, region)])
    }

    pub fn is_valid_council(&self, name: &str, district: Option<&str>) -> ValidationOutcome {
        self.check(LocationKind::Council, name, &[(LocationKind::District, district)])
    }

    pub fn is_valid_chiefdom(&self, name: &str, district: Option<&str>) -> ValidationOutcome {
        self.check(LocationKind::Chiefdom, name, &[(LocationKind::District, district)])
    }

    pub fn is_valid_section(&self, name: &str, chiefdom: Option<&str>) -> ValidationOutcome {
        self.check(LocationKind::Section, name, &[(LocationKind::Chiefdom, chiefdom)])
    }

    pub fn is_valid_town(
        &self,
        name: &str,
        chiefdom: Option<&str>,
        section: Option<&str>,
    ) -> ValidationOutcome {
        self.check(
            LocationKind::Town,
            name,
            &[
                (LocationKind::Chiefdom, chiefdom),
                (LocationKind::Section, section),
            ],
        )
    }

    /// Check every provided level of `input`, each against its provided
    /// parent, and report all failures at once.
    pub fn validate_hierarchy(&self, input: &HierarchyInput) -> Result<()> {
        let region = input.region.as_deref();
        let district = input.district.as_deref();
        let chiefdom = input.chiefdom.as_deref();
        let section = input.section.as_deref();

        let outcomes = [
            region.map(|v| self.is_valid_region(v)),
            district.map(|v| self.is_valid_district(v, region)),
            input.council.as_deref().map(|v| self.is_valid_council(v, district)),
            chiefdom.map(|v| self.is_valid_chiefdom(v, district)),
            section.map(|v| self.is_valid_section(v, chiefdom)),
            input.town.as_deref().map(|v| self.is_valid_town(v, chiefdom, section)),
        ];

        let mut messages = Vec::new();
        let mut suggestions: Vec<String> = Vec::new();
        for outcome in outcomes.into_iter().flatten().filter(|o| !o.is_valid) {
            messages.extend(outcome.message);
            for s in outcome.suggestions {
                if !suggestions.contains(&s) {
                    suggestions.push(s);
                }
            }
        }

        if messages.is_empty() {
            return Ok(());
        }
        debug!(failures = messages.len(), "hierarchy rejected");
        Err(GeoError::Validation {
            message: messages.join("; "),
            suggestions,
        })
    }

    fn check(
        &self,
        kind: LocationKind,
        name: &str,
        scope: &[(LocationKind, Option<&str>)],
    ) -> ValidationOutcome {
        if normalize(name).is_empty() {
            return ValidationOutcome::invalid(format!("{} is required", kind.label()), Vec::new());
        }

        // scope levels that were actually given, normalized once
        let scope: Vec<(LocationKind, &str, String)> = scope
            .iter()
            .filter_map(|(k, v)| {
                let v = (*v)?;
                let n = normalize(v);
                (!n.is_empty()).then(|| (*k, v.trim(), n))
            })
            .collect();

        let known = self.db.distinct_names(kind, |r| {
            scope.iter().all(|(k, _, n)| normalize(r.field(*k)) == *n)
        });
        if known.iter().any(|n| equals_normalized(n, name)) {
            return ValidationOutcome::valid();
        }

        let message = if scope.is_empty() {
            format!("{} '{}' not found", kind.label(), name.trim())
        } else {
            let within = scope
                .iter()
                .map(|(k, v, _)| format!("{} '{}'", k.as_str(), v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} '{}' not found in {}", kind.label(), name.trim(), within)
        };
        ValidationOutcome::invalid(message, self.suggest(kind, name))
    }

    fn suggest(&self, kind: LocationKind, name: &str) -> Vec<String> {
        let config = self.engine.config();
        let options = SearchOptions::default()
            .limit(config.suggestion_count)
            .min_score(config.min_score)
            .only(kind);
        self.engine
            .rank(name, &options)
            .into_iter()
            .map(|hit| hit.name)
            .collect()
    }
}
