// crates/sl-geodb-core/src/error.rs

//! Crate error type.

use thiserror::Error;

/// Errors surfaced by loading, indexing, querying and validation.
///
/// `Validation` and `RateLimit` are recoverable by the caller (fix the input,
/// or wait for the window to slide). `Format` is fatal to initialization.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("{message}")]
    Validation {
        message: String,
        suggestions: Vec<String>,
    },

    #[error("rate limit exceeded for client '{client_id}': at most {max_requests} requests per {window_ms} ms")]
    RateLimit {
        client_id: String,
        max_requests: usize,
        window_ms: u64,
    },

    #[error("Invalid source data: {0}")]
    Format(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Location service is not initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeoError {
    /// Validation failure without suggestions.
    pub fn validation(message: impl Into<String>) -> Self {
        GeoError::Validation {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GeoError::RateLimit { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GeoError::Validation { .. })
    }

    /// Suggestions attached to a validation failure, empty for every other kind.
    pub fn suggestions(&self) -> &[String] {
        match self {
            GeoError::Validation { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
