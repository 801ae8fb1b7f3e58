// crates/sl-geodb-core/src/sanitize.rs

//! Input cleaning for queries and loaded fields.

use crate::error::{GeoError, Result};

/// Cleans untrusted text before it reaches the index or the engine.
///
/// Implementations decide what "clean" means; the engine only relies on the
/// result being a plain string and on failures being `GeoError::Validation`.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> Result<String>;
}

/// Default sanitizer: trims, drops control and markup characters and bounds
/// the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicSanitizer {
    pub max_len: usize,
}

impl BasicSanitizer {
    pub const DEFAULT_MAX_LEN: usize = 100;

    pub fn new(max_len: usize) -> Self {
        BasicSanitizer { max_len }
    }
}

impl Default for BasicSanitizer {
    fn default() -> Self {
        BasicSanitizer::new(Self::DEFAULT_MAX_LEN)
    }
}

impl Sanitizer for BasicSanitizer {
    fn sanitize(&self, input: &str) -> Result<String> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | '"' | '\'' | '`'))
            .collect();

        let len = cleaned.chars().count();
        if len > self.max_len {
            return Err(GeoError::validation(format!(
                "Input is too long ({len} characters, at most {} allowed)",
                self.max_len
            )));
        }
        Ok(cleaned)
    }
}
