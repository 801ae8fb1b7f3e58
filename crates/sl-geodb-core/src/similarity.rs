// crates/sl-geodb-core/src/similarity.rs

//! Closeness score between two names in `[0, 1]`.
//!
//! Scoring order (first match wins):
//! 1. equal normalized forms → `1.0`
//! 2. one normalized form contains the other → [`CONTAINS_SCORE`]
//! 3. `1 - levenshtein / max_len`
//!
//! Containment always dominates the edit-distance branch, so `0.8` is a fixed
//! "contains" signal rather than a graded measure. Thresholds elsewhere in the
//! crate depend on these exact values.

use crate::text::normalize;

/// Score reported when one name contains the other.
pub const CONTAINS_SCORE: f64 = 0.8;

/// Similarity of `a` and `b` after normalization.
///
/// ```rust
/// use sl_geodb_core::similarity::similarity;
///
/// assert_eq!(similarity("Kenema", "KENEMA"), 1.0);
/// assert_eq!(similarity("Bo", "Bo Town"), 0.8);
/// assert!(similarity("Kenema", "Kenama") > 0.8);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    normalized_similarity(&a, &b)
}

/// Same as [`similarity`] for inputs that are already normalized.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return CONTAINS_SCORE;
    }

    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Unit-cost edit distance (insert, delete, substitute) over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != *bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    dp[b_len]
}
