// crates/sl-geodb-core/src/text.rs

//! # Text Normalization
//!
//! Every comparison in the crate (index keys, similarity, validation) runs on
//! the *normalized form* produced by [`normalize`]. The derived helpers
//! ([`significant_words`], [`phonetic_key`], [`code_fragment`]) all expect
//! their input to be normalized already, except `code_fragment`, which
//! normalizes itself.

/// Maximum length of a phonetic key.
pub const PHONETIC_KEY_LEN: usize = 6;

/// Words shorter than this are never used as secondary index keys.
pub const MIN_SIGNIFICANT_WORD_LEN: usize = 3;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Kénéma` -> `Kenema`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use sl_geodb_core::text::fold_key;
///
/// assert_eq!(fold_key("Kénéma"), "kenema");
/// assert_eq!(fold_key("PORT LOKO"), "port loko");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Canonicalize a string for comparison.
///
/// The result is lower-case ASCII containing only word characters
/// (`[a-z0-9_]`), hyphens and single spaces, without leading or trailing
/// whitespace. Characters outside that set are removed in place, so
/// `"KHOLIFA MAMUNTHA/MAYOSSO"` becomes `"kholifa mamunthamayosso"`.
///
/// The function is total and idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// ```rust
/// use sl_geodb_core::text::normalize;
///
/// assert_eq!(normalize("  MAGBASS (KHOLIFA  MAMUNTHA/MAYOSSO) "), "magbass kholifa mamunthamayosso");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> String {
    let folded = fold_key(s);
    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;

    for ch in folded.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    out
}

/// Compares two strings for equality after normalization.
///
/// ```rust
/// use sl_geodb_core::text::equals_normalized;
///
/// assert!(equals_normalized("Western Area Urban", "  western   area urban"));
/// assert!(!equals_normalized("Bo", "Bonthe"));
/// ```
pub fn equals_normalized(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Words of a normalized string that are long enough to act as index keys.
pub fn significant_words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(' ')
        .filter(|w| w.chars().count() >= MIN_SIGNIFICANT_WORD_LEN)
}

/// Coarse sound-alike key of a normalized string.
///
/// Vowels are removed, runs of the same character collapse to one, and the
/// result is cut to [`PHONETIC_KEY_LEN`] characters:
/// `"magbass"` → `"mgbss"` → `"mgbs"`.
pub fn phonetic_key(normalized: &str) -> String {
    let mut key = String::with_capacity(PHONETIC_KEY_LEN);
    let mut last: Option<char> = None;
    let mut taken = 0;

    for ch in normalized
        .chars()
        .filter(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
    {
        if last == Some(ch) {
            continue;
        }
        last = Some(ch);
        key.push(ch);
        taken += 1;
        if taken == PHONETIC_KEY_LEN {
            break;
        }
    }
    key
}

/// Upper-case alphanumeric rendering of a name used inside location codes.
///
/// Runs of anything that is not `[A-Z0-9]` become a single `-`.
///
/// ```rust
/// use sl_geodb_core::text::code_fragment;
///
/// assert_eq!(code_fragment("Kholifa Mamuntha/Mayosso"), "KHOLIFA-MAMUNTHAMAYOSSO");
/// assert_eq!(code_fragment("Western Area Rural"), "WESTERN-AREA-RURAL");
/// ```
pub fn code_fragment(name: &str) -> String {
    let upper = normalize(name).to_ascii_uppercase();
    let mut out = String::with_capacity(upper.len());
    let mut dash = false;

    for ch in upper.chars() {
        if ch.is_ascii_alphanumeric() {
            if dash && !out.is_empty() {
                out.push('-');
            }
            dash = false;
            out.push(ch);
        } else {
            dash = true;
        }
    }
    out
}
