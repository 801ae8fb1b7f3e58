// crates/sl-geodb-core/src/traits.rs
use crate::model::{Chiefdom, District, NodeRef, Region, Town};
use crate::text::normalize;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes case- and punctuation-insensitive comparisons based
/// on [`normalize`]. Implementors provide a `&str` view of their canonical
/// name via [`NameMatch::name_str`] and get [`NameMatch::is_named`].
///
/// # Examples
/// ```rust
/// use sl_geodb_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("KHOLIFA MAMUNTHA/MAYOSSO").is_named("kholifa mamunthamayosso"));
/// assert!(!Place("Port Loko").is_named("LOKO"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Returns `true` if `q` equals the canonical name after normalization.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        normalize(self.name_str()) == normalize(q)
    }
}

impl NameMatch for Region {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for District {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for Chiefdom {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for Town {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for NodeRef<'_> {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for str {
    #[inline]
    fn name_str(&self) -> &str {
        self
    }
}
