// crates/sl-geodb-core/src/model/kind.rs
use crate::error::GeoError;
use crate::text::code_fragment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a generated location code.
pub const MAX_CODE_LEN: usize = 50;

/// The six kinds of named location carried by a record.
///
/// Region, district, chiefdom and town form the owned tree; council and
/// section are attributes of each record that are still searchable and
/// validated on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Region,
    District,
    Council,
    Chiefdom,
    Section,
    Town,
}

impl LocationKind {
    pub const ALL: [LocationKind; 6] = [
        LocationKind::Region,
        LocationKind::District,
        LocationKind::Council,
        LocationKind::Chiefdom,
        LocationKind::Section,
        LocationKind::Town,
    ];

    /// Lower-case tag, as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Region => "region",
            LocationKind::District => "district",
            LocationKind::Council => "council",
            LocationKind::Chiefdom => "chiefdom",
            LocationKind::Section => "section",
            LocationKind::Town => "town",
        }
    }

    /// Capitalized label for human-readable messages.
    pub fn label(self) -> &'static str {
        match self {
            LocationKind::Region => "Region",
            LocationKind::District => "District",
            LocationKind::Council => "Council",
            LocationKind::Chiefdom => "Chiefdom",
            LocationKind::Section => "Section",
            LocationKind::Town => "Town",
        }
    }

    /// Upper-case tag embedded in location codes.
    pub fn code_tag(self) -> &'static str {
        match self {
            LocationKind::Region => "REGION",
            LocationKind::District => "DISTRICT",
            LocationKind::Council => "COUNCIL",
            LocationKind::Chiefdom => "CHIEFDOM",
            LocationKind::Section => "SECTION",
            LocationKind::Town => "TOWN",
        }
    }

    /// Kinds that make up the display path of an entity of this kind, root first.
    pub fn lineage(self) -> &'static [LocationKind] {
        use LocationKind::*;
        match self {
            Region => &[Region],
            District => &[Region, District],
            Council => &[Region, District, Council],
            Chiefdom => &[Region, District, Chiefdom],
            Section => &[Region, District, Chiefdom, Section],
            Town => &[Region, District, Chiefdom, Town],
        }
    }

    /// Stable code for a name of this kind: `SL-<KIND>-<NAME>`, at most
    /// [`MAX_CODE_LEN`] characters.
    ///
    /// ```rust
    /// use sl_geodb_core::LocationKind;
    ///
    /// assert_eq!(LocationKind::District.code_for("Port Loko"), "SL-DISTRICT-PORT-LOKO");
    /// ```
    pub fn code_for(self, name: &str) -> String {
        let mut code = format!("SL-{}-{}", self.code_tag(), code_fragment(name));
        // codes are pure ASCII, byte truncation is char-safe
        code.truncate(MAX_CODE_LEN);
        code
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" | "province" => Ok(LocationKind::Region),
            "district" => Ok(LocationKind::District),
            "council" => Ok(LocationKind::Council),
            "chiefdom" => Ok(LocationKind::Chiefdom),
            "section" => Ok(LocationKind::Section),
            "town" | "village" => Ok(LocationKind::Town),
            other => Err(GeoError::validation(format!(
                "Unknown location type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("PROVINCE".parse::<LocationKind>().unwrap(), LocationKind::Region);
        assert_eq!(" Chiefdom ".parse::<LocationKind>().unwrap(), LocationKind::Chiefdom);
        assert!("county".parse::<LocationKind>().is_err());
    }

    #[test]
    fn code_is_deterministic_and_bounded() {
        let long = "A Very Long Town Name That Keeps Going And Going Forever";
        let code = LocationKind::Town.code_for(long);
        assert_eq!(code.len(), MAX_CODE_LEN);
        assert!(code.starts_with("SL-TOWN-A-VERY-LONG"));
        assert_eq!(code, LocationKind::Town.code_for(long));
    }

    #[test]
    fn same_name_different_kind_gives_different_code() {
        assert_ne!(
            LocationKind::District.code_for("Bo"),
            LocationKind::Town.code_for("Bo")
        );
    }
}
