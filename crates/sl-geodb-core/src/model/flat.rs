// crates/sl-geodb-core/src/model/flat.rs
use super::LocationKind;
use crate::text::normalize;
use serde::{Deserialize, Serialize};

/// Separator between levels of a display path.
pub const PATH_SEPARATOR: &str = " > ";

/// One row of the source table.
///
/// Only `region` and `town` are required; the other fields may be empty.
/// Rows carry no identity and duplicates are legal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatRecord {
    pub region: String,
    pub district: String,
    pub council: String,
    pub chiefdom: String,
    pub section: String,
    pub town: String,
}

impl FlatRecord {
    pub fn new(
        region: impl Into<String>,
        district: impl Into<String>,
        council: impl Into<String>,
        chiefdom: impl Into<String>,
        section: impl Into<String>,
        town: impl Into<String>,
    ) -> Self {
        FlatRecord {
            region: region.into(),
            district: district.into(),
            council: council.into(),
            chiefdom: chiefdom.into(),
            section: section.into(),
            town: town.into(),
        }
    }

    /// The raw value stored for `kind`.
    pub fn field(&self, kind: LocationKind) -> &str {
        match kind {
            LocationKind::Region => &self.region,
            LocationKind::District => &self.district,
            LocationKind::Council => &self.council,
            LocationKind::Chiefdom => &self.chiefdom,
            LocationKind::Section => &self.section,
            LocationKind::Town => &self.town,
        }
    }

    /// True when both required fields survive normalization.
    pub fn has_region_and_town(&self) -> bool {
        !normalize(&self.region).is_empty() && !normalize(&self.town).is_empty()
    }

    /// Display path from the region down to the `kind` entity of this row,
    /// e.g. `NORTHERN > TONKOLILI > KHOLIFA MAMUNTHA/MAYOSSO`.
    /// Empty levels are left out.
    pub fn path_to(&self, kind: LocationKind) -> String {
        kind.lineage()
            .iter()
            .map(|k| self.field(*k).trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }
}
