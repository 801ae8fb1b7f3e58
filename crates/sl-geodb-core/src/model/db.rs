// crates/sl-geodb-core/src/model/db.rs
use super::convert::build_hierarchy;
use super::flat::FlatRecord;
use super::nested::{Chiefdom, District, NodeRef, Region, Town};
use super::LocationKind;
use crate::common::DbStats;
use crate::error::Result;
use crate::text::normalize;
use crate::traits::NameMatch;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// The loaded dataset: the source rows plus the tree built from them.
///
/// Immutable once built. Name arguments of the lookup helpers are compared on
/// their normalized form, so `"port loko"` finds `"PORT LOKO"`.
///
/// The rows are shared (`Arc`) with the search engine built over them.
#[derive(Clone, Debug)]
pub struct GeoDb {
    records: Arc<[FlatRecord]>,
    regions: Vec<Region>,
}

impl GeoDb {
    /// Build the tree for `records`. See [`build_hierarchy`] for failure cases.
    ///
    /// Rows without a region or town are dropped here, so the stored rows,
    /// the tree and any index built over [`GeoDb::shared_records`] agree.
    pub fn from_records(records: Vec<FlatRecord>) -> Result<Self> {
        let total = records.len();
        let records: Vec<FlatRecord> = records
            .into_iter()
            .filter(FlatRecord::has_region_and_town)
            .collect();
        if records.len() < total {
            debug!(dropped = total - records.len(), "dropped rows without region or town");
        }
        let regions = build_hierarchy(&records)?;
        Ok(GeoDb {
            records: records.into(),
            regions,
        })
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    /// A shared handle to the rows.
    pub fn shared_records(&self) -> Arc<[FlatRecord]> {
        Arc::clone(&self.records)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.is_named(name))
    }

    /// Districts of the named region; empty when the region is unknown.
    pub fn districts_of(&self, region: &str) -> &[District] {
        self.find_region(region)
            .map(|r| r.districts())
            .unwrap_or(&[])
    }

    /// Every district in the tree, with its region.
    pub fn iter_districts(&self) -> impl Iterator<Item = (&District, &Region)> {
        self.regions
            .iter()
            .flat_map(|r| r.districts.iter().map(move |d| (d, r)))
    }

    /// Every chiefdom in the tree, with its district.
    pub fn iter_chiefdoms(&self) -> impl Iterator<Item = (&Chiefdom, &District)> {
        self.iter_districts()
            .flat_map(|(d, _)| d.chiefdoms.iter().map(move |c| (c, d)))
    }

    /// Iterate over all towns in the tree.
    pub fn iter_towns(&self) -> impl Iterator<Item = &Town> {
        self.iter_chiefdoms().flat_map(|(c, _)| c.towns.iter())
    }

    /// Chiefdoms of every district with the given name.
    pub fn chiefdoms_of(&self, district: &str) -> Vec<&Chiefdom> {
        self.iter_districts()
            .filter(|(d, _)| d.is_named(district))
            .flat_map(|(d, _)| d.chiefdoms.iter())
            .collect()
    }

    /// Towns of every chiefdom with the given name.
    pub fn towns_of(&self, chiefdom: &str) -> Vec<&Town> {
        self.iter_chiefdoms()
            .filter(|(c, _)| c.is_named(chiefdom))
            .flat_map(|(c, _)| c.towns.iter())
            .collect()
    }

    /// Distinct councils recorded for a district.
    pub fn councils_of(&self, district: &str) -> Vec<&str> {
        let district = normalize(district);
        self.distinct_names(LocationKind::Council, |r| normalize(&r.district) == district)
    }

    /// Distinct sections recorded for a chiefdom.
    pub fn sections_of(&self, chiefdom: &str) -> Vec<&str> {
        let chiefdom = normalize(chiefdom);
        self.distinct_names(LocationKind::Section, |r| normalize(&r.chiefdom) == chiefdom)
    }

    /// Distinct names of one kind across the whole dataset.
    pub fn names_of(&self, kind: LocationKind) -> Vec<&str> {
        self.distinct_names(kind, |_| true)
    }

    /// Distinct non-empty names of `kind` among the records accepted by
    /// `scope`, in first-seen order. Names are deduplicated on normalized form.
    pub fn distinct_names<F>(&self, kind: LocationKind, scope: F) -> Vec<&str>
    where
        F: Fn(&FlatRecord) -> bool,
    {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| scope(*r))
            .map(|r| r.field(kind).trim())
            .filter(|name| {
                let key = normalize(name);
                !key.is_empty() && seen.insert(key)
            })
            .collect()
    }

    /// Find a tree node by its generated code (case-insensitive).
    ///
    /// Codes are shared by equally named nodes; the first in tree order wins.
    pub fn find_by_code(&self, code: &str) -> Option<NodeRef<'_>> {
        let code = code.trim();
        let hit = |c: &str| c.eq_ignore_ascii_case(code);

        for region in &self.regions {
            if hit(region.code()) {
                return Some(NodeRef::Region(region));
            }
            for district in region.districts() {
                if hit(district.code()) {
                    return Some(NodeRef::District(district));
                }
                for chiefdom in district.chiefdoms() {
                    if hit(chiefdom.code()) {
                        return Some(NodeRef::Chiefdom(chiefdom));
                    }
                    if let Some(town) = chiefdom.towns().iter().find(|t| hit(t.code())) {
                        return Some(NodeRef::Town(town));
                    }
                }
            }
        }
        None
    }

    /// Aggregate statistics for the database.
    pub fn stats(&self) -> DbStats {
        DbStats {
            records: self.records.len(),
            regions: self.names_of(LocationKind::Region).len(),
            districts: self.names_of(LocationKind::District).len(),
            councils: self.names_of(LocationKind::Council).len(),
            chiefdoms: self.names_of(LocationKind::Chiefdom).len(),
            sections: self.names_of(LocationKind::Section).len(),
            towns: self.iter_towns().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> GeoDb {
        GeoDb::from_records(vec![
            FlatRecord::new("SOUTHERN", "BO", "BO CITY COUNCIL", "KAKUA", "SEWAMA", "BO TOWN"),
            FlatRecord::new("SOUTHERN", "BO", "BO DISTRICT COUNCIL", "BADJIA", "NGELEHUN", "NGELEHUN"),
            FlatRecord::new("SOUTHERN", "BO", "BO CITY COUNCIL", "KAKUA", "SAMAMIE", "SAMAMIE"),
            FlatRecord::new("EASTERN", "KENEMA", "KENEMA CITY COUNCIL", "NONGOWA", "", "KENEMA"),
        ])
        .unwrap()
    }

    #[test]
    fn navigation_by_name() {
        let db = db();
        assert_eq!(db.districts_of("southern").len(), 1);
        assert!(db.districts_of("NOWHERE").is_empty());
        assert_eq!(db.chiefdoms_of("Bo").len(), 2);
        assert_eq!(db.towns_of("kakua").len(), 2);
        assert_eq!(db.councils_of("BO"), vec!["BO CITY COUNCIL", "BO DISTRICT COUNCIL"]);
        assert_eq!(db.sections_of("KAKUA"), vec!["SEWAMA", "SAMAMIE"]);
    }

    #[test]
    fn code_lookup() {
        let db = db();
        let node = db.find_by_code("sl-chiefdom-nongowa").unwrap();
        assert_eq!(node.kind(), LocationKind::Chiefdom);
        assert_eq!(node.name(), "NONGOWA");
        assert!(db.find_by_code("SL-TOWN-NOPE").is_none());
    }

    #[test]
    fn rows_without_region_or_town_are_not_stored() {
        let db = GeoDb::from_records(vec![
            FlatRecord::new("SOUTHERN", "BO", "", "KAKUA", "", "BO"),
            FlatRecord::new("", "GHOST", "", "", "", ""),
            FlatRecord::new("SOUTHERN", "PHANTOM", "", "", "", " "),
        ])
        .unwrap();

        assert_eq!(db.records().len(), 1);
        assert!(db.names_of(LocationKind::District).iter().all(|d| *d == "BO"));
        let stats = db.stats();
        assert_eq!((stats.records, stats.districts, stats.towns), (1, 1, 1));
    }

    #[test]
    fn stats_count_distinct_levels() {
        let stats = db().stats();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.regions, 2);
        assert_eq!(stats.districts, 2);
        assert_eq!(stats.councils, 3);
        assert_eq!(stats.chiefdoms, 3);
        assert_eq!(stats.sections, 3);
        assert_eq!(stats.towns, 4);
    }
}
