// crates/sl-geodb-core/src/model/convert.rs
use super::flat::FlatRecord;
use super::nested::{Chiefdom, District, Region, Town};
use super::LocationKind;
use crate::error::{GeoError, Result};
use crate::text::normalize;
use std::collections::HashMap;
use tracing::{debug, info};

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

/// **Flat -> Nested Converter.**
///
/// Walks `records` in order, creating each region, district and chiefdom the
/// first time its (normalized) key path is seen, and appending one town per
/// record. Rows without a region or town are skipped.
///
/// Fails with [`GeoError::Format`] when no row produced a town.
pub fn build_hierarchy(records: &[FlatRecord]) -> Result<Vec<Region>> {
    let mut regions: Vec<Region> = Vec::new();

    // Position of each node inside its parent's child vector.
    let mut region_ix: HashMap<String, usize> = HashMap::new();
    let mut district_ix: HashMap<(String, String), usize> = HashMap::new();
    let mut chiefdom_ix: HashMap<(String, String, String), usize> = HashMap::new();

    let mut towns = 0usize;
    let mut skipped = 0usize;

    for (row, record) in records.iter().enumerate() {
        let r_key = normalize(&record.region);
        if r_key.is_empty() || normalize(&record.town).is_empty() {
            debug!(row, "skipping record without region or town");
            skipped += 1;
            continue;
        }
        let d_key = normalize(&record.district);
        let c_key = normalize(&record.chiefdom);

        // 1. Region
        let ri = *region_ix.entry(r_key.clone()).or_insert_with(|| {
            regions.push(Region::new(record.region.trim()));
            regions.len() - 1
        });
        let region = &mut regions[ri];

        // 2. District
        let di = *district_ix
            .entry((r_key.clone(), d_key.clone()))
            .or_insert_with(|| {
                region
                    .districts
                    .push(District::new(record.district.trim(), &region.name));
                region.districts.len() - 1
            });
        let district = &mut region.districts[di];

        // 3. Chiefdom
        let ci = *chiefdom_ix
            .entry((r_key, d_key, c_key))
            .or_insert_with(|| {
                district.chiefdoms.push(Chiefdom::new(
                    record.chiefdom.trim(),
                    &district.region,
                    &district.name,
                ));
                district.chiefdoms.len() - 1
            });
        let chiefdom = &mut district.chiefdoms[ci];

        // 4. Town (always appended)
        let name = record.town.trim();
        chiefdom.towns.push(Town {
            name: name.to_owned(),
            code: LocationKind::Town.code_for(name),
            region: chiefdom.region.clone(),
            district: chiefdom.district.clone(),
            chiefdom: chiefdom.name.clone(),
            section: non_empty(&record.section),
            council: non_empty(&record.council),
            population: None,
        });
        towns += 1;
    }

    if towns == 0 {
        return Err(GeoError::Format(format!(
            "no record with both a region and a town ({} rows read)",
            records.len()
        )));
    }

    info!(
        regions = regions.len(),
        towns, skipped, "built location hierarchy"
    );
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, district: &str, chiefdom: &str, town: &str) -> FlatRecord {
        FlatRecord::new(region, district, "", chiefdom, "", town)
    }

    #[test]
    fn groups_levels_and_keeps_duplicate_towns() {
        let records = vec![
            row("SOUTHERN", "BO", "KAKUA", "BO TOWN"),
            row("SOUTHERN", "BO", "KAKUA", "BO TOWN"),
            row("SOUTHERN", "BO", "BADJIA", "NGELEHUN"),
            row("SOUTHERN", "BONTHE", "IMPERRI", "GBAP"),
            row("EASTERN", "KENEMA", "NONGOWA", "KENEMA"),
        ];
        let regions = build_hierarchy(&records).unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name(), "SOUTHERN");
        assert_eq!(regions[0].districts().len(), 2);

        let bo = &regions[0].districts()[0];
        assert_eq!(bo.chiefdoms().len(), 2);
        assert_eq!(bo.chiefdoms()[0].towns().len(), 2);
        assert_eq!(bo.chiefdoms()[0].towns()[0].code(), "SL-TOWN-BO-TOWN");
        assert_eq!(bo.chiefdoms()[0].towns()[0].district, "BO");
    }

    #[test]
    fn same_district_name_in_two_regions_stays_apart() {
        let records = vec![
            row("NORTH", "SHARED", "A", "T1"),
            row("SOUTH", "SHARED", "A", "T2"),
        ];
        let regions = build_hierarchy(&records).unwrap();
        assert_eq!(regions[0].districts()[0].chiefdoms()[0].towns().len(), 1);
        assert_eq!(regions[1].districts()[0].chiefdoms()[0].towns().len(), 1);
        assert_eq!(regions[0].districts()[0].code(), regions[1].districts()[0].code());
    }

    #[test]
    fn optional_attributes_become_none() {
        let records = vec![FlatRecord::new("WESTERN", "WESTERN AREA URBAN", "FREETOWN CITY COUNCIL", "", "", "FREETOWN")];
        let regions = build_hierarchy(&records).unwrap();
        let town = &regions[0].districts()[0].chiefdoms()[0].towns()[0];
        assert_eq!(town.council(), Some("FREETOWN CITY COUNCIL"));
        assert_eq!(town.section(), None);
        assert_eq!(town.population, None);
    }

    #[test]
    fn no_usable_rows_is_a_format_error() {
        assert!(matches!(build_hierarchy(&[]), Err(GeoError::Format(_))));
        let bad = vec![row("", "BO", "KAKUA", "BO TOWN"), row("SOUTHERN", "BO", "KAKUA", "  ")];
        assert!(matches!(build_hierarchy(&bad), Err(GeoError::Format(_))));
    }
}
