//! End-to-end behaviour through the public API.

mod common;

use common::{bundled_service, magbass_record, service_with};
use sl_geodb_core::text::normalize;
use sl_geodb_core::{
    EngineConfig, GeoError, HierarchyInput, LocationKind, LocationService, SearchOptions,
};
use std::io::Write;
use std::sync::Arc;

fn unlimited() -> EngineConfig {
    EngineConfig::builder()
        .autocomplete_rate(usize::MAX, 60_000)
        .search_rate(usize::MAX, 60_000)
        .build()
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn magbass_exact_and_prefix() {
    let service = LocationService::default();
    service.initialize(vec![magbass_record()]).unwrap();

    let hits = service.search("MAGBASS", &SearchOptions::default(), "s").unwrap();
    assert!(hits.iter().any(|h| h.name.contains("MAGBASS")));

    let hits = service.search("MAG", &SearchOptions::default(), "s").unwrap();
    let partial = hits
        .iter()
        .find(|h| h.name.contains("MAGBASS"))
        .expect("prefix tier finds the town");
    assert!(partial.score >= 0.3);
    assert!(partial.score < 1.0);
    assert_eq!(partial.kind, LocationKind::Town);
}

#[test]
fn every_entity_is_found_by_its_own_name() {
    let service = service_with(unlimited());
    let db = service.db().unwrap();

    for record in db.records() {
        for kind in LocationKind::ALL {
            let name = record.field(kind);
            if normalize(name).is_empty() {
                continue;
            }

            let opts = SearchOptions::default().only(kind);
            let hits = service.search(name, &opts, "sweep").unwrap();
            assert!(
                hits.iter()
                    .any(|h| h.name == name && h.kind == kind && h.score == 1.0),
                "{kind} {name:?} not found by exact search"
            );

            let prefix: String = normalize(name).chars().take(3).collect();
            let prefix = normalize(&prefix);
            if prefix.chars().count() >= 2 {
                let names = service.autocomplete(&prefix, "sweep", 1_000).unwrap();
                assert!(
                    names.iter().any(|n| n == name),
                    "{name:?} missing from autocomplete({prefix:?})"
                );
            }
        }
    }
}

#[test]
fn search_respects_kind_filter_and_limit() {
    let service = bundled_service();
    let opts = SearchOptions::default()
        .kinds([LocationKind::Chiefdom])
        .limit(3);
    let hits = service.search("kholifa", &opts, "k").unwrap();
    assert!(!hits.is_empty() && hits.len() <= 3);
    assert!(hits.iter().all(|h| h.kind == LocationKind::Chiefdom));
    assert!(hits.iter().all(|h| h.full_path.starts_with("NORTHERN > TONKOLILI > ")));
}

#[test]
fn suggestions_complete_prefixes() {
    let service = bundled_service();
    let towns = service.suggestions("mag", Some(LocationKind::Town), 10).unwrap();
    assert_eq!(towns, vec!["MAGBASS (KHOLIFA MAMUNTHA/MAYOSSO)", "MAGBURAKA"]);
    assert!(service.suggestions("m", None, 10).unwrap().is_empty());
}

// ============================================================================
// RATE LIMITING
// ============================================================================

#[test]
fn fifty_first_autocomplete_is_rejected() {
    let service = bundled_service();
    for _ in 0..50 {
        service.autocomplete("kenema", "client-1", 5).unwrap();
    }
    let err = service.autocomplete("kenema", "client-1", 5).unwrap_err();
    assert!(err.is_rate_limit());
    assert!(err.to_string().contains("client-1"));

    // other clients keep their own budget
    assert!(service.autocomplete("kenema", "client-2", 5).is_ok());
}

#[test]
fn search_has_its_own_budget() {
    let service = bundled_service();
    for _ in 0..30 {
        service.search("bo", &SearchOptions::default(), "c").unwrap();
    }
    assert!(matches!(
        service.search("bo", &SearchOptions::default(), "c"),
        Err(GeoError::RateLimit { max_requests: 30, .. })
    ));
    assert!(service.autocomplete("bo", "c", 5).is_ok());
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn district_in_the_wrong_region() {
    let service = bundled_service();
    let validator = service.validator().unwrap();

    let out = validator.is_valid_district("TONKOLILI", Some("SOUTHERN"));
    assert!(!out.is_valid);
    assert!(out.message.unwrap().contains("TONKOLILI"));
    assert!(out.suggestions.contains(&"TONKOLILI".to_string()));
    assert!(out.suggestions.len() <= 3);

    assert!(validator.is_valid_district("tonkolili", Some("northern")).is_valid);
}

#[test]
fn full_address_validates() {
    let service = bundled_service();
    let input = HierarchyInput::new()
        .region("Southern")
        .district("Bo")
        .council("Bo City Council")
        .chiefdom("Kakua")
        .section("Sewama")
        .town("Bo");
    service.validate_hierarchy(&input).unwrap();
}

#[test]
fn aggregated_failures_carry_suggestions() {
    let service = bundled_service();
    let input = HierarchyInput::new()
        .region("Eastern")
        .district("Kenema")
        .chiefdom("Nangowa")
        .town("");
    let err = service.validate_hierarchy(&input).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Chiefdom 'Nangowa' not found in district 'Kenema'; Town is required"
    );
    assert!(err.suggestions().contains(&"NONGOWA".to_string()));
}

#[test]
fn outcome_converts_to_error() {
    let service = bundled_service();
    let validator = service.validator().unwrap();
    assert!(validator.is_valid_region("Western Area").into_result().is_ok());
    let err = validator.is_valid_region("Atlantis").into_result().unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// NAVIGATION & LOADING
// ============================================================================

#[test]
fn navigation_over_bundled_data() {
    let service = bundled_service();
    let db = service.db().unwrap();

    assert_eq!(db.regions().len(), 5);
    let northern: Vec<_> = db.districts_of("northern").iter().map(|d| d.name()).collect();
    assert_eq!(northern, vec!["TONKOLILI", "BOMBALI", "KOINADUGU", "FALABA"]);
    assert_eq!(db.chiefdoms_of("Tonkolili").len(), 5);

    let towns: Vec<_> = db.towns_of("kakua").iter().map(|t| t.name()).collect();
    assert_eq!(towns, vec!["BO", "SAMAMIE"]);

    let node = db.find_by_code("SL-DISTRICT-PORT-LOKO").unwrap();
    assert_eq!(node.name(), "PORT LOKO");

    let stats = service.stats().unwrap();
    assert_eq!(stats.records, 56);
    assert_eq!(stats.regions, 5);
    assert_eq!(stats.districts, 16);
    assert_eq!(stats.towns, 56);
}

#[cfg(feature = "compact")]
#[test]
fn loads_gzip_csv() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let path = std::env::temp_dir().join(format!("sl-geodb-{}.csv.gz", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    let mut gz = GzEncoder::new(file, Compression::default());
    gz.write_all(b"region,district,chiefdom,town\nSOUTHERN,BO,KAKUA,BO\n")
        .unwrap();
    gz.finish().unwrap();

    let service = LocationService::default();
    let loaded = service.initialize_from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.db().records().len(), 1);
}

#[test]
fn config_file_drives_limits() {
    let path = std::env::temp_dir().join(format!("sl-geodb-cfg-{}.json", std::process::id()));
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, r#"{{ "autocomplete_rate": {{ "max_requests": 2, "window_ms": 60000 }} }}"#)
        .unwrap();
    drop(f);

    let config = EngineConfig::from_json_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let service = service_with(config);
    assert!(service.autocomplete("bo", "x", 5).is_ok());
    assert!(service.autocomplete("bo", "x", 5).is_ok());
    assert!(service.autocomplete("bo", "x", 5).unwrap_err().is_rate_limit());
}

#[test]
fn shared_across_threads() {
    let service = Arc::new(service_with(unlimited()));
    std::thread::scope(|s| {
        for t in 0..4 {
            let service = Arc::clone(&service);
            s.spawn(move || {
                let client = format!("thread-{t}");
                for q in ["bo", "kenema", "port loko", "makeni", "kailahun"] {
                    let hits = service.search(q, &SearchOptions::default(), &client).unwrap();
                    assert!(!hits.is_empty());
                }
            });
        }
    });
    service.search("bo", &SearchOptions::default(), "main").unwrap();
    assert!(service.engine().unwrap().cache_stats().hits > 0);
}
