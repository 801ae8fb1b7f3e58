//! Index build and query latency over the bundled dataset and over a
//! synthetic table of growing size.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sl_geodb_core::loader::default_dataset_path;
use sl_geodb_core::{
    load_records_from_path, BasicSanitizer, EngineConfig, FlatRecord, InvertedIndex,
    SearchEngine, SearchOptions,
};
use std::hint::black_box;

const SIZES: &[usize] = &[100, 1_000, 10_000];

// ============================================================================
// Data Generators
// ============================================================================

fn bundled_records() -> Vec<FlatRecord> {
    load_records_from_path(default_dataset_path(), &BasicSanitizer::default())
        .expect("bundled dataset loads")
}

/// `n` rows spread over 5 regions, 50 districts and 500 chiefdoms.
fn synthetic_records(n: usize) -> Vec<FlatRecord> {
    (0..n)
        .map(|i| {
            FlatRecord::new(
                format!("REGION {}", i % 5),
                format!("DISTRICT {}", i % 50),
                format!("DISTRICT {} COUNCIL", i % 50),
                format!("CHIEFDOM {}", i % 500),
                format!("SECTION {}", i % 2_000),
                format!("TOWN {i} MAGBASS"),
            )
        })
        .collect()
}

/// Benchmarks query the engine far more often than the default limits allow.
fn unlimited() -> EngineConfig {
    EngineConfig::builder()
        .autocomplete_rate(usize::MAX, 60_000)
        .search_rate(usize::MAX, 60_000)
        .build()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for &n in SIZES {
        let records = synthetic_records(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &records, |b, records| {
            b.iter(|| InvertedIndex::build(black_box(records)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::from_records(bundled_records(), unlimited());
    let options = SearchOptions::default();
    let mut group = c.benchmark_group("search");

    for query in ["bo", "kholifa", "magbas", "tonkollili"] {
        group.bench_with_input(BenchmarkId::new("cold", query), query, |b, q| {
            b.iter(|| {
                engine.clear_cache();
                engine.search(black_box(q), &options, "bench")
            })
        });
        group.bench_with_input(BenchmarkId::new("cached", query), query, |b, q| {
            b.iter(|| engine.search(black_box(q), &options, "bench"))
        });
    }
    group.finish();
}

fn bench_autocomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("autocomplete");
    for &n in SIZES {
        let engine = SearchEngine::from_records(synthetic_records(n), unlimited());
        group.bench_with_input(BenchmarkId::from_parameter(n), &engine, |b, engine| {
            b.iter(|| {
                engine.clear_cache();
                engine.autocomplete(black_box("town 1"), "bench", 10)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index_build, bench_search, bench_autocomplete);
criterion_main!(benches);
