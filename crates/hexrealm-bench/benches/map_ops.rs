//! Criterion micro-benchmarks for region enumeration and area search.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hexrealm_bench::campaign_profile;
use hexrealm_core::Pos;
use hexrealm_map::Spread;

/// Benchmark: Rebuild every region of a 128x96 board.
fn bench_enumerate_regions_campaign(c: &mut Criterion) {
    let mut map = campaign_profile();

    c.bench_function("enumerate_regions_campaign", |b| {
        b.iter(|| {
            map.enumerate_regions();
            black_box(map.region_count());
        });
    });
}

/// Benchmark: Radius-5 spread over solid tiles.
fn bench_spread_radius_5(c: &mut Criterion) {
    let map = campaign_profile();
    let spread = Spread::solid();

    c.bench_function("spread_radius_5", |b| {
        b.iter(|| {
            let found = spread.collect(&map, Pos::new(64, 47), 5);
            black_box(found.len());
        });
    });
}

/// Benchmark: Unbounded flood of one team band.
fn bench_spread_flood_band(c: &mut Criterion) {
    let map = campaign_profile();
    let start = Pos::new(1, 1);
    let team = map.at(start).map(|h| h.team).unwrap_or_default();
    let spread = Spread::new().hop(move |_, h| h.team == team);

    c.bench_function("spread_flood_band", |b| {
        b.iter(|| {
            let found = spread.collect(&map, start, Spread::UNBOUNDED);
            black_box(found.len());
        });
    });
}

/// Benchmark: Cross-check region counters against the tiles.
fn bench_check_regions_campaign(c: &mut Criterion) {
    let map = campaign_profile();

    c.bench_function("check_regions_campaign", |b| {
        b.iter(|| {
            black_box(map.check_regions().is_ok());
        });
    });
}

criterion_group!(
    benches,
    bench_enumerate_regions_campaign,
    bench_spread_radius_5,
    bench_spread_flood_band,
    bench_check_regions_campaign
);
criterion_main!(benches);
