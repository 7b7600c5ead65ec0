//! Criterion micro-benchmarks for pool insertion, access and slot reuse.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hexrealm_core::{Pos, Troop, TroopType};
use hexrealm_pool::{Pool, RefPool};

fn troop(i: i32) -> Troop {
    Troop::new(TroopType::Knight, Pos::new(i % 100, i / 100))
}

/// Benchmark: Fill a pool with 10K troops, then drop every handle.
fn bench_pool_fill_10k(c: &mut Criterion) {
    c.bench_function("pool_fill_10k", |b| {
        b.iter(|| {
            let mut pool = Pool::new();
            let items: Vec<_> = (0..10_000).map(|i| pool.add(troop(i))).collect();
            black_box(pool.count());
            drop(items);
        });
    });
}

/// Benchmark: Delete every other slot and refill the holes.
fn bench_pool_churn_10k(c: &mut Criterion) {
    let mut pool = Pool::new();
    let mut items: Vec<_> = (0..10_000).map(|i| Some(pool.add(troop(i)))).collect();

    c.bench_function("pool_churn_10k", |b| {
        b.iter(|| {
            for slot in items.iter_mut().step_by(2) {
                *slot = None;
            }
            for (i, slot) in items.iter_mut().enumerate().step_by(2) {
                *slot = Some(pool.add(troop(i as i32)));
            }
            black_box(pool.capacity());
        });
    });
}

/// Benchmark: Read hp through 10K item handles.
fn bench_pool_read_10k(c: &mut Criterion) {
    let mut pool = Pool::new();
    let items: Vec<_> = (0..10_000).map(|i| pool.add(troop(i))).collect();

    c.bench_function("pool_read_10k", |b| {
        b.iter(|| {
            let mut total = 0i64;
            for item in &items {
                if let Ok(t) = item.get() {
                    total += i64::from(t.entity.hp);
                }
            }
            black_box(total);
        });
    });
}

/// Benchmark: Clone and drop shares of 1K counted slots.
fn bench_refpool_share_1k(c: &mut Criterion) {
    let mut pool = RefPool::new();
    let shares: Vec<_> = (0..1_000).map(|i| pool.add(i)).collect();

    c.bench_function("refpool_share_1k", |b| {
        b.iter(|| {
            let copies: Vec<_> = shares.iter().cloned().collect();
            black_box(copies.len());
        });
    });
}

criterion_group!(
    benches,
    bench_pool_fill_10k,
    bench_pool_churn_10k,
    bench_pool_read_10k,
    bench_refpool_share_1k
);
criterion_main!(benches);
