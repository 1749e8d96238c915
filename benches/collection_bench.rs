//! Benchmark for strict collections.
//!
//! Compares IndexedCollection and KeyedCollection against Vec and HashMap for
//! the common operations.

use std::collections::HashMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use strict_collections::prelude::*;

// =============================================================================
// set Benchmark
// =============================================================================

fn benchmark_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("KeyedCollection", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = KeyedCollection::new();
                    for key in 0..size {
                        map.set(black_box(key), key).unwrap();
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = HashMap::new();
                for key in 0..size {
                    map.insert(black_box(key), key);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let keyed = KeyedCollection::from_entries((0..size).map(|key| (key, key))).unwrap();
        let indexed = IndexedCollection::from_values(0..size).unwrap();

        group.bench_with_input(
            BenchmarkId::new("KeyedCollection", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_u64;
                    for key in 0..size {
                        sum += keyed.try_get(black_box(&key), 0);
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("IndexedCollection", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_u64;
                    for index in 0..size as usize {
                        sum += indexed.try_get(black_box(&index), 0);
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// concat Benchmark
// =============================================================================

fn benchmark_concat(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat");

    for size in [100, 1000, 10000] {
        let left = IndexedCollection::from_values(0..size).unwrap();
        let right = IndexedCollection::from_values(0..size).unwrap();

        group.bench_with_input(
            BenchmarkId::new("IndexedCollection", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let mut merged = left.clone();
                    merged.concat(black_box(&right)).unwrap();
                    black_box(merged)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// sort Benchmark
// =============================================================================

fn benchmark_sort(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sort");

    for size in [100_u64, 1000, 10000] {
        let values: Vec<u64> = (0..size).map(|index| (index * 7919) % size).collect();
        let collection = IndexedCollection::from_values(values.clone()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("IndexedCollection", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(collection.sorted().unwrap()));
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut sorted = values.clone();
                sorted.sort();
                black_box(sorted)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_set,
    benchmark_get,
    benchmark_concat,
    benchmark_sort
);
criterion_main!(benches);
