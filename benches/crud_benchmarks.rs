use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use navi_tree::{Avl, NaviTreeMap, RedBlack};
use std::collections::BTreeMap;

const N: usize = 10_000;

type RbMap = NaviTreeMap<i64, i64, RedBlack>;
type AvlMap = NaviTreeMap<i64, i64, Avl>;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_with(group_name: &str, c: &mut Criterion, keys: &[i64]) {
    let mut group = c.benchmark_group(group_name);

    group.bench_function(BenchmarkId::new("NaviTreeMap/red_black", N), |b| {
        b.iter(|| {
            let mut map = RbMap::new();
            for &k in keys {
                map.put(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("NaviTreeMap/avl", N), |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for &k in keys {
                map.put(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert_with("map_insert_ordered", c, &ordered_keys(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert_with("map_insert_reverse", c, &reverse_ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert_with("map_insert_random", c, &random_keys(N));
}

// ─── Get Benchmarks ─────────────────────────────────────────────────────────

fn bench_get_with(group_name: &str, c: &mut Criterion, lookup_keys: &[i64]) {
    let keys = ordered_keys(N);
    let rb_map: RbMap = keys.iter().map(|&k| (k, k)).collect();
    let avl_map: AvlMap = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group(group_name);

    group.bench_function(BenchmarkId::new("NaviTreeMap/red_black", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in lookup_keys {
                sum = sum.wrapping_add(rb_map.get(&k));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("NaviTreeMap/avl", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in lookup_keys {
                sum = sum.wrapping_add(avl_map.get(&k));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in lookup_keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_get_ordered(c: &mut Criterion) {
    bench_get_with("map_get_ordered", c, &ordered_keys(N));
}

fn bench_get_reverse(c: &mut Criterion) {
    bench_get_with("map_get_reverse", c, &reverse_ordered_keys(N));
}

fn bench_get_random(c: &mut Criterion) {
    // Random probes miss most of the time against the ordered key set.
    bench_get_with("map_get_random", c, &random_keys(N));
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_with(group_name: &str, c: &mut Criterion, removal_keys: &[i64]) {
    let keys = ordered_keys(N);

    let mut group = c.benchmark_group(group_name);

    group.bench_function(BenchmarkId::new("NaviTreeMap/red_black", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<RbMap>(),
            |mut map| {
                for &k in removal_keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("NaviTreeMap/avl", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<AvlMap>(),
            |mut map| {
                for &k in removal_keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for &k in removal_keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_ordered(c: &mut Criterion) {
    bench_remove_with("map_remove_ordered", c, &ordered_keys(N));
}

fn bench_remove_reverse(c: &mut Criterion) {
    bench_remove_with("map_remove_reverse", c, &reverse_ordered_keys(N));
}

fn bench_remove_random(c: &mut Criterion) {
    bench_remove_with("map_remove_random", c, &random_keys(N));
}

// ─── Navigation Benchmarks ──────────────────────────────────────────────────

fn bench_floor_random(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let rb_map: RbMap = keys.iter().map(|&k| (k, k)).collect();
    let avl_map: AvlMap = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let probes = random_keys(N);

    let mut group = c.benchmark_group("map_floor_random");

    group.bench_function(BenchmarkId::new("NaviTreeMap/red_black", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &probes {
                sum = sum.wrapping_add(rb_map.floor_key(&k));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("NaviTreeMap/avl", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &probes {
                sum = sum.wrapping_add(avl_map.floor_key(&k));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &probes {
                if let Some((&found, _)) = bt_map.range(..=k).next_back() {
                    sum = sum.wrapping_add(found);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RbMap = keys.iter().map(|&k| (k, k)).collect();
    let avl_map: AvlMap = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iterate");

    group.bench_function(BenchmarkId::new("NaviTreeMap/red_black", N), |b| {
        b.iter(|| rb_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("NaviTreeMap/avl", N), |b| {
        b.iter(|| avl_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(map_get_benches, bench_get_ordered, bench_get_reverse, bench_get_random,);

criterion_group!(map_remove_benches, bench_remove_ordered, bench_remove_reverse, bench_remove_random,);

criterion_group!(map_navigation_benches, bench_floor_random, bench_iterate,);

criterion_main!(map_insert_benches, map_get_benches, map_remove_benches, map_navigation_benches,);
