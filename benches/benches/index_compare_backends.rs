// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use planar_index::{Coord, Envelope, KdTree, Quadtree, StrTree};

fn gen_grid_envs(n: usize, cell: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Envelope::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_envs(count: usize, extent: f64, size: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * extent;
        let y0 = rng.next_f64() * extent;
        out.push(Envelope::new(x0, y0, x0 + size, y0 + size));
    }
    out
}

fn gen_clustered_envs(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Envelope::new(x0, y0, x0 + 12.0, y0 + 12.0));
        }
    }
    out
}

fn bench_strtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree");
    for &n in &[32usize, 64, 128] {
        let envs = gen_grid_envs(n, 10.0);
        let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("build_query_n{}", n), |b| {
            b.iter_batched(
                || envs.iter().copied().enumerate().map(|(i, e)| (e, i)).collect::<Vec<_>>(),
                |items| {
                    let tree = StrTree::build(items);
                    let hits = tree.query(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let envs = gen_clustered_envs(16, 256, 128.0);
    group.bench_function("build_query_clustered", |b| {
        b.iter_batched(
            || envs.iter().copied().enumerate().map(|(i, e)| (e, i)).collect::<Vec<_>>(),
            |items| {
                let tree = StrTree::build(items);
                let hits = tree.query(&Envelope::new(800.0, 800.0, 1200.0, 1200.0)).len();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    for &n in &[32usize, 64, 128] {
        let envs = gen_grid_envs(n, 10.0);
        let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_n{}", n), |b| {
            b.iter_batched(
                Quadtree::<usize>::new,
                |mut tree| {
                    for (i, e) in envs.iter().copied().enumerate() {
                        tree.insert(e, i);
                    }
                    let hits = tree.query(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let envs = gen_random_envs(4096, 2000.0, 12.0);
    group.bench_function("insert_query_random", |b| {
        b.iter_batched(
            Quadtree::<usize>::new,
            |mut tree| {
                for (i, e) in envs.iter().copied().enumerate() {
                    tree.insert(e, i);
                }
                let hits = tree.query(&Envelope::new(800.0, 800.0, 1200.0, 1200.0)).len();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_kdtree_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree");
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let points: Vec<Coord> = (0..8192)
        .map(|_| Coord::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("insert_snap_8192", |b| {
        b.iter_batched(
            || KdTree::new(0.5),
            |mut tree| {
                for p in &points {
                    black_box(tree.insert(*p));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_strtree, bench_quadtree, bench_kdtree_snap);
criterion_main!(benches);
