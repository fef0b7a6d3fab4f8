// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use planar_index::Coord;
use planar_noding::{Noder, Segment};
use planar_overlay::{CascadedUnion, Polygon, Ring, union_polygons};

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::from_shell(Ring::new(vec![
        Coord::new(x0, y0),
        Coord::new(x0 + side, y0),
        Coord::new(x0 + side, y0 + side),
        Coord::new(x0, y0 + side),
    ]))
}

/// An n-by-n grid of squares, each overlapping its neighbours.
fn gen_overlapping_grid(n: usize, pitch: f64, side: f64) -> Vec<Polygon> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(square(x as f64 * pitch, y as f64 * pitch, side));
        }
    }
    out
}

fn gen_fan_segments(spokes: usize) -> Vec<Segment> {
    // Chords of a convex polygon; every pair crosses near the centre.
    let mut out = Vec::with_capacity(spokes);
    for i in 0..spokes {
        let t = i as f64 / spokes as f64;
        let x = -500.0 + 1000.0 * t;
        out.push(Segment::new(Coord::new(x, -500.0), Coord::new(-x, 500.0)));
    }
    out
}

fn bench_noder(c: &mut Criterion) {
    let mut group = c.benchmark_group("noder");
    for &spokes in &[64usize, 256] {
        let segments = gen_fan_segments(spokes);
        group.throughput(Throughput::Elements(spokes as u64));
        group.bench_function(format!("fan_{}", spokes), |b| {
            b.iter(|| {
                let noded = Noder::new(0.0).node(black_box(&segments)).unwrap();
                black_box(noded.len());
            })
        });
    }
    group.finish();
}

fn bench_pairwise_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_union");
    let a = square(0.0, 0.0, 100.0);
    let b = square(50.0, 50.0, 100.0);
    group.bench_function("two_squares", |bench| {
        bench.iter(|| {
            let g = union_polygons(black_box(&a), black_box(&b), 0.0).unwrap();
            black_box(g.area());
        })
    });
    group.finish();
}

fn bench_cascaded_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascaded_union");
    for &n in &[8usize, 16] {
        let polys = gen_overlapping_grid(n, 10.0, 12.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("overlapping_grid_n{}", n), |b| {
            b.iter_batched(
                || polys.clone(),
                |polys| {
                    let g = CascadedUnion::new(0.0).union(&polys).unwrap();
                    black_box(g.area());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_noder, bench_pairwise_union, bench_cascaded_union);
criterion_main!(benches);
