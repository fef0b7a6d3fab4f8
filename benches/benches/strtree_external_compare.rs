// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use planar_index::{Envelope, StrTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

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

fn to_rstar_rects(v: &[Envelope]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|e| Rectangle::from_corners([e.min_x, e.min_y], [e.max_x, e.max_y]))
        .collect()
}

fn bench_strtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("strtree_external_compare");
    for &n in &[64usize, 128] {
        let envs = gen_grid_envs(n, 10.0);
        let query = Envelope::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("planar_build_query_n{}", n), |b| {
            b.iter_batched(
                || {
                    envs.iter()
                        .copied()
                        .enumerate()
                        .map(|(i, e)| (e, i))
                        .collect::<Vec<_>>()
                },
                |items| {
                    let tree = StrTree::build(items);
                    let hits: usize = tree.query(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&envs),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb =
                        AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strtree_external_compare);
criterion_main!(benches);
