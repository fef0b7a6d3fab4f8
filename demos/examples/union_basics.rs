// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascaded union basics.
//!
//! Union a grid of overlapping squares and print the result rings.
//!
//! Run:
//! - `cargo run -p planar_demos --example union_basics`

use planar_index::Coord;
use planar_overlay::{CascadedUnion, Polygon, Ring};

fn square(x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::from_shell(Ring::new(vec![
        Coord::new(x0, y0),
        Coord::new(x0 + side, y0),
        Coord::new(x0 + side, y0 + side),
        Coord::new(x0, y0 + side),
    ]))
}

fn main() {
    // A 4x4 grid of squares, each overlapping its neighbours.
    let mut polys = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            polys.push(square(x as f64 * 10.0, y as f64 * 10.0, 12.0));
        }
    }
    // One distant island.
    polys.push(square(200.0, 200.0, 5.0));

    let g = CascadedUnion::new(0.0).union(&polys).unwrap();
    println!("components: {}", g.polygons().len());
    println!("total area: {}", g.area());
    for (i, poly) in g.polygons().iter().enumerate() {
        println!(
            "  polygon {i}: {} shell vertices, {} holes",
            poly.shell.len(),
            poly.holes.len()
        );
    }
    assert_eq!(g.polygons().len(), 2, "one grid blob plus the island");
}
