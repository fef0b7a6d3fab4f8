// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Union of flattened Bézier outlines.
//!
//! Flatten two overlapping circles into rings, union them, and render
//! the result back to a path.
//!
//! Run:
//! - `cargo run -p planar_demos --example kurbo_union`

use kurbo::{Circle, Shape};
use planar_overlay::kurbo_adapter::{path_from_geometry, rings_from_path};
use planar_overlay::{Polygon, union_polygons};

fn main() {
    let flatten_tol = 1e-3;
    let a = Circle::new((0.0, 0.0), 10.0).to_path(flatten_tol);
    let b = Circle::new((12.0, 0.0), 10.0).to_path(flatten_tol);

    let ring_a = rings_from_path(&a, flatten_tol).remove(0);
    let ring_b = rings_from_path(&b, flatten_tol).remove(0);

    let g = union_polygons(
        &Polygon::from_shell(ring_a),
        &Polygon::from_shell(ring_b),
        0.0,
    )
    .unwrap();
    println!("union area: {:.3}", g.area());

    let path = path_from_geometry(&g);
    println!("result path elements: {}", path.elements().len());
    assert_eq!(g.polygons().len(), 1, "overlapping circles merge");
}
