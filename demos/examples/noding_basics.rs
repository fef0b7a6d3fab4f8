// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Noding basics.
//!
//! Split a set of crossing segments at their intersection points.
//!
//! Run:
//! - `cargo run -p planar_demos --example noding_basics`

use planar_index::Coord;
use planar_noding::{Noder, Segment};

fn main() {
    let segments = vec![
        Segment::new(Coord::new(0.0, 0.0), Coord::new(10.0, 10.0)),
        Segment::new(Coord::new(0.0, 10.0), Coord::new(10.0, 0.0)),
        Segment::new(Coord::new(0.0, 5.0), Coord::new(10.0, 5.0)),
    ];

    let noded = Noder::new(0.0).node(&segments).unwrap();
    println!("{} input segments, {} noded pieces", segments.len(), noded.len());
    for s in &noded {
        println!(
            "  ({}, {}) -> ({}, {})",
            s.p0.x, s.p0.y, s.p1.x, s.p1.y
        );
    }
    // All three cross at (5, 5), so each splits in two.
    assert_eq!(noded.len(), 6);
}
