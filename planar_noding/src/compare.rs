// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic ordering of points along a segment's direction.

use core::cmp::Ordering;

use planar_index::Coord;

/// Order two points by distance travelled along a reference segment whose
/// direction falls in `octant`.
///
/// Intersection points computed independently from different segment pairs
/// can differ in their low-order bits. Reducing the comparison to per-axis
/// sign tests keyed by the octant means every segment that shares a split
/// point orders it identically, which the noder needs to produce globally
/// consistent splits.
pub fn compare_segment_points(octant: u8, a: &Coord, b: &Coord) -> Ordering {
    if a.equals_2d(b) {
        return Ordering::Equal;
    }
    let x_sign = relative_sign(a.x, b.x);
    let y_sign = relative_sign(a.y, b.y);
    // Dominant axis first, subordinate axis second, with the sense of each
    // axis flipped to match the octant's direction.
    match octant {
        0 => compare_value(x_sign, y_sign),
        1 => compare_value(y_sign, x_sign),
        2 => compare_value(y_sign, x_sign.reverse()),
        3 => compare_value(x_sign.reverse(), y_sign),
        4 => compare_value(x_sign.reverse(), y_sign.reverse()),
        5 => compare_value(y_sign.reverse(), x_sign.reverse()),
        6 => compare_value(y_sign.reverse(), x_sign),
        7 => compare_value(x_sign, y_sign.reverse()),
        _ => unreachable!("octant must be in 0..8"),
    }
}

fn relative_sign(v0: f64, v1: f64) -> Ordering {
    if v0 < v1 {
        Ordering::Less
    } else if v0 > v1 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

fn compare_value(dominant: Ordering, subordinate: Ordering) -> Ordering {
    dominant.then(subordinate)
}
