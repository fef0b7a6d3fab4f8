// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed segments and direction octants.

use planar_index::{Coord, Envelope};

/// A directed line segment between two distinct coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// Start coordinate.
    pub p0: Coord,
    /// End coordinate.
    pub p1: Coord,
}

impl Segment {
    /// Create a segment from its endpoints.
    pub const fn new(p0: Coord, p1: Coord) -> Self {
        Self { p0, p1 }
    }

    /// The segment's bounding envelope.
    pub fn envelope(&self) -> Envelope {
        Envelope::of_segment(self.p0, self.p1)
    }

    /// Squared 2D length.
    pub fn length_sq(&self) -> f64 {
        self.p0.distance_sq(&self.p1)
    }

    /// Whether the endpoints coincide in 2D.
    pub fn is_zero_length(&self) -> bool {
        self.p0.equals_2d(&self.p1)
    }

    /// The same segment traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.p1, self.p0)
    }

    /// The direction octant of this segment. Panics in debug builds on
    /// zero-length segments; the noder filters those out first.
    pub fn octant(&self) -> u8 {
        octant(self.p0, self.p1)
    }
}

/// Classify the direction of `p1 - p0` into one of 8 angular buckets.
///
/// Octant 0 covers directions with `dx >= dy >= 0`, and the buckets proceed
/// counter-clockwise. The octant is used to reduce ordering points along a
/// segment to integer-friendly axis comparisons, which is what makes split
/// ordering deterministic across floating-point noise.
pub fn octant(p0: Coord, p1: Coord) -> u8 {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    debug_assert!(
        dx != 0.0 || dy != 0.0,
        "cannot compute the octant of a zero-length segment"
    );
    octant_of_vector(dx, dy)
}

fn octant_of_vector(dx: f64, dy: f64) -> u8 {
    let adx = if dx < 0.0 { -dx } else { dx };
    let ady = if dy < 0.0 { -dy } else { dy };
    if dx >= 0.0 {
        if dy >= 0.0 {
            if adx >= ady { 0 } else { 1 }
        } else if adx >= ady {
            7
        } else {
            6
        }
    } else if dy >= 0.0 {
        if adx >= ady { 3 } else { 2 }
    } else if adx >= ady {
        4
    } else {
        5
    }
}
