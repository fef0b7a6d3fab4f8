// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate and envelope primitives shared by the index structures.

use core::cmp::Ordering;

/// An immutable 2–4 ordinate coordinate.
///
/// `x` and `y` are always present. `z` and `m` hold [`Coord::NO_ORDINATE`]
/// when absent. Only `x` and `y` participate in equality, ordering, and all
/// geometric predicates; `z` and `m` are carried through unchanged.
#[derive(Copy, Clone, Debug)]
pub struct Coord {
    /// X ordinate (easting).
    pub x: f64,
    /// Y ordinate (northing).
    pub y: f64,
    /// Optional Z ordinate; [`Coord::NO_ORDINATE`] when absent.
    pub z: f64,
    /// Optional measure ordinate; [`Coord::NO_ORDINATE`] when absent.
    pub m: f64,
}

impl Coord {
    /// Sentinel marking an ordinate as not present.
    pub const NO_ORDINATE: f64 = f64::NAN;

    /// Create a 2D coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: Self::NO_ORDINATE,
            m: Self::NO_ORDINATE,
        }
    }

    /// Create a 3D coordinate.
    pub const fn new_xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            m: Self::NO_ORDINATE,
        }
    }

    /// Create a 4D coordinate.
    pub const fn new_xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// Whether the Z ordinate is present.
    pub fn has_z(&self) -> bool {
        !self.z.is_nan()
    }

    /// Whether the measure ordinate is present.
    pub fn has_m(&self) -> bool {
        !self.m.is_nan()
    }

    /// Whether both planar ordinates are finite.
    pub fn is_finite_2d(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 2D equality on the planar ordinates only.
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Squared 2D distance to `other`.
    pub fn distance_sq(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint of the planar ordinates.
    pub fn midpoint_2d(&self, other: &Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Total order on (x, y) bit patterns, for use as a map key.
    ///
    /// Callers are expected to have rejected NaN planar ordinates already;
    /// bit-pattern comparison keeps the order total regardless.
    pub fn cmp_2d(&self, other: &Self) -> Ordering {
        match self.x.total_cmp(&other.x) {
            Ordering::Equal => self.y.total_cmp(&other.y),
            ord => ord,
        }
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

/// Axis-aligned bounding box over `f64` planar ordinates.
///
/// A non-empty envelope satisfies `min_x <= max_x && min_y <= max_y`.
/// [`Envelope::EMPTY`] is a distinguishable empty state: it intersects
/// nothing, contains nothing, and is the identity for
/// [`Envelope::expanded_to_include`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Envelope {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Envelope {
    /// The empty envelope.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Create an envelope from min/max corners. Corners may be given in any
    /// order per axis.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// The envelope of a single coordinate.
    pub const fn of_coord(c: Coord) -> Self {
        Self {
            min_x: c.x,
            min_y: c.y,
            max_x: c.x,
            max_y: c.y,
        }
    }

    /// The envelope of the segment `a`–`b`.
    pub fn of_segment(a: Coord, b: Coord) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// The envelope of a coordinate slice; empty input yields [`Self::EMPTY`].
    pub fn from_coords(coords: &[Coord]) -> Self {
        let mut env = Self::EMPTY;
        for c in coords {
            env = env.expanded_to_include_coord(*c);
        }
        env
    }

    /// Whether this envelope is empty. Assumes no NaN bounds.
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Width of the envelope; zero when empty.
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0)
    }

    /// Height of the envelope; zero when empty.
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(0.0)
    }

    /// Midpoint of the x range.
    pub fn centre_x(&self) -> f64 {
        0.5 * (self.min_x + self.max_x)
    }

    /// Midpoint of the y range.
    pub fn centre_y(&self) -> f64 {
        0.5 * (self.min_y + self.max_y)
    }

    /// Whether the ranges overlap on both axes, boundaries inclusive.
    /// The empty envelope intersects nothing.
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
            && !self.is_empty()
            && !other.is_empty()
    }

    /// The intersection of two envelopes; empty when they do not intersect.
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other) {
            return Self::EMPTY;
        }
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Whether the coordinate lies inside or on the boundary.
    pub fn contains_coord(&self, c: &Coord) -> bool {
        self.min_x <= c.x && c.x <= self.max_x && self.min_y <= c.y && c.y <= self.max_y
    }

    /// This envelope grown by `margin` on every side. Growing the empty
    /// envelope yields the empty envelope.
    pub fn expanded_by(&self, margin: f64) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// The smallest envelope covering both inputs.
    pub fn expanded_to_include(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The smallest envelope covering this envelope and the coordinate.
    pub fn expanded_to_include_coord(&self, c: Coord) -> Self {
        Self {
            min_x: self.min_x.min(c.x),
            min_y: self.min_y.min(c.y),
            max_x: self.max_x.max(c.x),
            max_y: self.max_y.max(c.y),
        }
    }
}
