// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring, polygon, and geometry types produced and consumed by overlay.

use alloc::vec::Vec;

use planar_index::{Coord, Envelope};
use planar_noding::Segment;

/// A closed coordinate sequence.
///
/// The ring is implicitly closed: the last coordinate connects back to the
/// first, and an explicitly repeated closing coordinate is normalized away
/// at construction. Orientation is meaningful — counter-clockwise rings
/// enclose positive area.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    coords: Vec<Coord>,
}

impl Ring {
    /// Create a ring from a coordinate sequence, dropping an explicit
    /// closing coordinate if present.
    pub fn new(mut coords: Vec<Coord>) -> Self {
        if coords.len() > 1 && coords[0].equals_2d(&coords[coords.len() - 1]) {
            coords.pop();
        }
        Self { coords }
    }

    /// The ring's coordinates, without a repeated closing coordinate.
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of distinct vertices.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The ring's bounding envelope.
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(&self.coords)
    }

    /// Twice the signed area (shoelace sum); positive for counter-clockwise
    /// rings. Kept doubled to stay exact for integer-valued inputs.
    pub fn signed_area2(&self) -> f64 {
        let n = self.coords.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.coords[i];
            let b = &self.coords[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        let a2 = self.signed_area2();
        0.5 * if a2 < 0.0 { -a2 } else { a2 }
    }

    /// Whether the ring winds counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    /// This ring with the opposite winding.
    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        Self { coords }
    }

    /// The ring's boundary as segments, including the closing segment.
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.coords.len();
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(Segment::new(self.coords[i], self.coords[(i + 1) % n]));
        }
        out
    }

    /// Crossing-number point-in-ring test; points on the boundary count as
    /// inside.
    pub fn contains_point(&self, pt: &Coord) -> bool {
        let n = self.coords.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        for i in 0..n {
            let a = &self.coords[i];
            let b = &self.coords[(i + 1) % n];
            if on_segment(a, b, pt) {
                return true;
            }
            // Half-open edge rule so a crossing through a vertex counts once.
            if (a.y > pt.y) != (b.y > pt.y) {
                let t = (pt.y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                if pt.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

fn on_segment(a: &Coord, b: &Coord, pt: &Coord) -> bool {
    if planar_noding::orientation(a, b, pt) != 0 {
        return false;
    }
    Envelope::of_segment(*a, *b).contains_coord(pt)
}

/// A polygon: one shell with zero or more holes.
///
/// Overlay output normalizes winding — counter-clockwise shells, clockwise
/// holes — but inputs are accepted in either winding.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// The exterior ring.
    pub shell: Ring,
    /// Interior rings (holes).
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// A polygon with no holes.
    pub fn from_shell(shell: Ring) -> Self {
        Self {
            shell,
            holes: Vec::new(),
        }
    }

    /// The shell's bounding envelope.
    pub fn envelope(&self) -> Envelope {
        self.shell.envelope()
    }

    /// Shell area minus hole areas.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(Ring::area).sum();
        self.shell.area() - holes
    }

    /// Whether the point lies in the shell but not strictly inside a hole.
    pub fn contains_point(&self, pt: &Coord) -> bool {
        if !self.shell.contains_point(pt) {
            return false;
        }
        for hole in &self.holes {
            // Hole boundaries still belong to the polygon.
            if hole.contains_point(pt) && !on_ring_boundary(hole, pt) {
                return false;
            }
        }
        true
    }

    /// Whether the point lies exactly on the shell or a hole boundary.
    pub fn on_boundary(&self, pt: &Coord) -> bool {
        on_ring_boundary(&self.shell, pt) || self.holes.iter().any(|h| on_ring_boundary(h, pt))
    }

    /// All boundary segments, shell and holes.
    pub fn boundary_segments(&self) -> Vec<Segment> {
        let mut out = self.shell.segments();
        for hole in &self.holes {
            out.extend(hole.segments());
        }
        out
    }
}

fn on_ring_boundary(ring: &Ring, pt: &Coord) -> bool {
    let n = ring.coords().len();
    (0..n).any(|i| {
        let a = &ring.coords()[i];
        let b = &ring.coords()[(i + 1) % n];
        on_segment(a, b, pt)
    })
}

/// Closed set of geometry kinds flowing across the overlay boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// The empty geometry, e.g. the union of nothing.
    Empty,
    /// A single polygon.
    Polygon(Polygon),
    /// A collection of disjoint polygons.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Build the simplest geometry holding the given polygons.
    pub fn from_polygons(mut polygons: Vec<Polygon>) -> Self {
        match polygons.len() {
            0 => Self::Empty,
            1 => Self::Polygon(polygons.pop().expect("length checked")),
            _ => Self::MultiPolygon(polygons),
        }
    }

    /// Whether this is the empty geometry.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Polygon(_) => false,
            Self::MultiPolygon(ps) => ps.is_empty(),
        }
    }

    /// The component polygons, flattened.
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Self::Empty => &[],
            Self::Polygon(p) => core::slice::from_ref(p),
            Self::MultiPolygon(ps) => ps,
        }
    }

    /// Total area of all component polygons.
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(Polygon::area).sum()
    }

    /// The bounding envelope of all components.
    pub fn envelope(&self) -> Envelope {
        self.polygons()
            .iter()
            .fold(Envelope::EMPTY, |acc, p| acc.expanded_to_include(&p.envelope()))
    }
}
