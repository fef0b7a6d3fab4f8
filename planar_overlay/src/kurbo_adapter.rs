// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between [`kurbo`] paths and overlay geometry.
//!
//! [`rings_from_path`] flattens curved path segments to line segments
//! at a caller-chosen tolerance, so a Bézier outline can feed the
//! overlay operations, which are strictly linear. [`path_from_geometry`]
//! goes the other way for rendering union results.

use alloc::vec::Vec;

use kurbo::{BezPath, PathEl};
use planar_index::Coord;

use crate::geom::{Geometry, Ring};

/// Flatten a path into one ring per closed subpath.
///
/// Curves are approximated by line segments within `tolerance`.
/// Subpaths that end without an explicit close are closed implicitly;
/// subpaths too short to enclose area are dropped.
pub fn rings_from_path(path: &BezPath, tolerance: f64) -> Vec<Ring> {
    let mut rings = Vec::new();
    let mut current: Vec<Coord> = Vec::new();
    kurbo::flatten(path.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            finish_ring(&mut rings, core::mem::take(&mut current));
            current.push(Coord::new(p.x, p.y));
        }
        PathEl::LineTo(p) => current.push(Coord::new(p.x, p.y)),
        PathEl::ClosePath => {
            finish_ring(&mut rings, core::mem::take(&mut current));
        }
        // Flattening only emits moves, lines and closes.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => unreachable!(),
    });
    finish_ring(&mut rings, current);
    rings
}

fn finish_ring(rings: &mut Vec<Ring>, coords: Vec<Coord>) {
    let ring = Ring::new(coords);
    if ring.len() >= 3 {
        rings.push(ring);
    }
}

/// Render a geometry as a path, one closed subpath per ring.
pub fn path_from_geometry(geometry: &Geometry) -> BezPath {
    let mut path = BezPath::new();
    for poly in geometry.polygons() {
        append_ring(&mut path, &poly.shell);
        for hole in &poly.holes {
            append_ring(&mut path, hole);
        }
    }
    path
}

fn append_ring(path: &mut BezPath, ring: &Ring) {
    let mut coords = ring.coords().iter();
    let Some(first) = coords.next() else {
        return;
    };
    path.move_to((first.x, first.y));
    for c in coords {
        path.line_to((c.x, c.y));
    }
    path.close_path();
}
