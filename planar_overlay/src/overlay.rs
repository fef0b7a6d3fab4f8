// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise polygon union over a noded half-edge graph.
//!
//! The union of two inputs is computed in four phases: validate and
//! orient the input boundaries, node them against each other, keep the
//! noded pieces that lie on the union's boundary, then trace result
//! rings out of an [`EdgeGraph`] built from the kept pieces.
//!
//! Boundaries are oriented so the source interior is always on the left
//! of a directed segment (counter-clockwise shells, clockwise holes).
//! Noding preserves direction, so after classification every kept edge
//! still has the union interior on its left and a face walk with
//! [`EdgeGraph::face_step`] yields counter-clockwise shells and
//! clockwise holes directly.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use planar_index::{Coord, Envelope};
use planar_noding::{Noder, Segment, TopologyError};

use crate::geom::{Geometry, Polygon, Ring};
use crate::graph::{EdgeFlags, EdgeGraph};
use crate::validate::validate_ring;

/// Union of two polygons.
///
/// Both inputs are validated first; the result is `Empty`, a single
/// polygon, or a multi-polygon depending on how the inputs connect.
pub fn union_polygons(
    a: &Polygon,
    b: &Polygon,
    tolerance: f64,
) -> Result<Geometry, TopologyError> {
    union_sides(
        core::slice::from_ref(a),
        core::slice::from_ref(b),
        tolerance,
    )
}

/// Union of two geometries, treating each as a set of disjoint polygons.
pub fn union_geometries(
    a: &Geometry,
    b: &Geometry,
    tolerance: f64,
) -> Result<Geometry, TopologyError> {
    union_sides(a.polygons(), b.polygons(), tolerance)
}

fn union_sides(
    a: &[Polygon],
    b: &[Polygon],
    tolerance: f64,
) -> Result<Geometry, TopologyError> {
    for poly in a.iter().chain(b) {
        validate_ring(&poly.shell, tolerance)?;
        for hole in &poly.holes {
            validate_ring(hole, tolerance)?;
        }
    }
    if a.is_empty() {
        return Ok(Geometry::from_polygons(b.to_vec()));
    }
    if b.is_empty() {
        return Ok(Geometry::from_polygons(a.to_vec()));
    }

    // Disjoint envelopes cannot interact; concatenate the components.
    let env_a = envelope_of(a);
    let env_b = envelope_of(b);
    if !env_a.intersects(&env_b) {
        let mut out = a.to_vec();
        out.extend_from_slice(b);
        return Ok(Geometry::from_polygons(out));
    }

    let mut segments = Vec::new();
    for poly in a.iter().chain(b) {
        oriented_boundary(poly, &mut segments);
    }
    let noded = Noder::new(tolerance).node(&segments)?;

    // A noded piece is on the union boundary when its midpoint is not
    // strictly inside either input.
    let kept: Vec<Segment> = noded
        .into_iter()
        .filter(|s| {
            let mid = s.p0.midpoint_2d(&s.p1);
            !strictly_interior(a, &mid) && !strictly_interior(b, &mid)
        })
        .collect();

    let polygons = trace_result(&cancel_opposed(kept));
    Ok(Geometry::from_polygons(polygons))
}

fn envelope_of(polys: &[Polygon]) -> Envelope {
    let mut env = Envelope::EMPTY;
    for p in polys {
        env = env.expanded_to_include(&p.envelope());
    }
    env
}

/// Push the polygon's boundary with interior-on-the-left orientation.
fn oriented_boundary(poly: &Polygon, out: &mut Vec<Segment>) {
    let shell = if poly.shell.is_ccw() {
        poly.shell.clone()
    } else {
        poly.shell.reversed()
    };
    out.extend(shell.segments());
    for hole in &poly.holes {
        let hole = if hole.is_ccw() {
            hole.reversed()
        } else {
            hole.clone()
        };
        out.extend(hole.segments());
    }
}

fn strictly_interior(polys: &[Polygon], pt: &Coord) -> bool {
    polys
        .iter()
        .any(|p| p.contains_point(pt) && !p.on_boundary(pt))
}

fn directed_key(s: &Segment) -> (u64, u64, u64, u64) {
    // +0.0 folds -0.0 into the same key.
    (
        (s.p0.x + 0.0).to_bits(),
        (s.p0.y + 0.0).to_bits(),
        (s.p1.x + 0.0).to_bits(),
        (s.p1.y + 0.0).to_bits(),
    )
}

/// Drop edges present in both directions and collapse same-direction
/// duplicates.
///
/// An antiparallel pair survives classification exactly when the two
/// inputs meet along a shared edge with their interiors on opposite
/// sides. That edge is interior to the union and must not appear in
/// the result graph.
fn cancel_opposed(kept: Vec<Segment>) -> Vec<Segment> {
    let present: BTreeSet<_> = kept.iter().map(directed_key).collect();
    let mut out = Vec::new();
    let mut emitted = BTreeSet::new();
    for s in kept {
        if present.contains(&directed_key(&s.reversed())) {
            continue;
        }
        if emitted.insert(directed_key(&s)) {
            out.push(s);
        }
    }
    out
}

/// Trace result rings out of the half-edge graph.
///
/// Only properly directed edges are walked; each face walk yields one
/// boundary component, counter-clockwise for shells and clockwise for
/// holes. Holes are attached to the smallest shell containing them.
fn trace_result(kept: &[Segment]) -> Vec<Polygon> {
    let mut graph = EdgeGraph::build(kept);
    for s in kept {
        if let Some(id) = graph.find_edge(&s.p0, &s.p1) {
            graph.insert_flags(id, EdgeFlags::IN_RESULT);
        }
    }

    let mut shells = Vec::new();
    let mut holes = Vec::new();
    let ids: Vec<_> = graph.edge_ids().collect();
    for id in ids {
        let flags = graph.flags(id);
        if !flags.contains(EdgeFlags::IN_RESULT) || flags.contains(EdgeFlags::VISITED) {
            continue;
        }
        let mut coords = Vec::new();
        let mut e = id;
        loop {
            graph.insert_flags(e, EdgeFlags::VISITED);
            coords.push(graph.origin(e));
            e = graph.face_step(e);
            if e == id {
                break;
            }
        }
        let ring = Ring::new(coords);
        let area2 = ring.signed_area2();
        if area2 > 0.0 {
            shells.push(ring);
        } else if area2 < 0.0 {
            holes.push(ring);
        }
    }

    let mut polygons: Vec<Polygon> = shells.into_iter().map(Polygon::from_shell).collect();
    for hole in holes {
        let rep = hole.coords()[0].midpoint_2d(&hole.coords()[1]);
        let mut best: Option<usize> = None;
        for (i, poly) in polygons.iter().enumerate() {
            if !poly.shell.envelope().contains_coord(&rep) || !poly.shell.contains_point(&rep) {
                continue;
            }
            let smaller = best.is_none_or(|j| poly.shell.area() < polygons[j].shell.area());
            if smaller {
                best = Some(i);
            }
        }
        if let Some(i) = best {
            polygons[i].holes.push(hole);
        }
    }
    polygons
}
