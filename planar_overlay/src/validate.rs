// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring validity checks run before overlay.

use planar_index::{Coord, StrTree};
use planar_noding::{DegenerateKind, SegmentIntersection, TopologyError, segment_intersection};

use crate::geom::Ring;

/// Check a ring for the validity failures overlay cannot tolerate.
///
/// Detects, in order: non-finite coordinates, consecutive duplicate
/// vertices (within `tolerance`), too few vertices or zero enclosed area,
/// and self-intersection or self-overlap of the boundary. Candidate
/// segment pairs for the self-intersection scan come from an [`StrTree`],
/// the same way the noder bounds its pair tests.
pub fn validate_ring(ring: &Ring, tolerance: f64) -> Result<(), TopologyError> {
    let coords = ring.coords();
    let anchor = coords.first().copied().unwrap_or(Coord::new(0.0, 0.0));

    for c in coords {
        if !c.is_finite_2d() {
            return Err(TopologyError::DegenerateInput {
                kind: DegenerateKind::NonFiniteCoordinate,
                coord: *c,
            });
        }
    }

    let tol_sq = tolerance * tolerance;
    let n = coords.len();
    if n > 1 {
        for i in 0..n {
            let a = &coords[i];
            let b = &coords[(i + 1) % n];
            if a.equals_2d(b) || (tolerance > 0.0 && a.distance_sq(b) <= tol_sq) {
                return Err(TopologyError::DuplicateVertex { coord: *a });
            }
        }
    }

    if n < 3 || ring.signed_area2() == 0.0 {
        return Err(TopologyError::DegenerateInput {
            kind: DegenerateKind::ZeroAreaRing,
            coord: anchor,
        });
    }

    let segments = ring.segments();
    let tree = StrTree::build(
        segments
            .iter()
            .enumerate()
            .map(|(i, s)| (s.envelope(), i))
            .collect(),
    );
    for (i, seg) in segments.iter().enumerate() {
        for &j in tree.query(&seg.envelope()) {
            if j <= i {
                continue;
            }
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match segment_intersection(seg, &segments[j]) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(pt) => {
                    if adjacent {
                        // Adjacent boundary segments may only meet at the
                        // vertex they share.
                        let shared = if j == i + 1 { &seg.p1 } else { &seg.p0 };
                        if !pt.equals_2d(shared) {
                            return Err(TopologyError::SelfIntersection { coord: pt });
                        }
                    } else {
                        return Err(TopologyError::SelfIntersection { coord: pt });
                    }
                }
                SegmentIntersection::Collinear(a, b) => {
                    return Err(TopologyError::SelfOverlap { p0: a, p1: b });
                }
            }
        }
    }
    Ok(())
}
