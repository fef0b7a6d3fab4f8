// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-driven segment noding.

use alloc::vec::Vec;

use planar_index::{KdTree, StrTree};

use crate::compare::compare_segment_points;
use crate::error::{DegenerateKind, TopologyError};
use crate::intersect::{SegmentIntersection, segment_intersection};
use crate::segment::Segment;

/// Splits a set of segments at all mutual intersection points, producing an
/// arrangement in which no two segments cross except at shared endpoints.
///
/// Candidate pairs come from an [`StrTree`] over tolerance-expanded segment
/// envelopes, bounding pairwise testing to O(n log n + k). Split points on
/// each segment are ordered with the octant comparator so that a point
/// shared by several segments splits them all consistently, and with a
/// positive tolerance every output vertex is snapped through a [`KdTree`]
/// so vertices within tolerance unify into one exact coordinate.
#[derive(Copy, Clone, Debug)]
pub struct Noder {
    tolerance: f64,
}

impl Noder {
    /// Create a noder with the given snap tolerance (`>= 0`).
    pub fn new(tolerance: f64) -> Self {
        debug_assert!(tolerance >= 0.0, "snap tolerance must be non-negative");
        Self { tolerance }
    }

    /// The snap tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Node the input segments.
    ///
    /// Zero-length input segments are dropped; non-finite coordinates are
    /// rejected before any indexing. Sub-segments collapsed to zero length
    /// by snapping are dropped from the output.
    pub fn node(&self, segments: &[Segment]) -> Result<Vec<Segment>, TopologyError> {
        let mut input = Vec::with_capacity(segments.len());
        for seg in segments {
            if !seg.p0.is_finite_2d() || !seg.p1.is_finite_2d() {
                let coord = if seg.p0.is_finite_2d() { seg.p1 } else { seg.p0 };
                return Err(TopologyError::DegenerateInput {
                    kind: DegenerateKind::NonFiniteCoordinate,
                    coord,
                });
            }
            if !seg.is_zero_length() {
                input.push(*seg);
            }
        }

        let tree = StrTree::build(
            input
                .iter()
                .enumerate()
                .map(|(i, seg)| (seg.envelope().expanded_by(self.tolerance), i))
                .collect(),
        );

        // Split points per segment, indexed in parallel with `input`.
        let mut splits: Vec<Vec<planar_index::Coord>> = Vec::new();
        splits.resize_with(input.len(), Vec::new);
        for (i, seg) in input.iter().enumerate() {
            for &j in tree.query(&seg.envelope().expanded_by(self.tolerance)) {
                // Each unordered pair once.
                if j <= i {
                    continue;
                }
                match segment_intersection(seg, &input[j]) {
                    SegmentIntersection::None => {}
                    SegmentIntersection::Point(pt) => {
                        splits[i].push(pt);
                        splits[j].push(pt);
                    }
                    SegmentIntersection::Collinear(a, b) => {
                        splits[i].push(a);
                        splits[i].push(b);
                        splits[j].push(a);
                        splits[j].push(b);
                    }
                }
            }
        }

        let mut out = Vec::with_capacity(input.len());
        for (seg, mut points) in input.into_iter().zip(splits) {
            points.push(seg.p0);
            points.push(seg.p1);
            let octant = seg.octant();
            points.sort_by(|a, b| compare_segment_points(octant, a, b));
            points.dedup_by(|a, b| a.equals_2d(b));
            for pair in points.windows(2) {
                out.push(Segment::new(pair[0], pair[1]));
            }
        }

        if self.tolerance > 0.0 {
            let mut kd = KdTree::new(self.tolerance);
            out = out
                .into_iter()
                .filter_map(|seg| {
                    let p0 = kd.snap(seg.p0);
                    let p1 = kd.snap(seg.p1);
                    (!p0.equals_2d(&p1)).then_some(Segment::new(p0, p1))
                })
                .collect();
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planar_index::Coord;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Coord::new(x0, y0), Coord::new(x1, y1))
    }

    /// Order-insensitive set equality on segments, ignoring direction.
    fn same_arrangement(a: &[Segment], b: &[Segment]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        a.iter().all(|s| {
            b.iter()
                .any(|t| (s.p0 == t.p0 && s.p1 == t.p1) || (s.p0 == t.p1 && s.p1 == t.p0))
        })
    }

    #[test]
    fn crossing_segments_split_into_four() {
        let noder = Noder::new(0.0);
        let noded = noder
            .node(&[seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0)])
            .unwrap();
        assert_eq!(noded.len(), 4);
        let centre = Coord::new(1.0, 1.0);
        for s in &noded {
            assert!(
                s.p0 == centre || s.p1 == centre,
                "every piece must meet at the crossing"
            );
        }
    }

    #[test]
    fn noding_is_idempotent() {
        let noder = Noder::new(0.0);
        let first = noder
            .node(&[
                seg(0.0, 0.0, 2.0, 2.0),
                seg(0.0, 2.0, 2.0, 0.0),
                seg(0.0, 1.0, 3.0, 1.0),
            ])
            .unwrap();
        let second = noder.node(&first).unwrap();
        assert!(
            same_arrangement(&first, &second),
            "noding an already-noded set must be the identity"
        );
    }

    #[test]
    fn touching_endpoints_are_not_split_further() {
        let noder = Noder::new(0.0);
        let input = [seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 2.0, 1.0)];
        let noded = noder.node(&input).unwrap();
        assert!(same_arrangement(&input, &noded));
    }

    #[test]
    fn collinear_overlap_splits_both_segments() {
        let noder = Noder::new(0.0);
        let noded = noder
            .node(&[seg(0.0, 0.0, 4.0, 0.0), seg(2.0, 0.0, 6.0, 0.0)])
            .unwrap();
        // First: (0,0)-(2,0), (2,0)-(4,0); second: (2,0)-(4,0), (4,0)-(6,0).
        assert_eq!(noded.len(), 4);
        let expected = [
            seg(0.0, 0.0, 2.0, 0.0),
            seg(2.0, 0.0, 4.0, 0.0),
            seg(2.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 6.0, 0.0),
        ];
        assert!(same_arrangement(&noded, &expected));
    }

    #[test]
    fn zero_length_input_is_dropped() {
        let noder = Noder::new(0.0);
        let noded = noder
            .node(&[seg(1.0, 1.0, 1.0, 1.0), seg(0.0, 0.0, 1.0, 0.0)])
            .unwrap();
        assert_eq!(noded.len(), 1);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let noder = Noder::new(0.0);
        let err = noder
            .node(&[seg(0.0, 0.0, f64::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::DegenerateInput {
                kind: DegenerateKind::NonFiniteCoordinate,
                ..
            }
        ));
    }

    #[test]
    fn snapping_unifies_near_coincident_vertices() {
        let noder = Noder::new(0.01);
        // Two chains that should meet at (1, 0) but are off by 1e-3.
        let noded = noder
            .node(&[seg(0.0, 0.0, 1.0, 0.0), seg(1.001, 0.0001, 2.0, 0.0)])
            .unwrap();
        assert_eq!(noded.len(), 2);
        assert!(
            noded[0].p1.equals_2d(&noded[1].p0),
            "snapped vertices must be exactly equal"
        );
    }

    #[test]
    fn snapping_drops_collapsed_segments() {
        let noder = Noder::new(0.1);
        let noded = noder.node(&[seg(0.0, 0.0, 0.05, 0.0)]).unwrap();
        assert!(noded.is_empty());
    }

    #[test]
    fn many_segments_through_one_point_stay_consistent() {
        // A fan of segments all passing through (5, 5); every pair's
        // intersection is the same point and every segment must split there.
        let noder = Noder::new(0.0);
        let input = [
            seg(0.0, 0.0, 10.0, 10.0),
            seg(0.0, 10.0, 10.0, 0.0),
            seg(0.0, 5.0, 10.0, 5.0),
            seg(5.0, 0.0, 5.0, 10.0),
        ];
        let noded = noder.node(&input).unwrap();
        assert_eq!(noded.len(), 8);
        let centre = Coord::new(5.0, 5.0);
        for s in &noded {
            assert!(s.p0 == centre || s.p1 == centre);
        }
    }
}
