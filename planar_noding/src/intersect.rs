// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Robust segment-pair intersection.
//!
//! Orientation tests use the adaptive-precision `robust` predicates, so the
//! existence and kind of an intersection is decided exactly; only the
//! coordinates of a proper crossing are subject to rounding, and those are
//! guarded by envelope checks with a nearest-endpoint fallback.

use planar_index::Coord;

use crate::segment::Segment;

/// The result of intersecting two segments.
///
/// A collinear overlap is a distinct case carrying both overlap endpoints;
/// it is never silently approximated as a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not intersect.
    None,
    /// The segments meet at a single point.
    Point(Coord),
    /// The segments overlap along a collinear span.
    Collinear(Coord, Coord),
}

/// Sign of the orientation of `c` relative to the directed line `a`–`b`:
/// positive is counter-clockwise (left of the line), zero is collinear.
pub fn orientation(a: &Coord, b: &Coord, c: &Coord) -> i8 {
    let det = robust::orient2d(
        robust::Coord { x: a.x, y: a.y },
        robust::Coord { x: b.x, y: b.y },
        robust::Coord { x: c.x, y: c.y },
    );
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

/// Compute the intersection of two segments.
pub fn segment_intersection(p: &Segment, q: &Segment) -> SegmentIntersection {
    // Envelope pre-filter before any predicate work.
    if !p.envelope().intersects(&q.envelope()) {
        return SegmentIntersection::None;
    }

    // Each endpoint's side of the other segment; same nonzero side on both
    // endpoints means no intersection.
    let pq0 = orientation(&p.p0, &p.p1, &q.p0);
    let pq1 = orientation(&p.p0, &p.p1, &q.p1);
    if (pq0 > 0 && pq1 > 0) || (pq0 < 0 && pq1 < 0) {
        return SegmentIntersection::None;
    }
    let qp0 = orientation(&q.p0, &q.p1, &p.p0);
    let qp1 = orientation(&q.p0, &q.p1, &p.p1);
    if (qp0 > 0 && qp1 > 0) || (qp0 < 0 && qp1 < 0) {
        return SegmentIntersection::None;
    }

    if pq0 == 0 && pq1 == 0 && qp0 == 0 && qp1 == 0 {
        return collinear_intersection(p, q);
    }

    // A single intersection point. If it is an endpoint, copy the endpoint
    // coordinate exactly rather than recomputing it.
    if pq0 == 0 || pq1 == 0 || qp0 == 0 || qp1 == 0 {
        let pt = if p.p0.equals_2d(&q.p0) || p.p0.equals_2d(&q.p1) {
            p.p0
        } else if p.p1.equals_2d(&q.p0) || p.p1.equals_2d(&q.p1) {
            p.p1
        } else if pq0 == 0 {
            q.p0
        } else if pq1 == 0 {
            q.p1
        } else if qp0 == 0 {
            p.p0
        } else {
            p.p1
        };
        return SegmentIntersection::Point(pt);
    }

    SegmentIntersection::Point(proper_intersection(p, q))
}

fn collinear_intersection(p: &Segment, q: &Segment) -> SegmentIntersection {
    let p_env = p.envelope();
    let q_env = q.envelope();
    let p_has_q0 = p_env.contains_coord(&q.p0);
    let p_has_q1 = p_env.contains_coord(&q.p1);
    let q_has_p0 = q_env.contains_coord(&p.p0);
    let q_has_p1 = q_env.contains_coord(&p.p1);

    let span = if p_has_q0 && p_has_q1 {
        Some((q.p0, q.p1))
    } else if q_has_p0 && q_has_p1 {
        Some((p.p0, p.p1))
    } else if p_has_q0 && q_has_p0 {
        Some((q.p0, p.p0))
    } else if p_has_q0 && q_has_p1 {
        Some((q.p0, p.p1))
    } else if p_has_q1 && q_has_p0 {
        Some((q.p1, p.p0))
    } else if p_has_q1 && q_has_p1 {
        Some((q.p1, p.p1))
    } else {
        None
    };
    match span {
        None => SegmentIntersection::None,
        Some((a, b)) if a.equals_2d(&b) => SegmentIntersection::Point(a),
        Some((a, b)) => SegmentIntersection::Collinear(a, b),
    }
}

/// Intersection point of two properly crossing segments.
///
/// Ordinates are normalized about the midpoint of the envelope overlap
/// before solving, which strips the shared high-order digits and keeps more
/// bits of precision in the arithmetic.
fn proper_intersection(p: &Segment, q: &Segment) -> Coord {
    let common = p.envelope().intersection(&q.envelope());
    let norm_x = common.centre_x();
    let norm_y = common.centre_y();

    let px0 = p.p0.x - norm_x;
    let py0 = p.p0.y - norm_y;
    let px1 = p.p1.x - norm_x;
    let py1 = p.p1.y - norm_y;
    let qx0 = q.p0.x - norm_x;
    let qy0 = q.p0.y - norm_y;
    let qx1 = q.p1.x - norm_x;
    let qy1 = q.p1.y - norm_y;

    // Homogeneous-coordinate line intersection.
    let p_a = py1 - py0;
    let p_b = px0 - px1;
    let p_c = px1 * py0 - px0 * py1;
    let q_a = qy1 - qy0;
    let q_b = qx0 - qx1;
    let q_c = qx1 * qy0 - qx0 * qy1;

    let w = p_a * q_b - q_a * p_b;
    let x = (p_b * q_c - q_b * p_c) / w + norm_x;
    let y = (q_a * p_c - p_a * q_c) / w + norm_y;
    let pt = Coord::new(x, y);

    // Rounding can push the computed point outside the input envelopes,
    // which is inconsistent; substitute the endpoint nearest the other
    // segment in that case.
    if !pt.is_finite_2d() || !p.envelope().contains_coord(&pt) || !q.envelope().contains_coord(&pt)
    {
        return nearest_endpoint(p, q);
    }
    pt
}

/// The endpoint of either segment closest to the other segment — a sound
/// surrogate for the true intersection in ill-conditioned cases.
fn nearest_endpoint(p: &Segment, q: &Segment) -> Coord {
    let mut best = p.p0;
    let mut best_dist = distance_sq_to_segment(&p.p0, q);
    for (pt, seg) in [(p.p1, q), (q.p0, p), (q.p1, p)] {
        let d = distance_sq_to_segment(&pt, seg);
        if d < best_dist {
            best_dist = d;
            best = pt;
        }
    }
    best
}

fn distance_sq_to_segment(pt: &Coord, seg: &Segment) -> f64 {
    let dx = seg.p1.x - seg.p0.x;
    let dy = seg.p1.y - seg.p0.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return pt.distance_sq(&seg.p0);
    }
    let t = ((pt.x - seg.p0.x) * dx + (pt.y - seg.p0.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let proj = Coord::new(seg.p0.x + t * dx, seg.p0.y + t * dy);
    pt.distance_sq(&proj)
}
