// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Half-edge (DCEL) planar graph built from noded segments.
//!
//! Half-edges live in an arena and reference each other by [`EdgeId`], so
//! the twin/next cycles are plain index fields with no ownership cycles to
//! manage. Twins are allocated adjacently: `sym` of edge `2k` is `2k + 1`.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use planar_index::Coord;
use planar_noding::{Segment, orientation};

bitflags::bitflags! {
    /// Per-half-edge state used during ring extraction and overlay.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EdgeFlags: u8 {
        /// Edge has been consumed by a ring walk.
        const VISITED   = 0b0000_0001;
        /// Edge lies on the boundary of the overlay result.
        const IN_RESULT = 0b0000_0010;
    }
}

/// Handle to a half-edge in an [`EdgeGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// A directed half of an undirected edge.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    orig: Coord,
    sym: EdgeId,
    next: EdgeId,
    flags: EdgeFlags,
}

impl HalfEdge {
    /// The origin coordinate.
    pub fn orig(&self) -> Coord {
        self.orig
    }

    /// Current flags.
    pub fn flags(&self) -> EdgeFlags {
        self.flags
    }
}

/// Exact-match map key for coordinates; `-0.0` normalizes to `0.0` so the
/// key agrees with 2D coordinate equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CoordKey(u64, u64);

impl CoordKey {
    fn of(c: &Coord) -> Self {
        Self((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
    }
}

/// A planar graph of half-edges built once from a noded segment set.
///
/// Every undirected segment becomes a twin pair of half-edges; duplicate
/// `(origin, destination)` segments collapse onto the existing pair, so
/// the graph is simple. After all edges are inserted, the outgoing edges
/// at each origin are sorted counter-clockwise by direction and linked
/// into the `next` cycle, which is what makes "walking around a vertex"
/// well defined.
///
/// The graph is batch-built and never mutated structurally afterwards;
/// build a new graph from a new noded input instead.
#[derive(Clone, Debug)]
pub struct EdgeGraph {
    edges: Vec<HalfEdge>,
    by_origin: BTreeMap<CoordKey, Vec<EdgeId>>,
}

impl EdgeGraph {
    /// Build a graph from noded segments. Zero-length segments are skipped.
    pub fn build(segments: &[Segment]) -> Self {
        let mut graph = Self {
            edges: Vec::with_capacity(segments.len() * 2),
            by_origin: BTreeMap::new(),
        };
        for seg in segments {
            if seg.is_zero_length() {
                continue;
            }
            graph.add_edge(seg.p0, seg.p1);
        }
        graph.link_origin_cycles();
        graph
    }

    /// Number of half-edges (twice the number of undirected edges).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Access a half-edge record.
    pub fn edge(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id.get()]
    }

    /// The opposite-direction twin. The twin relation is symmetric and
    /// fixed for the life of the edge.
    pub fn sym(&self, id: EdgeId) -> EdgeId {
        self.edges[id.get()].sym
    }

    /// The next outgoing edge counter-clockwise around this edge's origin.
    pub fn next(&self, id: EdgeId) -> EdgeId {
        self.edges[id.get()].next
    }

    /// The origin coordinate of a half-edge.
    pub fn origin(&self, id: EdgeId) -> Coord {
        self.edges[id.get()].orig
    }

    /// The destination coordinate (the twin's origin).
    pub fn dest(&self, id: EdgeId) -> Coord {
        self.origin(self.sym(id))
    }

    /// Find the half-edge from `orig` to `dest`, if present.
    pub fn find_edge(&self, orig: &Coord, dest: &Coord) -> Option<EdgeId> {
        let ids = self.by_origin.get(&CoordKey::of(orig))?;
        ids.iter()
            .copied()
            .find(|&id| self.dest(id).equals_2d(dest))
    }

    /// The closed `next` cycle at this edge's origin, starting at `id`.
    ///
    /// Visits every edge incident to the origin exactly once before
    /// returning to the start.
    pub fn origin_ring(&self, id: EdgeId) -> OriginRing<'_> {
        OriginRing {
            graph: self,
            start: id,
            cur: Some(id),
        }
    }

    /// Step to the next boundary edge of the face to the left of `id`:
    /// the clockwise neighbour of the twin in its origin cycle.
    pub fn face_step(&self, id: EdgeId) -> EdgeId {
        self.cycle_prev(self.sym(id))
    }

    /// All half-edge ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Set flags on a half-edge.
    pub fn insert_flags(&mut self, id: EdgeId, flags: EdgeFlags) {
        self.edges[id.get()].flags.insert(flags);
    }

    /// Read flags on a half-edge.
    pub fn flags(&self, id: EdgeId) -> EdgeFlags {
        self.edges[id.get()].flags
    }

    fn add_edge(&mut self, p0: Coord, p1: Coord) {
        if self.find_edge(&p0, &p1).is_some() {
            return;
        }
        let e = EdgeId::new(self.edges.len());
        let s = EdgeId::new(self.edges.len() + 1);
        self.edges.push(HalfEdge {
            orig: p0,
            sym: s,
            next: e,
            flags: EdgeFlags::empty(),
        });
        self.edges.push(HalfEdge {
            orig: p1,
            sym: e,
            next: s,
            flags: EdgeFlags::empty(),
        });
        self.by_origin.entry(CoordKey::of(&p0)).or_default().push(e);
        self.by_origin.entry(CoordKey::of(&p1)).or_default().push(s);
    }

    fn link_origin_cycles(&mut self) {
        let origins: Vec<Vec<EdgeId>> = self.by_origin.values().cloned().collect();
        for mut outgoing in origins {
            outgoing.sort_by(|&a, &b| {
                let oa = self.edges[a.get()].orig;
                let da = self.dest(a);
                let db = self.dest(b);
                direction_cmp(&oa, &da, &db)
            });
            let n = outgoing.len();
            for (i, &id) in outgoing.iter().enumerate() {
                self.edges[id.get()].next = outgoing[(i + 1) % n];
            }
        }
    }

    /// The clockwise neighbour of `id` in its origin cycle (the edge whose
    /// `next` is `id`). Origin cycles are short, so a walk suffices.
    fn cycle_prev(&self, id: EdgeId) -> EdgeId {
        let mut cur = id;
        loop {
            let nxt = self.next(cur);
            if nxt == id {
                return cur;
            }
            cur = nxt;
        }
    }
}

/// Iterator over the `next` cycle at one origin.
#[derive(Clone, Debug)]
pub struct OriginRing<'a> {
    graph: &'a EdgeGraph,
    start: EdgeId,
    cur: Option<EdgeId>,
}

impl Iterator for OriginRing<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let cur = self.cur?;
        let nxt = self.graph.next(cur);
        self.cur = if nxt == self.start { None } else { Some(nxt) };
        Some(cur)
    }
}

/// Counter-clockwise order of two outgoing directions from `orig`,
/// starting at the positive x axis: quadrant first, then the robust
/// orientation of one direction against the other within a quadrant.
fn direction_cmp(orig: &Coord, a: &Coord, b: &Coord) -> core::cmp::Ordering {
    use core::cmp::Ordering;
    let qa = quadrant(a.x - orig.x, a.y - orig.y);
    let qb = quadrant(b.x - orig.x, b.y - orig.y);
    match qa.cmp(&qb) {
        Ordering::Equal => match orientation(orig, a, b) {
            1 => Ordering::Less,
            -1 => Ordering::Greater,
            _ => Ordering::Equal,
        },
        ord => ord,
    }
}

fn quadrant(dx: f64, dy: f64) -> u8 {
    if dx >= 0.0 {
        if dy >= 0.0 { 0 } else { 3 }
    } else if dy >= 0.0 {
        1
    } else {
        2
    }
}
