// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point KD-tree with snap-tolerance merging of near-duplicate insertions.

use alloc::vec::Vec;

use crate::types::{Coord, Envelope};

/// Handle to a node in a [`KdTree`] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KdNodeId(usize);

impl KdNodeId {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// A node owning one distinct coordinate and the count of insertions that
/// merged into it.
#[derive(Clone, Debug)]
pub struct KdNode {
    coord: Coord,
    count: usize,
    left: Option<KdNodeId>,
    right: Option<KdNodeId>,
}

impl KdNode {
    /// The coordinate stored at this node.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Number of insertions merged into this node; at least 1.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether more than one insertion merged into this node.
    pub fn is_repeated(&self) -> bool {
        self.count > 1
    }
}

/// A balanced-on-average 2D point index.
///
/// Inserting a point within `tolerance` distance of an existing node merges
/// into that node instead of creating a new one, which makes the tree a
/// snapping primitive: every coordinate inserted maps to exactly one
/// canonical stored coordinate.
///
/// Nodes live in an arena and are addressed by [`KdNodeId`]; the split axis
/// alternates with depth (even depths split on x, odd on y).
#[derive(Clone, Debug)]
pub struct KdTree {
    arena: Vec<KdNode>,
    root: Option<KdNodeId>,
    tolerance: f64,
}

impl KdTree {
    /// Create an empty tree with the given snap tolerance (`>= 0`).
    pub fn new(tolerance: f64) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            tolerance,
        }
    }

    /// The snap tolerance this tree was created with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of distinct nodes (not counting merged repeats).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Access a node by id.
    pub fn node(&self, id: KdNodeId) -> &KdNode {
        &self.arena[id.get()]
    }

    /// Insert a point, merging into an existing node when one lies within
    /// the snap tolerance. Returns the id of the node the point ended up in.
    pub fn insert(&mut self, coord: Coord) -> KdNodeId {
        if let Some(id) = self.best_match(coord) {
            self.arena[id.get()].count += 1;
            return id;
        }
        self.insert_exact(coord)
    }

    /// Insert then return the canonical stored coordinate — the snapping
    /// primitive used by the noder.
    pub fn snap(&mut self, coord: Coord) -> Coord {
        let id = self.insert(coord);
        self.arena[id.get()].coord
    }

    /// All nodes whose coordinate lies in the query envelope.
    ///
    /// The result is a superset of the true answer never missing a node;
    /// descent prunes only subtrees that cannot overlap the query.
    pub fn query(&self, env: &Envelope) -> Vec<KdNodeId> {
        let mut out = Vec::new();
        self.query_node(self.root, env, 0, &mut out);
        out
    }

    /// The nearest existing node within tolerance of `coord`, if any.
    fn best_match(&self, coord: Coord) -> Option<KdNodeId> {
        if self.root.is_none() {
            return None;
        }
        let env = Envelope::of_coord(coord).expanded_by(self.tolerance);
        let tol_sq = self.tolerance * self.tolerance;
        let mut best: Option<(KdNodeId, f64)> = None;
        for id in self.query(&env) {
            let d = self.arena[id.get()].coord.distance_sq(&coord);
            if d <= tol_sq && best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    fn insert_exact(&mut self, coord: Coord) -> KdNodeId {
        let Some(root) = self.root else {
            let id = self.push(coord);
            self.root = Some(id);
            return id;
        };
        let mut cur = root;
        let mut depth = 0_usize;
        loop {
            let node = &self.arena[cur.get()];
            let go_left = if depth % 2 == 0 {
                coord.x < node.coord.x
            } else {
                coord.y < node.coord.y
            };
            let child = if go_left { node.left } else { node.right };
            match child {
                Some(next) => {
                    cur = next;
                    depth += 1;
                }
                None => {
                    let id = self.push(coord);
                    let node = &mut self.arena[cur.get()];
                    if go_left {
                        node.left = Some(id);
                    } else {
                        node.right = Some(id);
                    }
                    return id;
                }
            }
        }
    }

    fn push(&mut self, coord: Coord) -> KdNodeId {
        let id = KdNodeId::new(self.arena.len());
        self.arena.push(KdNode {
            coord,
            count: 1,
            left: None,
            right: None,
        });
        id
    }

    fn query_node(
        &self,
        id: Option<KdNodeId>,
        env: &Envelope,
        depth: usize,
        out: &mut Vec<KdNodeId>,
    ) {
        let Some(id) = id else {
            return;
        };
        let node = &self.arena[id.get()];
        // Prune on the split axis only: the subtree's other axis is unbounded.
        let (split, lo, hi) = if depth % 2 == 0 {
            (node.coord.x, env.min_x, env.max_x)
        } else {
            (node.coord.y, env.min_y, env.max_y)
        };
        if lo < split {
            self.query_node(node.left, env, depth + 1, out);
        }
        if env.contains_coord(&node.coord) {
            out.push(id);
        }
        if hi >= split {
            self.query_node(node.right, env, depth + 1, out);
        }
    }
}
