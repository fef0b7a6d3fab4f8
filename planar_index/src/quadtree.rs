// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive quadrant-subdivision index over envelopes with payloads.

use alloc::vec::Vec;

use crate::types::Envelope;

/// Default bound on subdivision depth.
///
/// Coincident and near-duplicate envelopes would otherwise subdivide
/// forever; past the cap, items accumulate in the node's local list.
pub const DEFAULT_MAX_DEPTH: usize = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node<P> {
    /// Square region this node covers.
    square: Envelope,
    children: [Option<NodeIdx>; 4],
    items: Vec<(Envelope, P)>,
}

impl<P> Node<P> {
    fn new(square: Envelope) -> Self {
        Self {
            square,
            children: [None; 4],
            items: Vec::new(),
        }
    }
}

/// A quadtree over items keyed by their bounding envelope.
///
/// Each node covers a bounding square; an item is stored at the deepest
/// node whose quadrant fully contains the item's envelope. The root square
/// grows to cover items inserted outside it, so any mix of envelopes is
/// accepted. Queries return a superset of the items whose envelope
/// intersects the query window — never a subset.
#[derive(Clone, Debug)]
pub struct Quadtree<P> {
    arena: Vec<Node<P>>,
    root: Option<NodeIdx>,
    max_depth: usize,
    len: usize,
}

impl<P> Default for Quadtree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Quadtree<P> {
    /// Create an empty quadtree with the default depth cap.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create an empty quadtree with an explicit depth cap.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            max_depth,
            len: 0,
        }
    }

    /// Number of items inserted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an item with its bounding envelope. Empty envelopes are
    /// ignored: they intersect nothing and could never be returned.
    pub fn insert(&mut self, env: Envelope, item: P) {
        if env.is_empty() {
            return;
        }
        self.ensure_root_covers(&env);
        let root = self.root.expect("root exists after ensure_root_covers");
        self.insert_at(root, 0, env, item);
        self.len += 1;
    }

    /// All items whose envelope intersects the query window.
    pub fn query(&self, env: &Envelope) -> Vec<&P> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.query_node(root, env, &mut out);
        }
        out
    }

    fn ensure_root_covers(&mut self, env: &Envelope) {
        if self.root.is_none() {
            // Initial root: the item envelope squared up, with a non-zero side
            // so degenerate point envelopes still subdivide.
            let side = env.width().max(env.height()).max(1.0);
            let square = Envelope::new(env.min_x, env.min_y, env.min_x + side, env.min_y + side);
            let idx = NodeIdx::new(self.arena.len());
            self.arena.push(Node::new(square));
            self.root = Some(idx);
            return;
        }
        // Double the root square away from the item until it covers it; the
        // old root becomes one quadrant of each new root, keeping alignment.
        // The current root must be re-read every pass, since each doubling
        // replaces it.
        loop {
            let root = self.root.expect("root exists");
            let square = self.arena[root.get()].square;
            if contains_env(&square, env) {
                break;
            }
            let side = square.max_x - square.min_x;
            let min_x = if env.min_x < square.min_x {
                square.min_x - side
            } else {
                square.min_x
            };
            let min_y = if env.min_y < square.min_y {
                square.min_y - side
            } else {
                square.min_y
            };
            let new_square = Envelope::new(min_x, min_y, min_x + 2.0 * side, min_y + 2.0 * side);
            let quadrant = quadrant_of(&new_square, &square);
            let idx = NodeIdx::new(self.arena.len());
            let mut node = Node::new(new_square);
            node.children[quadrant] = Some(root);
            self.arena.push(node);
            self.root = Some(idx);
        }
        let root = self.root.expect("root exists");
        debug_assert!(
            contains_env(&self.arena[root.get()].square, env),
            "root square must cover the inserted envelope"
        );
    }

    fn insert_at(&mut self, node: NodeIdx, depth: usize, env: Envelope, item: P) {
        if depth >= self.max_depth {
            self.arena[node.get()].items.push((env, item));
            return;
        }
        let square = self.arena[node.get()].square;
        for quadrant in 0..4 {
            let child_square = quadrant_square(&square, quadrant);
            if contains_env(&child_square, &env) {
                let child = match self.arena[node.get()].children[quadrant] {
                    Some(c) => c,
                    None => {
                        let idx = NodeIdx::new(self.arena.len());
                        self.arena.push(Node::new(child_square));
                        self.arena[node.get()].children[quadrant] = Some(idx);
                        idx
                    }
                };
                self.insert_at(child, depth + 1, env, item);
                return;
            }
        }
        // Straddles the quadrant split lines: this node is as deep as it fits.
        self.arena[node.get()].items.push((env, item));
    }

    fn query_node<'a>(&'a self, node: NodeIdx, env: &Envelope, out: &mut Vec<&'a P>) {
        let n = &self.arena[node.get()];
        if !n.square.intersects(env) {
            return;
        }
        for (item_env, item) in &n.items {
            if item_env.intersects(env) {
                out.push(item);
            }
        }
        for child in n.children.iter().flatten() {
            self.query_node(*child, env, out);
        }
    }
}

fn contains_env(outer: &Envelope, inner: &Envelope) -> bool {
    outer.min_x <= inner.min_x
        && outer.min_y <= inner.min_y
        && outer.max_x >= inner.max_x
        && outer.max_y >= inner.max_y
}

/// Quadrant index: bit 0 is east, bit 1 is north.
fn quadrant_square(square: &Envelope, quadrant: usize) -> Envelope {
    let mid_x = square.centre_x();
    let mid_y = square.centre_y();
    let (min_x, max_x) = if quadrant & 1 == 0 {
        (square.min_x, mid_x)
    } else {
        (mid_x, square.max_x)
    };
    let (min_y, max_y) = if quadrant & 2 == 0 {
        (square.min_y, mid_y)
    } else {
        (mid_y, square.max_y)
    };
    Envelope::new(min_x, min_y, max_x, max_y)
}

fn quadrant_of(outer: &Envelope, inner: &Envelope) -> usize {
    let east = inner.min_x > outer.centre_x() - 1e-9 * (outer.max_x - outer.min_x);
    let north = inner.min_y > outer.centre_y() - 1e-9 * (outer.max_y - outer.min_y);
    usize::from(east) | usize::from(north) << 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query_basic() {
        let mut qt = Quadtree::new();
        qt.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), 1_u32);
        qt.insert(Envelope::new(5.0, 5.0, 6.0, 6.0), 2);
        qt.insert(Envelope::new(0.5, 0.5, 5.5, 5.5), 3);

        let hits = qt.query(&Envelope::new(0.0, 0.0, 2.0, 2.0));
        assert!(hits.contains(&&1));
        assert!(hits.contains(&&3));
        assert!(!hits.contains(&&2));
    }

    #[test]
    fn grows_root_for_items_outside_initial_square() {
        let mut qt = Quadtree::new();
        qt.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), 1_u32);
        qt.insert(Envelope::new(-100.0, -100.0, -99.0, -99.0), 2);
        qt.insert(Envelope::new(1000.0, 1000.0, 1001.0, 1001.0), 3);

        let all = qt.query(&Envelope::new(-1e6, -1e6, 1e6, 1e6));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn repeated_root_doubling_terminates_in_each_direction() {
        // Each insert is far outside the current root square, so covering it
        // takes many doublings, alternating which side the root grows toward.
        let mut qt = Quadtree::new();
        qt.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), 0_u32);
        qt.insert(Envelope::new(-4000.0, 0.0, -3999.0, 1.0), 1);
        qt.insert(Envelope::new(0.0, -4000.0, 1.0, -3999.0), 2);
        qt.insert(Envelope::new(8000.0, 8000.0, 8001.0, 8001.0), 3);

        for (env, id) in [
            (Envelope::new(-0.5, -0.5, 1.5, 1.5), 0_u32),
            (Envelope::new(-4000.5, 0.5, -3999.5, 0.75), 1),
            (Envelope::new(0.5, -4000.5, 0.75, -3999.5), 2),
            (Envelope::new(8000.5, 8000.5, 8000.75, 8000.75), 3),
        ] {
            let hits = qt.query(&env);
            assert!(hits.contains(&&id), "item {id} missing from its window");
        }
    }

    #[test]
    fn coincident_envelopes_do_not_recurse_unboundedly() {
        let mut qt = Quadtree::new();
        let env = Envelope::new(2.0, 2.0, 2.0, 2.0);
        for i in 0..5000_u32 {
            qt.insert(env, i);
        }
        let hits = qt.query(&Envelope::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(hits.len(), 5000);
    }

    #[test]
    fn no_false_negatives_against_linear_scan() {
        let mut qt = Quadtree::new();
        let mut envs = Vec::new();
        // Deterministic pseudo-random layout.
        let mut state = 0x9e37_79b9_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };
        for i in 0..500_u32 {
            let x = next() * 100.0 - 50.0;
            let y = next() * 100.0 - 50.0;
            let env = Envelope::new(x, y, x + next() * 5.0, y + next() * 5.0);
            envs.push((env, i));
            qt.insert(env, i);
        }
        let window = Envelope::new(-10.0, -10.0, 10.0, 10.0);
        let hits = qt.query(&window);
        for (env, i) in &envs {
            if env.intersects(&window) {
                assert!(hits.contains(&i), "item {i} missing from query result");
            }
        }
    }
}
