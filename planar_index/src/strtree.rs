// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk-loaded sort-tile-recursive (STR) bounding-box tree.

use alloc::vec::Vec;

use crate::types::Envelope;

/// Default leaf/node fan-out. Smaller capacities favour query-heavy
/// workloads with tight clusters; cascaded union uses 4.
pub const DEFAULT_NODE_CAPACITY: usize = 10;

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
enum Kind {
    /// Indices into the item store.
    Leaf(Vec<usize>),
    Internal(Vec<NodeIdx>),
}

#[derive(Clone, Debug)]
struct Node {
    bbox: Envelope,
    kind: Kind,
}

/// A packed, immutable bounding-box tree built once from a complete item
/// list.
///
/// Construction sorts items by x-centre, tiles them into vertical slices,
/// sorts each slice by y-centre, and packs fixed-capacity leaves, repeating
/// the same packing over node levels until a single root remains. The
/// result is balanced with near-optimal fan-out in O(n log n); there is no
/// incremental insert.
///
/// Queries return a superset of the items whose envelope intersects the
/// window (callers re-check exact geometry); false negatives cannot occur.
#[derive(Clone, Debug)]
pub struct StrTree<P> {
    items: Vec<(Envelope, P)>,
    arena: Vec<Node>,
    root: Option<NodeIdx>,
}

impl<P> StrTree<P> {
    /// Bulk-build with the default node capacity.
    pub fn build(items: Vec<(Envelope, P)>) -> Self {
        Self::build_with_node_capacity(DEFAULT_NODE_CAPACITY, items)
    }

    /// Bulk-build with an explicit node capacity (`>= 2`).
    pub fn build_with_node_capacity(capacity: usize, items: Vec<(Envelope, P)>) -> Self {
        debug_assert!(capacity >= 2, "node capacity must be at least 2");
        let mut tree = Self {
            items,
            arena: Vec::new(),
            root: None,
        };
        if tree.items.is_empty() {
            return tree;
        }

        // Leaf level: STR packing of item indices.
        let mut order: Vec<usize> = (0..tree.items.len()).collect();
        let level = pack_level(
            &mut order,
            capacity,
            |items: &Vec<(Envelope, P)>, &i| items[i].0,
            &tree.items,
        );
        let mut level: Vec<NodeIdx> = level
            .into_iter()
            .map(|chunk| {
                let bbox = chunk
                    .iter()
                    .fold(Envelope::EMPTY, |acc, &i| {
                        acc.expanded_to_include(&tree.items[i].0)
                    });
                let idx = NodeIdx::new(tree.arena.len());
                tree.arena.push(Node {
                    bbox,
                    kind: Kind::Leaf(chunk),
                });
                idx
            })
            .collect();

        // Promote until one root remains, re-tiling each level.
        while level.len() > 1 {
            let packed = pack_level(
                &mut level,
                capacity,
                |arena: &Vec<Node>, idx: &NodeIdx| arena[idx.get()].bbox,
                &tree.arena,
            );
            level = packed
                .into_iter()
                .map(|chunk| {
                    let bbox = chunk.iter().fold(Envelope::EMPTY, |acc, c| {
                        acc.expanded_to_include(&tree.arena[c.get()].bbox)
                    });
                    let idx = NodeIdx::new(tree.arena.len());
                    tree.arena.push(Node {
                        bbox,
                        kind: Kind::Internal(chunk),
                    });
                    idx
                })
                .collect();
        }
        tree.root = level.into_iter().next();
        tree
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items whose envelope intersects the query window.
    pub fn query(&self, env: &Envelope) -> Vec<&P> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = Vec::new();
        stack.push(root);
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx.get()];
            if !node.bbox.intersects(env) {
                continue;
            }
            match &node.kind {
                Kind::Leaf(items) => {
                    for &i in items {
                        let (item_env, item) = &self.items[i];
                        if item_env.intersects(env) {
                            out.push(item);
                        }
                    }
                }
                Kind::Internal(children) => stack.extend(children.iter().copied()),
            }
        }
        out
    }

    /// Items in depth-first leaf order — spatially clustered, so adjacent
    /// entries tend to be close. Cascaded union consumes this ordering.
    pub fn items_in_tree_order(&self) -> Vec<&P> {
        let mut out = Vec::with_capacity(self.items.len());
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = Vec::new();
        stack.push(root);
        while let Some(idx) = stack.pop() {
            match &self.arena[idx.get()].kind {
                Kind::Leaf(items) => {
                    for &i in items {
                        out.push(&self.items[i].1);
                    }
                }
                Kind::Internal(children) => {
                    // Reverse so the depth-first order matches build order.
                    stack.extend(children.iter().rev().copied());
                }
            }
        }
        out
    }
}

/// Tile a level of entries into chunks of at most `capacity`, STR style:
/// sort by x-centre, slice into `ceil(sqrt(chunk_count))` vertical slices,
/// sort each slice by y-centre, then chunk.
fn pack_level<E: Copy, S>(
    entries: &mut Vec<E>,
    capacity: usize,
    env_of: impl Fn(&S, &E) -> Envelope,
    store: &S,
) -> Vec<Vec<E>> {
    let n = entries.len();
    let chunk_count = n.div_ceil(capacity);
    let mut slice_count = 1_usize;
    while slice_count * slice_count < chunk_count {
        slice_count += 1;
    }
    entries.sort_by(|a, b| {
        env_of(store, a)
            .centre_x()
            .total_cmp(&env_of(store, b).centre_x())
    });
    let slice_size = n.div_ceil(slice_count);
    let mut out = Vec::with_capacity(chunk_count);
    for slice in entries.chunks_mut(slice_size) {
        slice.sort_by(|a, b| {
            env_of(store, a)
                .centre_y()
                .total_cmp(&env_of(store, b).centre_y())
        });
        for chunk in slice.chunks(capacity) {
            out.push(chunk.to_vec());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_items(n: usize) -> Vec<(Envelope, usize)> {
        let mut out = Vec::new();
        for y in 0..n {
            for x in 0..n {
                let x0 = x as f64 * 10.0;
                let y0 = y as f64 * 10.0;
                out.push((Envelope::new(x0, y0, x0 + 8.0, y0 + 8.0), y * n + x));
            }
        }
        out
    }

    #[test]
    fn empty_build_queries_nothing() {
        let tree: StrTree<u32> = StrTree::build(Vec::new());
        assert!(tree.is_empty());
        assert!(tree.query(&Envelope::new(-1e9, -1e9, 1e9, 1e9)).is_empty());
        assert!(tree.items_in_tree_order().is_empty());
    }

    #[test]
    fn query_returns_superset_of_true_hits() {
        let items = grid_items(17);
        let tree = StrTree::build(items.clone());
        let window = Envelope::new(23.0, 31.0, 77.0, 59.0);
        let hits = tree.query(&window);
        for (env, id) in &items {
            if env.intersects(&window) {
                assert!(hits.contains(&id), "item {id} missing from query");
            }
        }
    }

    #[test]
    fn small_capacity_still_finds_everything() {
        let items = grid_items(9);
        let total = items.len();
        let tree = StrTree::build_with_node_capacity(4, items);
        let all = tree.query(&Envelope::new(-1.0, -1.0, 1e4, 1e4));
        assert_eq!(all.len(), total);
    }

    #[test]
    fn tree_order_visits_every_item_once() {
        let items = grid_items(11);
        let total = items.len();
        let tree = StrTree::build(items);
        let mut seen: Vec<usize> = tree.items_in_tree_order().into_iter().copied().collect();
        seen.sort_unstable();
        let expect: Vec<usize> = (0..total).collect();
        assert_eq!(seen, expect);
    }

    #[test]
    fn tree_order_clusters_neighbours() {
        // In a spatially clustered order, consecutive grid cells should on
        // average be far closer than a random shuffle of the same items.
        let n = 16_usize;
        let items = grid_items(n);
        let tree = StrTree::build(items);
        let order = tree.items_in_tree_order();
        let mut total_dist_sq = 0.0;
        for pair in order.windows(2) {
            let (a, b) = (*pair[0], *pair[1]);
            let (ax, ay) = ((a % n) as f64, (a / n) as f64);
            let (bx, by) = ((b % n) as f64, (b / n) as f64);
            total_dist_sq += (ax - bx) * (ax - bx) + (ay - by) * (ay - by);
        }
        let mean_sq = total_dist_sq / (n * n - 1) as f64;
        // A random order would average ~85 (squared cells) on a 16x16 grid.
        assert!(
            mean_sq < 16.0,
            "tree order is not spatially clustered: {mean_sq}"
        );
    }
}
