// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascaded union of many polygons.
//!
//! Unioning a large set pairwise in input order degrades badly: early
//! results grow into sprawling multi-polygons that every later union
//! must renode in full. The cascade instead packs the inputs into an
//! [`StrTree`] with a small node capacity, reads them back in tree
//! order so spatial neighbours sit next to each other, and unions the
//! ordered list by binary bisection. Most pairwise unions then combine
//! geometries of similar, local extent.

use alloc::vec::Vec;

use planar_index::{Envelope, StrTree};
use planar_noding::TopologyError;

use crate::geom::{Geometry, Polygon};
use crate::overlay::union_geometries;

/// Node capacity used when packing inputs for the cascade.
///
/// Small fanout gives a deeper tree and finer-grained spatial grouping,
/// which matters more here than query speed.
const UNION_NODE_CAPACITY: usize = 4;

/// What to do when a pairwise union inside the cascade fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Abort the cascade and return the error.
    #[default]
    Propagate,
    /// Keep the two operands unmerged and carry on.
    ///
    /// The result may contain overlapping components wherever a merge
    /// was skipped.
    Substitute,
}

/// Cascaded polygon union.
#[derive(Copy, Clone, Debug)]
pub struct CascadedUnion {
    tolerance: f64,
    policy: MergePolicy,
}

impl CascadedUnion {
    /// A cascade with the given noding tolerance and the default
    /// [`MergePolicy::Propagate`].
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            policy: MergePolicy::default(),
        }
    }

    /// Override the merge failure policy.
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Union all input polygons.
    ///
    /// Returns `Empty` for no inputs and the single input unchanged for
    /// one.
    pub fn union(&self, polygons: &[Polygon]) -> Result<Geometry, TopologyError> {
        match polygons {
            [] => Ok(Geometry::Empty),
            [one] => Ok(Geometry::Polygon(one.clone())),
            _ => {
                let tree = StrTree::build_with_node_capacity(
                    UNION_NODE_CAPACITY,
                    polygons.iter().map(|p| (p.envelope(), p)).collect(),
                );
                let ordered: Vec<&Polygon> =
                    tree.items_in_tree_order().into_iter().copied().collect();
                self.binary_union(&ordered)
            }
        }
    }

    fn binary_union(&self, items: &[&Polygon]) -> Result<Geometry, TopologyError> {
        match items {
            [] => Ok(Geometry::Empty),
            [one] => Ok(Geometry::Polygon((*one).clone())),
            [a, b] => self.union_pair(
                &Geometry::Polygon((*a).clone()),
                &Geometry::Polygon((*b).clone()),
            ),
            _ => {
                let mid = items.len() / 2;
                let left = self.binary_union(&items[..mid])?;
                let right = self.binary_union(&items[mid..])?;
                self.union_pair(&left, &right)
            }
        }
    }

    fn union_pair(&self, a: &Geometry, b: &Geometry) -> Result<Geometry, TopologyError> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }
        let env_a = a.envelope();
        let env_b = b.envelope();
        if !env_a.intersects(&env_b) {
            return Ok(combine(a.polygons(), b.polygons()));
        }

        // Only components reaching into the common envelope can
        // interact; everything else rides along unmerged.
        let common = env_a.intersection(&env_b);
        let (a_in, a_out) = split_by_envelope(a.polygons(), &common);
        let (b_in, b_out) = split_by_envelope(b.polygons(), &common);
        let merged = match union_geometries(
            &Geometry::from_polygons(a_in.clone()),
            &Geometry::from_polygons(b_in.clone()),
            self.tolerance,
        ) {
            Ok(g) => g,
            Err(err) => match self.policy {
                MergePolicy::Propagate => return Err(err),
                MergePolicy::Substitute => combine(&a_in, &b_in),
            },
        };
        let mut out = merged.polygons().to_vec();
        out.extend(a_out);
        out.extend(b_out);
        Ok(Geometry::from_polygons(out))
    }
}

fn combine(a: &[Polygon], b: &[Polygon]) -> Geometry {
    let mut out = a.to_vec();
    out.extend_from_slice(b);
    Geometry::from_polygons(out)
}

fn split_by_envelope(polys: &[Polygon], env: &Envelope) -> (Vec<Polygon>, Vec<Polygon>) {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for p in polys {
        if p.envelope().intersects(env) {
            inside.push(p.clone());
        } else {
            outside.push(p.clone());
        }
    }
    (inside, outside)
}
