// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar Index: spatial index structures for planar topology work.
//!
//! This crate holds the coordinate/envelope primitives and the three index
//! structures the rest of the workspace is built on:
//!
//! - [`KdTree`]: a 2D point index whose insert merges near-duplicate points
//!   within a snap tolerance — the snapping primitive used when noding.
//! - [`Quadtree`]: recursive quadrant subdivision over envelopes, with a
//!   depth cap so coincident envelopes cannot recurse unboundedly.
//! - [`StrTree`]: a sort-tile-recursive bounding-box tree, bulk-built once
//!   from a complete item list and immutable (query-only) thereafter.
//!
//! All three share one query guarantee: the result is a superset of the
//! items whose bounding region truly intersects the query envelope. False
//! positives are permitted — callers re-check with exact geometry — but
//! false negatives never occur.
//!
//! Trees are arenas of records addressed by index, so there are no interior
//! pointers to chase and a built tree is safe to share across readers as
//! long as nothing mutates it.
//!
//! # Example
//!
//! ```rust
//! use planar_index::{Coord, Envelope, KdTree, StrTree};
//!
//! // Snap-merging point index.
//! let mut kd = KdTree::new(0.001);
//! let a = kd.insert(Coord::new(1.0, 1.0));
//! let b = kd.insert(Coord::new(1.0, 1.0));
//! assert_eq!(a, b);
//! assert!(kd.node(a).is_repeated());
//!
//! // Bulk-loaded bounding-box tree.
//! let tree = StrTree::build(vec![
//!     (Envelope::new(0.0, 0.0, 1.0, 1.0), "a"),
//!     (Envelope::new(5.0, 5.0, 6.0, 6.0), "b"),
//! ]);
//! let hits = tree.query(&Envelope::new(0.5, 0.5, 2.0, 2.0));
//! assert_eq!(hits, vec![&"a"]);
//! ```
//!
//! ## Float semantics
//!
//! Coordinates are `f64` and assumed finite; the `z`/`m` ordinates of
//! [`Coord`] may carry the [`Coord::NO_ORDINATE`] sentinel and never
//! participate in index structure.

#![no_std]

extern crate alloc;

pub mod kdtree;
pub mod quadtree;
pub mod strtree;
pub mod types;

pub use kdtree::{KdNode, KdNodeId, KdTree};
pub use quadtree::Quadtree;
pub use strtree::StrTree;
pub use types::{Coord, Envelope};
