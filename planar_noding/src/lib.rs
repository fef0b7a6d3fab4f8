// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar Noding: turning arbitrary intersecting line work into a simple
//! (non-crossing) arrangement.
//!
//! Noding is the step that makes planar-graph construction possible: given
//! segments that may cross anywhere, split every segment at every mutual
//! intersection so that the only shared points left are shared endpoints.
//!
//! - [`Segment`] and [`octant`]: directed segments and their direction
//!   buckets.
//! - [`compare_segment_points`]: a deterministic total order for points
//!   along a segment, keyed by the octant, so floating-point noise cannot
//!   reorder splits between segments sharing a point.
//! - [`segment_intersection`]: robust pairwise intersection with collinear
//!   overlaps as an explicit case, built on adaptive-precision orientation
//!   predicates.
//! - [`Noder`]: the driver, using an STR-tree for candidate pairs and a
//!   KD-tree for tolerance snapping.
//!
//! # Example
//!
//! ```rust
//! use planar_index::Coord;
//! use planar_noding::{Noder, Segment};
//!
//! let noder = Noder::new(0.0);
//! let noded = noder
//!     .node(&[
//!         Segment::new(Coord::new(0.0, 0.0), Coord::new(2.0, 2.0)),
//!         Segment::new(Coord::new(0.0, 2.0), Coord::new(2.0, 0.0)),
//!     ])
//!     .unwrap();
//!
//! // The crossing splits both segments at (1, 1).
//! assert_eq!(noded.len(), 4);
//! ```

#![no_std]

extern crate alloc;

pub mod compare;
pub mod error;
pub mod intersect;
pub mod noder;
pub mod segment;

pub use compare::compare_segment_points;
pub use error::{DegenerateKind, TopologyError};
pub use intersect::{SegmentIntersection, orientation, segment_intersection};
pub use noder::Noder;
pub use segment::{Segment, octant};
