// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar Overlay: polygon union over a noded half-edge graph.
//!
//! The crate layers on [`planar_index`] and [`planar_noding`]:
//!
//! - [`geom`]: [`Ring`], [`Polygon`] and [`Geometry`], the linear
//!   geometry model overlay operates on.
//! - [`validate`]: ring validity checks ([`validate_ring`]) run before
//!   any overlay, so failures surface as typed errors instead of
//!   corrupt output.
//! - [`graph`]: the half-edge graph ([`EdgeGraph`]) with
//!   counter-clockwise origin cycles and face traversal.
//! - [`overlay`]: pairwise union ([`union_polygons`],
//!   [`union_geometries`]).
//! - [`union`]: cascaded union of many polygons ([`CascadedUnion`]),
//!   ordered by a sort-tile-recursive packing so merges stay local.
//!
//! With the `kurbo_adapter` feature, the `kurbo_adapter` module
//! converts between `kurbo::BezPath` outlines and overlay geometry by
//! flattening curves at a caller-chosen tolerance.
//!
//! # Example
//!
//! ```rust
//! use planar_index::Coord;
//! use planar_overlay::{CascadedUnion, Polygon, Ring};
//!
//! let square = |x0: f64, y0: f64| {
//!     Polygon::from_shell(Ring::new(vec![
//!         Coord::new(x0, y0),
//!         Coord::new(x0 + 2.0, y0),
//!         Coord::new(x0 + 2.0, y0 + 2.0),
//!         Coord::new(x0, y0 + 2.0),
//!     ]))
//! };
//! // Three overlapping squares dissolve into one strip.
//! let g = CascadedUnion::new(0.0)
//!     .union(&[square(0.0, 0.0), square(1.0, 0.0), square(2.0, 0.0)])
//!     .unwrap();
//! assert_eq!(g.polygons().len(), 1);
//! assert_eq!(g.area(), 8.0);
//! ```

#![no_std]

extern crate alloc;

pub mod geom;
pub mod graph;
#[cfg(feature = "kurbo_adapter")]
pub mod kurbo_adapter;
pub mod overlay;
pub mod union;
pub mod validate;

pub use geom::{Geometry, Polygon, Ring};
pub use graph::{EdgeFlags, EdgeGraph, EdgeId, HalfEdge};
pub use overlay::{union_geometries, union_polygons};
pub use union::{CascadedUnion, MergePolicy};
pub use validate::validate_ring;
