// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for topology operations.

use core::fmt;

use planar_index::Coord;

/// What made a degenerate input degenerate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DegenerateKind {
    /// A ring enclosing no area.
    ZeroAreaRing,
    /// A NaN or infinite coordinate reached the noder.
    NonFiniteCoordinate,
}

impl fmt::Display for DegenerateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAreaRing => write!(f, "zero-area ring"),
            Self::NonFiniteCoordinate => write!(f, "non-finite coordinate"),
        }
    }
}

/// A validity failure in input geometry.
///
/// These are deterministic: a given invalid input always fails the same
/// way. There are no retry semantics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// Two consecutive vertices of a ring are identical.
    DuplicateVertex {
        /// The repeated coordinate.
        coord: Coord,
    },
    /// A ring crosses itself at a point.
    SelfIntersection {
        /// The crossing point.
        coord: Coord,
    },
    /// A ring retraces one of its own segments without crossing.
    SelfOverlap {
        /// Start of the retraced span.
        p0: Coord,
        /// End of the retraced span.
        p1: Coord,
    },
    /// Degenerate input reached the noder.
    DegenerateInput {
        /// The kind of degeneracy.
        kind: DegenerateKind,
        /// A coordinate locating the problem.
        coord: Coord,
    },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateVertex { coord } => {
                write!(f, "duplicate vertex at ({}, {})", coord.x, coord.y)
            }
            Self::SelfIntersection { coord } => {
                write!(f, "ring self-intersection at ({}, {})", coord.x, coord.y)
            }
            Self::SelfOverlap { p0, p1 } => write!(
                f,
                "ring self-overlap from ({}, {}) to ({}, {})",
                p0.x, p0.y, p1.x, p1.y
            ),
            Self::DegenerateInput { kind, coord } => {
                write!(f, "degenerate input ({kind}) at ({}, {})", coord.x, coord.y)
            }
        }
    }
}

impl core::error::Error for TopologyError {}
