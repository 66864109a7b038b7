//! Planar geometry for event regions and partition cells.
//!
//! Points are plain `[f64; 2]` pairs; polygons carry one counter-clockwise
//! exterior ring and any number of clockwise hole rings.

use thiserror::Error;

pub mod utils_2d;

pub mod polygon;
pub use polygon::{Aabb2, Polygon};

mod planar_graph;

pub mod split;
pub use split::{PlanarSplitKernel, SplitKernel};

#[cfg(test)]
mod tests_split;

pub type Point2 = [f64; 2];

/// Default tolerance for snapping, containment and shape equality.
///
/// Sized for diagrams drawn in the unit square.
pub const EPSILON: f64 = 1e-9;

/// Errors raised by polygon validation and the split primitive.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("ring has {count} distinct vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("polygon has non-finite coordinates")]
    NonFinite,

    #[error("polygon encloses no area")]
    ZeroArea,

    #[error("polygon boundary touches itself near ({}, {})", .at[0], .at[1])]
    SelfIntersecting { at: Point2 },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
