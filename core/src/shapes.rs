//! Declarative event shapes and their construction into polygons.
//!
//! Ellipses are approximated by a regular polygon with `4 * resolution`
//! vertices. Rotation angles are in degrees, counter-clockwise; ellipses turn
//! about their center, polygons and boxes about their bounding-box center.

use crate::config::SpaceConfig;
use crate::error::{SetsError, SetsResult};
use crate::geometry::{Aabb2, Point2, Polygon};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Triangle used for a polygon declared without points.
pub const DEFAULT_TRIANGLE: [Point2; 3] = [[0.25, 0.25], [0.5, 0.75], [0.75, 0.25]];

/// Square used for a box declared without corners.
pub const DEFAULT_SQUARE: [Point2; 4] = [[0.25, 0.25], [0.25, 0.75], [0.75, 0.75], [0.75, 0.25]];

/// Segments per quarter circle when none is given.
pub const DEFAULT_RESOLUTION: usize = 16;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventShape {
    Ellipse {
        loc: Point2,
        /// Semi-axis along x before rotation.
        width: f64,
        /// Semi-axis along y before rotation.
        height: f64,
        #[serde(default)]
        angle: f64,
        #[serde(default = "default_resolution")]
        resolution: usize,
    },
    Polygon {
        #[serde(default)]
        points: Option<Vec<Point2>>,
        #[serde(default)]
        angle: f64,
    },
    Box {
        #[serde(default)]
        corners: Option<Vec<Point2>>,
        #[serde(default)]
        angle: f64,
    },
}

/// A constructed shape: validated geometry plus its declared area.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltShape {
    pub geometry: Polygon,
    pub area: f64,
}

impl EventShape {
    pub fn ellipse(loc: Point2, width: f64, height: f64) -> Self {
        EventShape::Ellipse {
            loc,
            width,
            height,
            angle: 0.0,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub fn polygon(points: Vec<Point2>) -> Self {
        EventShape::Polygon {
            points: Some(points),
            angle: 0.0,
        }
    }

    pub fn rect(corners: Vec<Point2>) -> Self {
        EventShape::Box {
            corners: Some(corners),
            angle: 0.0,
        }
    }

    /// Same shape turned by `degrees`.
    pub fn rotated(mut self, degrees: f64) -> Self {
        match &mut self {
            EventShape::Ellipse { angle, .. }
            | EventShape::Polygon { angle, .. }
            | EventShape::Box { angle, .. } => *angle = degrees,
        }
        self
    }

    pub fn build(&self, config: &SpaceConfig) -> SetsResult<BuiltShape> {
        let built = match self {
            EventShape::Ellipse {
                loc,
                width,
                height,
                angle,
                resolution,
            } => build_ellipse(*loc, *width, *height, *angle, *resolution)?,
            EventShape::Polygon { points, angle } => {
                let points = match points {
                    Some(points) => points.clone(),
                    None => default_points("polygon", &DEFAULT_TRIANGLE, config)?,
                };
                if points.len() < 3 {
                    return Err(SetsError::Validation(format!(
                        "polygon has {} points, at least 3 are required",
                        points.len()
                    )));
                }
                build_polygon(points, *angle)
            }
            EventShape::Box { corners, angle } => {
                let corners = match corners {
                    Some(corners) => corners.clone(),
                    None => default_points("box", &DEFAULT_SQUARE, config)?,
                };
                if corners.len() != 4 {
                    return Err(SetsError::Validation(format!(
                        "box has {} corners, a box must have 4 corners",
                        corners.len()
                    )));
                }
                build_polygon(corners, *angle)
            }
        };

        built.geometry.validate(config.tolerance)?;
        Ok(built)
    }
}

fn default_points(kind: &str, fallback: &[Point2], config: &SpaceConfig) -> SetsResult<Vec<Point2>> {
    if !config.allow_default_shapes {
        return Err(SetsError::Validation(format!("no points given for {}", kind)));
    }
    warn!(kind, points = ?fallback, "no points given, using default shape");
    Ok(fallback.to_vec())
}

fn build_ellipse(loc: Point2, width: f64, height: f64, angle: f64, resolution: usize) -> SetsResult<BuiltShape> {
    if !(width > 0.0 && height > 0.0) {
        return Err(SetsError::Validation(format!(
            "ellipse size must be positive, got {} x {}",
            width, height
        )));
    }
    if resolution == 0 {
        return Err(SetsError::Validation("ellipse resolution must be at least 1".to_string()));
    }

    let center = na::Point2::new(loc[0], loc[1]);
    let rotation = na::Rotation2::new(angle.to_radians());
    let scale = na::Matrix2::new(width, 0.0, 0.0, height);
    let segments = 4 * resolution;

    let points = (0..segments)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / segments as f64;
            let offset = rotation * (scale * na::Vector2::new(theta.cos(), theta.sin()));
            let p = center + offset;
            [p.x, p.y]
        })
        .collect();

    Ok(BuiltShape {
        geometry: Polygon::new(points),
        area: std::f64::consts::PI * width * height,
    })
}

fn build_polygon(points: Vec<Point2>, angle: f64) -> BuiltShape {
    let geometry = Polygon::new(rotate_about_center(points, angle));
    let area = geometry.area();
    BuiltShape { geometry, area }
}

/// Rotate points by `angle` degrees about their bounding-box center.
fn rotate_about_center(points: Vec<Point2>, angle: f64) -> Vec<Point2> {
    if angle == 0.0 {
        return points;
    }
    let pivot = Aabb2::from_points(&points).center();
    let pivot = na::Point2::new(pivot[0], pivot[1]);
    let rotation = na::Rotation2::new(angle.to_radians());
    points
        .into_iter()
        .map(|p| {
            let q = pivot + rotation * (na::Point2::new(p[0], p[1]) - pivot);
            [q.x, q.y]
        })
        .collect()
}
