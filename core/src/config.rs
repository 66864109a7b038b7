use crate::error::{SetsError, SetsResult};
use crate::geometry::EPSILON;
use serde::{Deserialize, Serialize};

/// Tunables of a [`SetsSpace`](crate::space::SetsSpace).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Snapping and equality tolerance, in universe units.
    pub tolerance: f64,
    /// Substitute a default triangle or square when a polygon or box is
    /// declared without points.
    pub allow_default_shapes: bool,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            allow_default_shapes: false,
        }
    }
}

impl SpaceConfig {
    /// Reject a tolerance that is not a positive finite number.
    pub fn validate(&self) -> SetsResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SetsError::Validation(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
