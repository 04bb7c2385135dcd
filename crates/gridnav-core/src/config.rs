//! Grid configuration and validation.

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Errors raised when a [`GridConfig`] cannot describe a usable grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("node radius must be positive (got {0})")]
    NonPositiveRadius(f32),
    #[error("derived grid of {0}x{1} cells contains no nodes")]
    Empty(i32, i32),
}

/// World-space description of a uniform grid.
///
/// The grid lies on the world X/Z plane, centered on `origin`;
/// `world_size.x` spans world X and `world_size.y` spans world Z.
/// `node_radius` is half of one node's side length. Integer dimensions are
/// derived once as `round(size / (2 * radius))` per axis and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// World-space center of the grid.
    pub origin: Vec3,
    /// Physical extent: width (X) by depth (Z).
    pub world_size: Vec2,
    /// Half of one node's side length. Must be positive.
    pub node_radius: f32,
}

impl GridConfig {
    /// Create a new configuration.
    pub const fn new(origin: Vec3, world_size: Vec2, node_radius: f32) -> Self {
        Self {
            origin,
            world_size,
            node_radius,
        }
    }

    /// Derived integer dimensions `(size_x, size_y)`.
    #[inline]
    pub fn grid_size(&self) -> (i32, i32) {
        let diameter = self.node_radius * 2.0;
        (
            (self.world_size.x / diameter).round() as i32,
            (self.world_size.y / diameter).round() as i32,
        )
    }

    /// Check that the configuration describes at least one node.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.node_radius <= 0.0 {
            return Err(GridError::NonPositiveRadius(self.node_radius));
        }
        let (size_x, size_y) = self.grid_size();
        if size_x < 1 || size_y < 1 {
            return Err(GridError::Empty(size_x, size_y));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_dimensions_from_radius() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), 0.5);
        assert_eq!(config.grid_size(), (5, 5));

        let config = GridConfig::new(Vec3::ZERO, Vec2::new(30.0, 20.0), 0.5);
        assert_eq!(config.grid_size(), (30, 20));
    }

    #[test]
    fn dimensions_round_to_nearest() {
        // 9.4 world units over diameter 1.0 rounds down, 9.6 rounds up.
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(9.4, 9.6), 0.5);
        assert_eq!(config.grid_size(), (9, 10));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(config.validate(), Err(GridError::NonPositiveRadius(0.0)));

        let config = GridConfig::new(Vec3::ZERO, Vec2::new(5.0, 5.0), -1.0);
        assert_eq!(config.validate(), Err(GridError::NonPositiveRadius(-1.0)));
    }

    #[test]
    fn rejects_empty_grid() {
        let config = GridConfig::new(Vec3::ZERO, Vec2::new(0.1, 5.0), 0.5);
        assert!(matches!(config.validate(), Err(GridError::Empty(0, _))));
    }

    #[test]
    fn valid_config_passes() {
        let config = GridConfig::new(Vec3::new(3.0, 1.0, -2.0), Vec2::new(10.0, 10.0), 0.5);
        assert_eq!(config.validate(), Ok(()));
    }
}
