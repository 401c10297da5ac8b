//! Physics step configuration.
//!
//! Screen dimensions, light radius, and the debug toggle travel as an
//! explicit value handed to [`PhysicsSystem`](crate::step::PhysicsSystem) at
//! construction -- never process-wide globals -- so hosts (and tests) can run
//! steps with different screens side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PhysicsConfig
// ---------------------------------------------------------------------------

/// Configuration for the physics step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Screen width in pixels.
    pub window_width_px: f32,
    /// Screen height in pixels.
    pub window_height_px: f32,
    /// Normalized screen-space distance beyond which a shadow is too far
    /// from its light source to render.
    pub light_radius: f32,
    /// Debug mode toggle, threaded through instead of a global.
    pub debug: bool,
}

impl PhysicsConfig {
    /// Screen dimensions as a vector, for normalizing positions.
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width_px, self.window_height_px)
    }

    /// Map a world position into normalized screen space.
    pub fn normalized(&self, position: Vec2) -> Vec2 {
        position / self.window_size()
    }

    /// The world-space distance at which shadow scale falls off to zero:
    /// `light_radius * max(width, height)`.
    pub fn max_shadow_distance(&self) -> f32 {
        self.light_radius * self.window_width_px.max(self.window_height_px)
    }
}

impl Default for PhysicsConfig {
    /// The shipped scene defaults: 1200 x 800 screen, light radius 0.7.
    fn default() -> Self {
        Self {
            window_width_px: 1200.0,
            window_height_px: 800.0,
            light_radius: 0.7,
            debug: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_screen_and_radius() {
        let config = PhysicsConfig::default();
        assert_eq!(config.window_width_px, 1200.0);
        assert_eq!(config.window_height_px, 800.0);
        assert_eq!(config.light_radius, 0.7);
        assert!(!config.debug);
    }

    #[test]
    fn max_shadow_distance_uses_longer_side() {
        let config = PhysicsConfig::default();
        assert_eq!(config.max_shadow_distance(), 0.7 * 1200.0);

        let tall = PhysicsConfig {
            window_width_px: 800.0,
            window_height_px: 1200.0,
            ..Default::default()
        };
        assert_eq!(tall.max_shadow_distance(), 0.7 * 1200.0);
    }

    #[test]
    fn normalized_divides_by_window() {
        let config = PhysicsConfig::default();
        let n = config.normalized(Vec2::new(600.0, 400.0));
        assert_eq!(n, Vec2::new(0.5, 0.5));
    }
}
