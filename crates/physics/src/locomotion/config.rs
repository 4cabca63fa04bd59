//! Locomotion tuning parameters.
//!
//! All values use metric units (meters, seconds) unless otherwise noted.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for the locomotion core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    // ========================================================================
    // Agent Dimensions
    // ========================================================================
    /// Capsule radius (meters). Also the outermost probe-ring radius.
    pub capsule_radius: f32,

    /// Capsule height (meters), feet to crown.
    pub capsule_height: f32,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Horizontal move speed (meters/second) at full input.
    pub speed: f32,

    /// Vertical speed applied on jump (meters/second). Replaces the gravity
    /// accumulator outright rather than adding to it.
    pub jump_velocity: f32,

    /// World gravity vector (meters/second²).
    pub gravity: Vec3,

    /// Multiplier on the gravity vector.
    pub gravity_scale: f32,

    // ========================================================================
    // Input Smoothing
    // ========================================================================
    /// Forward raw axis values without smoothing.
    pub use_raw_input: bool,

    /// Acceleration rate for the input accumulator, in full-deflections per
    /// second: 1 means one second from rest to full input, 2 means half a
    /// second.
    pub input_acceleration: f32,

    /// Deceleration rate back toward zero, same units.
    pub input_deceleration: f32,

    // ========================================================================
    // Ground and Edge Probing
    // ========================================================================
    /// Length of the single grounded-check ray (meters).
    pub ground_probe_range: f32,

    /// Number of probe rings generated around the capsule base.
    pub ring_count: usize,

    /// Edge-probe cycle rate (full-scan checks per second). Timed with
    /// unscaled time so slow motion does not starve the scan.
    pub downcast_rate: f32,

    /// Maximum edge probes executed on any one tick.
    pub max_downcasts_per_tick: usize,

    /// Magnitude of the accumulated anti-cling force.
    pub downcast_force: f32,

    /// Base length of each edge-probe ray (meters), measured below the
    /// sample point before its ring height offset is added.
    pub downcast_reach: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Dimensions
            capsule_radius: 0.5,
            capsule_height: 2.0,

            // Movement
            speed: 10.0,
            jump_velocity: 10.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            gravity_scale: 1.0,

            // Input smoothing
            use_raw_input: false,
            input_acceleration: 2.0,
            input_deceleration: 2.0,

            // Probing
            ground_probe_range: 0.1,
            ring_count: 3,
            downcast_rate: 5.0,
            max_downcasts_per_tick: 10,
            downcast_force: 1.0,
            downcast_reach: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = LocomotionConfig::default();
        assert!(config.speed > 0.0);
        assert!(config.capsule_radius > 0.0);
        assert!(config.gravity.y < 0.0);
        assert!(config.downcast_rate > 0.0);
        assert!(config.max_downcasts_per_tick > 0);
    }
}
