//! Locomotion state and input structures.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::downcast::DowncastState;
use crate::vault::VaultState;

/// Complete mutable state for one agent.
///
/// Everything the per-tick update reads and writes lives here: pose,
/// velocity, the gravity and input accumulators, the edge-probe budget, and
/// the vault state machine. The fields ending in `_accumulator` are carried
/// across ticks; everything else is recomputed or latched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Position in world space (bottom-center of the capsule).
    pub position: Vec3,

    /// Facing angle around the vertical axis, radians.
    pub yaw: f32,

    /// Resultant velocity computed on the last tick (read-only for
    /// collaborators; the integrator overwrites it each tick).
    pub velocity: Vec3,

    /// Whether the grounded-check ray hit this tick.
    pub on_floor: bool,

    /// Vertical velocity at the instant of the last landing, for
    /// landing-impact consumers.
    pub last_fall_velocity: f32,

    /// Whether a vault is currently possible, recomputed every tick.
    pub can_vault: bool,

    /// Vault state machine. While `Vaulting`, normal movement does not run.
    pub vault: VaultState,

    /// Accumulated gravity velocity (only `y` is ever nonzero under default
    /// gravity, but the full vector is integrated).
    pub gravity_accumulator: Vec3,

    /// Smoothed input, x = strafe, y = forward.
    pub input_accumulator: Vec2,

    /// Edge-probe scheduling state.
    pub downcast: DowncastState,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            on_floor: false,
            last_fall_velocity: 0.0,
            can_vault: false,
            vault: VaultState::Idle,
            gravity_accumulator: Vec3::ZERO,
            input_accumulator: Vec2::ZERO,
            downcast: DowncastState::default(),
        }
    }
}

impl LocomotionState {
    /// Create a state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Horizontal forward direction from the facing angle.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Horizontal right direction from the facing angle.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Whether the vault state machine is mid-vault.
    #[inline]
    pub fn is_vaulting(&self) -> bool {
        self.vault.is_vaulting()
    }

    /// Current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// Input command for a single tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerCommand {
    /// Strafe axis in [-1, 1]; positive is right.
    pub move_x: f32,

    /// Forward axis in [-1, 1]; positive is forward.
    pub move_z: f32,

    /// Jump key currently held.
    pub jump_held: bool,

    /// Jump key went down this tick (edge, not level).
    pub jump_pressed: bool,
}

impl PlayerCommand {
    /// Check if any movement input is active.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.move_x.abs() > 0.01 || self.move_z.abs() > 0.01
    }
}
