//! Vault tuning parameters and the position easing curve.

use serde::{Deserialize, Serialize};

/// Easing curve for the vault position blend.
///
/// Both variants are monotonic over `[0, 1]` and return exactly `1.0` at
/// `1.0`, which is what ends a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionCurve {
    /// Constant-speed blend.
    Linear,
    /// Smoothstep: slow start, slow stop.
    EaseInOut,
}

impl PositionCurve {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`.
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            PositionCurve::Linear => t,
            PositionCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

impl Default for PositionCurve {
    fn default() -> Self {
        PositionCurve::EaseInOut
    }
}

/// Configuration for obstacle probing and the vault maneuver.
///
/// The prober and the capsule mover are tuned independently, so the agent
/// dimensions appear here as well as in the locomotion config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Number of forward rays in the blocking fan.
    pub raycast_count: usize,

    /// Height span the blocking fan covers (meters).
    pub player_height: f32,

    /// Agent radius (meters); forward probes start this far out, and the
    /// vault end pose lands most of this past the obstacle's far edge.
    pub player_radius: f32,

    /// Forward range of each blocking ray (meters).
    pub max_start_distance: f32,

    /// How far past the start range the distance scan keeps looking for the
    /// obstacle's far edge (meters).
    pub max_traversal_distance: f32,

    /// Tallest obstacle that can be vaulted (meters). Anything blocked above
    /// this disqualifies the vault outright.
    pub max_vault_height: f32,

    /// Obstacles must be blocked strictly above this height to vault
    /// (meters); anything lower is walked or stepped over instead.
    pub min_vault_height: f32,

    /// Duration of the vault interpolation (seconds).
    pub vault_time: f32,

    /// Easing applied to the position blend.
    pub position_curve: PositionCurve,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            raycast_count: 5,
            player_height: 2.0,
            player_radius: 0.5,
            max_start_distance: 1.0,
            max_traversal_distance: 1.6,
            max_vault_height: 1.2,
            min_vault_height: 0.8,
            vault_time: 0.6,
            position_curve: PositionCurve::default(),
        }
    }
}
