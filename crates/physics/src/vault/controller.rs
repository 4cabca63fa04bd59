//! Vault state machine.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::VaultConfig;
use super::prober::{scan_obstacle, ObstacleScan};
use crate::collision::SpatialQuery;
use crate::locomotion::{LocomotionHooks, LocomotionState};

/// Fraction of the agent radius added past the obstacle's far edge when
/// picking the landing point.
const LANDING_RADIUS_FACTOR: f32 = 0.9;

/// The vault machine: `Idle`, or mid-vault with the captured poses.
///
/// This single value is what makes vaulting and normal movement mutually
/// exclusive: the movement integrator runs only in `Idle`, and the vault
/// interpolation owns the pose in `Vaulting`. There is no way to cancel a
/// vault in flight; it always runs to the end of its curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VaultState {
    /// Not vaulting; normal movement applies.
    Idle,

    /// Mid-vault, blending from `start` to `end`.
    Vaulting {
        start: Vec3,
        end: Vec3,
        /// Scaled seconds since the vault began.
        elapsed: f32,
    },
}

impl Default for VaultState {
    fn default() -> Self {
        VaultState::Idle
    }
}

impl VaultState {
    /// Whether a vault is in progress.
    #[inline]
    pub fn is_vaulting(&self) -> bool {
        matches!(self, VaultState::Vaulting { .. })
    }
}

/// Drives obstacle probing, vault eligibility, and the vault interpolation.
#[derive(Debug, Clone)]
pub struct VaultController {
    pub config: VaultConfig,
}

impl VaultController {
    /// Create a controller with the given configuration.
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    /// Run the probe fans from the agent's current pose.
    pub fn scan(&self, state: &LocomotionState, world: &impl SpatialQuery) -> ObstacleScan {
        scan_obstacle(&self.config, state.position, state.forward(), world)
    }

    /// Vault eligibility from this tick's scan.
    ///
    /// Heights are checked in ascending order: any blocked ray above the max
    /// vault height disqualifies immediately, a blocked ray strictly above
    /// the min height (and within the max) qualifies, and a usable far-edge
    /// distance must exist.
    pub fn eligible(&self, scan: &ObstacleScan) -> bool {
        let mut can_vault = false;
        for sample in &scan.blocked {
            if !sample.blocked {
                continue;
            }
            if sample.height > self.config.max_vault_height {
                return false;
            }
            if sample.height > self.config.min_vault_height {
                can_vault = true;
            }
        }
        can_vault && scan.far_edge_distance.is_some()
    }

    /// Attempt the Idle -> Vaulting transition.
    ///
    /// Captures the start pose and computes the landing pose past the
    /// obstacle's far edge. Without a far-edge distance the attempt aborts
    /// and the state is left untouched. On success the hooks fire once.
    pub fn try_start(
        &self,
        state: &mut LocomotionState,
        scan: &ObstacleScan,
        hooks: &mut impl LocomotionHooks,
    ) -> bool {
        let Some(distance) = scan.far_edge_distance else {
            return false;
        };

        let start = state.position;
        let end = start
            + state.forward() * (distance + self.config.player_radius * LANDING_RADIUS_FACTOR);
        state.vault = VaultState::Vaulting {
            start,
            end,
            elapsed: 0.0,
        };

        log::debug!("vault started: {start:?} -> {end:?}");
        hooks.vault_started();
        true
    }

    /// Advance an in-flight vault by one tick.
    ///
    /// The pose is the curve-eased blend of the captured start and end; the
    /// machine returns to `Idle` the moment the blend factor reaches exactly
    /// one. No-op when idle.
    pub fn advance(&self, state: &mut LocomotionState, delta: f32) {
        let VaultState::Vaulting { start, end, elapsed } = &mut state.vault else {
            return;
        };

        *elapsed += delta;
        let progress = if self.config.vault_time > 0.0 {
            (*elapsed / self.config.vault_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let blend = self.config.position_curve.evaluate(progress);
        let (start, end) = (*start, *end);

        state.position = start.lerp(end, blend);
        if blend == 1.0 {
            state.vault = VaultState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::config::PositionCurve;
    use super::super::prober::HeightSample;

    fn sample(height: f32, blocked: bool) -> HeightSample {
        HeightSample { height, blocked }
    }

    fn scan_with(blocked: Vec<HeightSample>, far_edge: Option<f32>) -> ObstacleScan {
        ObstacleScan {
            blocked,
            far_edge_distance: far_edge,
            height_estimate: None,
        }
    }

    fn controller() -> VaultController {
        VaultController::new(VaultConfig::default())
    }

    struct VaultCounter(u32);

    impl LocomotionHooks for VaultCounter {
        fn vault_started(&mut self) {
            self.0 += 1;
        }
    }

    // ========================================================================
    // Eligibility
    // ========================================================================

    #[test]
    fn test_eligible_within_height_band() {
        // min 0.8, max 1.2: only a block strictly above 0.8 and at or below
        // 1.2 qualifies.
        let vault = controller();

        for (height, expected) in [(0.4, false), (0.8, false), (1.0, true), (1.2, true)] {
            let scan = scan_with(vec![sample(height, true)], Some(1.5));
            assert_eq!(vault.eligible(&scan), expected, "height {height}");
        }
    }

    #[test]
    fn test_tall_obstruction_disqualifies() {
        let vault = controller();
        // Qualifying block at 1.0, but something also blocks at 1.6.
        let scan = scan_with(
            vec![sample(1.0, true), sample(1.6, true)],
            Some(1.5),
        );
        assert!(!vault.eligible(&scan));
    }

    #[test]
    fn test_requires_far_edge_distance() {
        let vault = controller();
        let scan = scan_with(vec![sample(1.0, true)], None);
        assert!(!vault.eligible(&scan));
    }

    #[test]
    fn test_unblocked_heights_ignored() {
        let vault = controller();
        let scan = scan_with(
            vec![sample(1.0, false), sample(1.6, false)],
            Some(1.5),
        );
        assert!(!vault.eligible(&scan));
    }

    // ========================================================================
    // Transition
    // ========================================================================

    #[test]
    fn test_start_captures_poses_and_fires_once() {
        let vault = controller();
        let mut state = LocomotionState::new(Vec3::new(2.0, 0.0, 3.0));
        let mut counter = VaultCounter(0);

        let scan = scan_with(vec![sample(1.0, true)], Some(1.5));
        assert!(vault.try_start(&mut state, &scan, &mut counter));
        assert_eq!(counter.0, 1);

        let VaultState::Vaulting { start, end, elapsed } = state.vault else {
            panic!("should be vaulting");
        };
        assert_eq!(start, Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(elapsed, 0.0);

        // Yaw 0 faces +X: landing is far edge + 90% of the radius out.
        let expected = start + Vec3::X * (1.5 + 0.5 * 0.9);
        assert!((end - expected).length() < 1.0e-5);
    }

    #[test]
    fn test_start_aborts_without_far_edge() {
        let vault = controller();
        let mut state = LocomotionState::new(Vec3::new(2.0, 0.0, 3.0));
        let before = state.clone();
        let mut counter = VaultCounter(0);

        let scan = scan_with(vec![sample(1.0, true)], None);
        assert!(!vault.try_start(&mut state, &scan, &mut counter));

        // Nothing moved, nothing fired.
        assert_eq!(counter.0, 0);
        assert_eq!(state.vault, before.vault);
        assert_eq!(state.position, before.position);
    }

    // ========================================================================
    // Interpolation
    // ========================================================================

    #[test]
    fn test_advance_blends_and_finishes() {
        let mut config = VaultConfig::default();
        config.vault_time = 0.5;
        config.position_curve = PositionCurve::Linear;
        let vault = VaultController::new(config);

        let start = Vec3::ZERO;
        let end = Vec3::new(2.0, 0.0, 0.0);
        let mut state = LocomotionState::new(start);
        state.vault = VaultState::Vaulting {
            start,
            end,
            elapsed: 0.0,
        };

        // Halfway through a linear blend sits exactly between the poses.
        vault.advance(&mut state, 0.25);
        assert!((state.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1.0e-5);
        assert!(state.is_vaulting());

        // Reaching the end of the curve lands on the end pose and idles.
        vault.advance(&mut state, 0.25);
        assert_eq!(state.position, end);
        assert!(!state.is_vaulting());
    }

    #[test]
    fn test_progress_never_regresses() {
        let vault = controller();
        let start = Vec3::ZERO;
        let end = Vec3::new(3.0, 0.0, 0.0);
        let mut state = LocomotionState::new(start);
        state.vault = VaultState::Vaulting {
            start,
            end,
            elapsed: 0.0,
        };

        let mut last_x = -1.0;
        while state.is_vaulting() {
            vault.advance(&mut state, 0.016);
            let x = state.position.x;
            assert!(x >= last_x, "position moved backwards");
            last_x = x;
        }
        assert_eq!(state.position, end);
    }

    #[test]
    fn test_overlong_tick_clamps_to_end() {
        let vault = controller();
        let start = Vec3::ZERO;
        let end = Vec3::new(3.0, 0.0, 0.0);
        let mut state = LocomotionState::new(start);
        state.vault = VaultState::Vaulting {
            start,
            end,
            elapsed: 0.0,
        };

        // One huge step goes straight to the end pose, not past it.
        vault.advance(&mut state, 10.0);
        assert_eq!(state.position, end);
        assert!(!state.is_vaulting());
    }

    #[test]
    fn test_advance_is_noop_when_idle() {
        let vault = controller();
        let mut state = LocomotionState::new(Vec3::new(1.0, 2.0, 3.0));
        vault.advance(&mut state, 0.016);
        assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
