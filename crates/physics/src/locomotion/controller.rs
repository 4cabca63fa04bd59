//! Per-tick locomotion update.
//!
//! This is the main entry point of the crate. Each simulation tick runs, in
//! order: obstacle probing and the vault machine, then (when not vaulting)
//! the ground tracker, the amortized edge probes, gravity and jump, input
//! smoothing, and finally the collision-aware capsule move. While a vault is
//! in flight the whole movement path is skipped and the vault interpolation
//! owns the pose.

use glam::{Vec2, Vec3};

use super::config::LocomotionConfig;
use super::downcast::{accumulated_edge_force, update_downcasting};
use super::hooks::LocomotionHooks;
use super::input::accumulate_axis;
use super::rings::ProbeRings;
use super::state::{LocomotionState, PlayerCommand};
use crate::collision::{CapsuleMover, SpatialQuery};
use crate::time::TickTime;
use crate::vault::{VaultConfig, VaultController};

/// Drives one agent's locomotion.
///
/// The controller itself is immutable after construction; all per-agent
/// mutable state lives in [`LocomotionState`], so one controller can drive
/// any number of agents.
///
/// # Example
///
/// ```ignore
/// let controller = LocomotionController::new(
///     LocomotionConfig::default(),
///     VaultConfig::default(),
/// );
/// let mut state = LocomotionState::new(spawn_position);
///
/// // Each tick:
/// controller.update(&mut state, &command, &world, time, &mut hooks);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Movement configuration.
    pub config: LocomotionConfig,

    rings: ProbeRings,
    vault: VaultController,
}

impl LocomotionController {
    /// Create a controller with the stock ring layout (ring `i` carries
    /// `(i + 1) * 4` samples).
    pub fn new(config: LocomotionConfig, vault: VaultConfig) -> Self {
        Self::with_ring_samples(config, vault, |i| (i + 1) * 4)
    }

    /// Create a controller with a custom per-ring sample count.
    pub fn with_ring_samples(
        config: LocomotionConfig,
        vault: VaultConfig,
        samples_for_ring: impl Fn(usize) -> usize,
    ) -> Self {
        let rings = ProbeRings::generate(config.ring_count, config.capsule_radius, samples_for_ring);
        log::info!(
            "generated {} edge-probe points in {} rings",
            rings.sample_count(),
            rings.ring_count()
        );

        Self {
            config,
            rings,
            vault: VaultController::new(vault),
        }
    }

    /// The generated probe rings.
    pub fn rings(&self) -> &ProbeRings {
        &self.rings
    }

    /// The vault configuration.
    pub fn vault_config(&self) -> &VaultConfig {
        &self.vault.config
    }

    /// Advance one agent by one tick.
    pub fn update<W>(
        &self,
        state: &mut LocomotionState,
        command: &PlayerCommand,
        world: &W,
        time: TickTime,
        hooks: &mut impl LocomotionHooks,
    ) where
        W: SpatialQuery + CapsuleMover,
    {
        // The prober runs every tick, vaulting or not, and eligibility is
        // republished for the polling glue.
        let scan = self.vault.scan(state, world);
        state.can_vault = self.vault.eligible(&scan);

        if state.is_vaulting() {
            self.vault.advance(state, time.delta);
            return;
        }

        // A jump press either starts a vault or, further down, becomes an
        // actual jump; never both.
        if command.jump_pressed
            && state.can_vault
            && self.vault.try_start(state, &scan, hooks)
        {
            // The first blend step lands on the trigger tick.
            self.vault.advance(state, time.delta);
            return;
        }

        self.update_on_floor(state, world);
        update_downcasting(
            &self.config,
            &self.rings,
            state,
            world,
            time.unscaled_delta,
            hooks,
        );

        // Anti-cling force from the edge probes. While it applies, the agent
        // is treated as snagged on an edge rather than falling, so the
        // gravity built up so far is discarded.
        let mut edge_force = Vec3::ZERO;
        if !state.on_floor {
            if let Some(force) =
                accumulated_edge_force(&state.downcast.forces, self.config.downcast_force)
            {
                edge_force = force;
                state.gravity_accumulator.y = 0.0;
            }
        }

        state.gravity_accumulator += self.config.gravity * self.config.gravity_scale * time.delta;

        if !state.can_vault && command.jump_pressed && state.on_floor {
            state.gravity_accumulator.y = self.config.jump_velocity;
        }

        if self.config.use_raw_input {
            state.input_accumulator = Vec2::new(command.move_x, command.move_z);
        } else {
            state.input_accumulator.x = accumulate_axis(
                command.move_x,
                state.input_accumulator.x,
                self.config.input_acceleration,
                self.config.input_deceleration,
                time.delta,
            );
            state.input_accumulator.y = accumulate_axis(
                command.move_z,
                state.input_accumulator.y,
                self.config.input_acceleration,
                self.config.input_deceleration,
                time.delta,
            );
        }

        // Smoothed input in the facing frame, never more than unit length.
        let mut world_input =
            state.right() * state.input_accumulator.x + state.forward() * state.input_accumulator.y;
        if world_input.length_squared() > 1.0 {
            world_input = world_input.normalize();
        }

        let velocity = edge_force + state.gravity_accumulator + world_input * self.config.speed;
        state.velocity = velocity;

        let was_on_floor = state.on_floor;
        state.position = world.move_capsule(
            state.position,
            self.config.capsule_radius,
            self.config.capsule_height,
            velocity * time.delta,
        );
        self.update_on_floor(state, world);

        if state.on_floor {
            state.gravity_accumulator.y = 0.0;
            if !was_on_floor {
                state.last_fall_velocity = velocity.y;
            }
        }
    }

    fn update_on_floor(&self, state: &mut LocomotionState, world: &impl SpatialQuery) {
        state.on_floor = world
            .raycast(state.position, Vec3::NEG_Y, self.config.ground_probe_range)
            .is_some();
    }
}

// ============================================================================
// Tests
// ============================================================================
