//! Amortized edge probing.
//!
//! While the agent is airborne, many short downward rays are cast from the
//! ring samples to find ground still overlapping the capsule's edge (the
//! "clinging to a ledge" case). The full scan is spread over several ticks:
//! a cycle starts at most `downcast_rate` times per second and each tick
//! probes at most `max_downcasts_per_tick` samples, so per-tick raycast cost
//! stays bounded while the scan still converges within one cycle interval.
//!
//! The cycle timer runs on unscaled time, so global time scaling changes
//! neither the probe rate nor its per-tick budget.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::LocomotionConfig;
use super::hooks::LocomotionHooks;
use super::rings::ProbeRings;
use super::state::LocomotionState;
use crate::collision::SpatialQuery;

/// Mutable scheduling state for the edge probes.
///
/// `pending` never exceeds the ring set's total sample count; a new cycle
/// begins only once the previous one has fully drained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DowncastState {
    /// Unscaled time since the last cycle boundary.
    pub cycle_timer: f32,

    /// Samples still to probe in the current cycle.
    pub pending: usize,

    /// Accumulated horizontal unit forces from probes that found support,
    /// cleared when grounded or when a new cycle starts.
    pub forces: Vec<Vec3>,

    /// Lifetime count of executed probes, for diagnostics.
    pub probes_done: u64,
}

/// Horizontal unit direction pushing the agent from a supported sample back
/// toward its center.
pub(crate) fn edge_force_direction(offset: Vec3) -> Vec3 {
    Vec3::new(-offset.x, 0.0, -offset.z).normalize_or_zero()
}

/// Mean of the accumulated probe forces, scaled; `None` when no probe hit.
pub(crate) fn accumulated_edge_force(forces: &[Vec3], scale: f32) -> Option<Vec3> {
    if forces.is_empty() {
        return None;
    }
    let sum: Vec3 = forces.iter().copied().sum();
    Some(sum / forces.len() as f32 * scale)
}

/// Advance the probe schedule by one tick and execute the tick's budget.
pub(crate) fn update_downcasting(
    config: &LocomotionConfig,
    rings: &ProbeRings,
    state: &mut LocomotionState,
    world: &impl SpatialQuery,
    unscaled_delta: f32,
    hooks: &mut impl LocomotionHooks,
) {
    let position = state.position;
    let on_floor = state.on_floor;
    let downcast = &mut state.downcast;

    downcast.cycle_timer += unscaled_delta;
    let interval = 1.0 / config.downcast_rate;
    if downcast.cycle_timer >= interval {
        downcast.cycle_timer = 0.0;
        // A new cycle starts only while airborne, and only once the previous
        // one has fully drained.
        if !on_floor && downcast.pending == 0 {
            downcast.pending = rings.sample_count();
            downcast.forces.clear();
        }
    }

    if on_floor {
        // Edge forces are irrelevant on solid ground.
        downcast.pending = 0;
        downcast.forces.clear();
        return;
    }

    if downcast.pending > 0 {
        let batch = downcast.pending.min(config.max_downcasts_per_tick);
        let completed = rings.sample_count() - downcast.pending;
        let executed = run_probes(
            config, rings, position, world, completed, batch, downcast, hooks,
        );
        downcast.probes_done += executed as u64;
        downcast.pending -= batch;
    }
}

/// Probe up to `count` samples, resuming after the `skip` already done this
/// cycle. Returns the number executed.
#[allow(clippy::too_many_arguments)]
fn run_probes(
    config: &LocomotionConfig,
    rings: &ProbeRings,
    position: Vec3,
    world: &impl SpatialQuery,
    skip: usize,
    count: usize,
    downcast: &mut DowncastState,
    hooks: &mut impl LocomotionHooks,
) -> usize {
    let mut executed = 0;
    for (ring, sample, offset) in rings.iter_flat().skip(skip) {
        if executed >= count {
            break;
        }

        let reach = config.downcast_reach + offset.y;
        let hit = world.raycast(position + offset, Vec3::NEG_Y, reach).is_some();
        if hit {
            downcast.forces.push(edge_force_direction(offset));
        }
        hooks.downcast_probed(ring, sample, offset, hit);
        executed += 1;
    }
    executed
}
