//! Obstacle probing for the vault.
//!
//! Two independent raycast fans run every tick, whatever the vault state:
//! a forward blocking fan over evenly spaced heights, and a stepped downward
//! scan that walks forward over the obstacle looking for the first clear
//! point past it (the far edge). A third pass estimates the obstacle's
//! height for tuning output; nothing gates on it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::VaultConfig;
use crate::collision::SpatialQuery;

/// Rays in the distance and height scans.
const DISTANCE_RAY_COUNT: usize = 20;

/// Clearance above the max vault height for the distance-scan ray origins.
const FAR_EDGE_CLEARANCE: f32 = 0.01;

/// Clearance above the max vault height for the height-estimate ray origins.
const HEIGHT_PROBE_CLEARANCE: f32 = 0.08;

/// Downward rays stop this far short of the max vault height, so the ground
/// itself never reads as an obstacle.
const DOWN_RAY_SHORTFALL: f32 = 0.05;

/// One forward ray of the blocking fan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeightSample {
    /// Height above the agent's base this ray was cast from.
    pub height: f32,

    /// Whether the ray hit within the start distance.
    pub blocked: bool,
}

/// Full probing result for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleScan {
    /// Blocking fan, in ascending height order.
    pub blocked: Vec<HeightSample>,

    /// Forward distance to the first clear point past the obstacle, or
    /// `None` when no blocked point was ever seen.
    pub far_edge_distance: Option<f32>,

    /// Mean obstacle height under the scan, or `None` when nothing was hit.
    /// Diagnostic only.
    pub height_estimate: Option<f32>,
}

impl ObstacleScan {
    /// Whether any fan ray was blocked.
    pub fn any_blocked(&self) -> bool {
        self.blocked.iter().any(|s| s.blocked)
    }
}

/// Run all probe fans from the agent's pose.
pub(crate) fn scan_obstacle(
    config: &VaultConfig,
    position: Vec3,
    forward: Vec3,
    world: &impl SpatialQuery,
) -> ObstacleScan {
    let mut blocked = Vec::with_capacity(config.raycast_count);
    for i in 0..config.raycast_count {
        let height = i as f32 * (config.player_height / config.raycast_count as f32);
        let origin = position + forward * config.player_radius + Vec3::Y * height;
        let hit = world
            .raycast(origin, forward, config.max_start_distance)
            .is_some();
        blocked.push(HeightSample {
            height,
            blocked: hit,
        });
    }

    ObstacleScan {
        blocked,
        far_edge_distance: far_edge_distance(config, position, forward, world),
        height_estimate: estimate_height(config, position, forward, world),
    }
}

/// Walk forward over the obstacle with downward rays; the first clear point
/// after at least one blocked point is its far edge.
fn far_edge_distance(
    config: &VaultConfig,
    position: Vec3,
    forward: Vec3,
    world: &impl SpatialQuery,
) -> Option<f32> {
    let span = config.max_start_distance + config.max_traversal_distance;
    let step = span / DISTANCE_RAY_COUNT as f32;
    let reach = config.max_vault_height - DOWN_RAY_SHORTFALL;

    let mut has_hit = false;
    for i in 0..DISTANCE_RAY_COUNT {
        let distance = step * i as f32 + config.player_radius;
        let origin = position
            + forward * distance
            + Vec3::Y * (config.max_vault_height + FAR_EDGE_CLEARANCE);

        if world.raycast(origin, Vec3::NEG_Y, reach).is_some() {
            has_hit = true;
        } else if has_hit {
            return Some(distance);
        }
    }

    None
}

/// Mean height of whatever the downward scan hits.
fn estimate_height(
    config: &VaultConfig,
    position: Vec3,
    forward: Vec3,
    world: &impl SpatialQuery,
) -> Option<f32> {
    let span = config.max_start_distance + config.max_traversal_distance;
    let step = span / DISTANCE_RAY_COUNT as f32;
    let reach = config.max_vault_height - DOWN_RAY_SHORTFALL;

    let mut sum = 0.0;
    let mut hits = 0u32;
    for i in 0..DISTANCE_RAY_COUNT {
        let distance = (i + 1) as f32 * step;
        let origin = position
            + forward * distance
            + Vec3::Y * (config.max_vault_height + HEIGHT_PROBE_CLEARANCE);

        if let Some(hit) = world.raycast(origin, Vec3::NEG_Y, reach) {
            sum += (position.y + config.max_vault_height) - hit.point.y;
            hits += 1;
        }
    }

    (hits > 0).then(|| sum / hits as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::StaticWorld;

    /// Low wall ahead of an agent standing at the origin facing +X.
    ///
    /// The wall's near face is 1m out, 0.4m deep, with its top at `top` and
    /// its base sunk slightly below the ground plane.
    fn wall_world(top: f32) -> StaticWorld {
        let mut world = StaticWorld::new();
        let half_height = (top + 0.1) * 0.5;
        world.add_box(
            Vec3::new(1.2, top - half_height, 0.0),
            Vec3::new(0.2, half_height, 3.0),
        );
        world
    }

    fn scan(world: &StaticWorld) -> ObstacleScan {
        scan_obstacle(&VaultConfig::default(), Vec3::ZERO, Vec3::X, world)
    }

    #[test]
    fn test_empty_world_scans_clear() {
        let result = scan(&StaticWorld::new());
        assert!(!result.any_blocked());
        assert_eq!(result.far_edge_distance, None);
        assert_eq!(result.height_estimate, None);
    }

    #[test]
    fn test_fan_blocks_below_wall_top() {
        let result = scan(&wall_world(1.0));

        // Fan heights are 0.0, 0.4, 0.8, 1.2, 1.6; the wall tops out at 1.0.
        let states: Vec<bool> = result.blocked.iter().map(|s| s.blocked).collect();
        assert_eq!(states, vec![true, true, true, false, false]);

        // Heights come back in ascending order.
        for pair in result.blocked.windows(2) {
            assert!(pair[0].height < pair[1].height);
        }
    }

    #[test]
    fn test_far_edge_lands_past_the_wall() {
        let result = scan(&wall_world(1.0));
        let distance = result.far_edge_distance.expect("wall should have a far edge");

        // The far face is 1.4m out; the first clear sample is just past it.
        assert!(distance > 1.4 && distance < 1.7, "distance = {distance}");
    }

    #[test]
    fn test_no_far_edge_when_nothing_blocked() {
        // A wall too far away for the scan span.
        let mut world = StaticWorld::new();
        world.add_box(Vec3::new(10.0, 0.5, 0.0), Vec3::new(0.2, 0.5, 3.0));
        assert_eq!(scan(&world).far_edge_distance, None);
    }

    #[test]
    fn test_no_far_edge_when_obstacle_never_ends() {
        // Obstacle covers the whole scan span, so no clear point follows a
        // blocked one.
        let mut world = StaticWorld::new();
        world.add_box(Vec3::new(2.0, 0.5, 0.0), Vec3::new(2.0, 0.5, 3.0));
        assert_eq!(scan(&world).far_edge_distance, None);
    }

    #[test]
    fn test_height_estimate_tracks_wall_top() {
        let result = scan(&wall_world(1.0));
        let estimate = result.height_estimate.expect("wall should produce hits");

        // Rays start at y 1.28 and the wall top is at 1.0, so each hit gap
        // is 0.2 from the 1.2 reference height.
        assert!((estimate - 0.2).abs() < 0.05, "estimate = {estimate}");
    }

    #[test]
    fn test_height_estimate_none_without_hits() {
        assert_eq!(scan(&StaticWorld::new()).height_estimate, None);
    }
}
