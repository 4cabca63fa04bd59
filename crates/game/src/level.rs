//! Level geometry and spawn points.

use freerun_physics::StaticWorld;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A spawn point for players.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space.
    pub position: Vec3,

    /// Initial facing (yaw in radians).
    pub facing: f32,
}

/// A level: named static geometry plus spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Static collision geometry.
    pub world: StaticWorld,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            world: StaticWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Obstacle course exercising the whole locomotion core.
    ///
    /// Walking +X from the spawn: a vaultable barrier, then open floor up to
    /// a drop edge at x = 10, with a lower landing platform beyond it. A
    /// too-tall wall sits off to the side of the barrier.
    pub fn training_course() -> Self {
        let mut level = Self::new("training_course", "Training Course");

        // Main floor, top face at y = 0, ending at x = 10.
        level
            .world
            .add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0));

        // Vaultable barrier: 0.2m thick, top at 1.3, near face at x = 0.
        level
            .world
            .add_box(Vec3::new(0.1, 0.6, 0.0), Vec3::new(0.1, 0.7, 4.0));

        // Too tall to vault; off the main line for comparison.
        level
            .world
            .add_box(Vec3::new(0.1, 0.95, 6.0), Vec3::new(0.1, 1.05, 2.0));

        // Landing platform below the drop edge, top face at y = -2.
        level
            .world
            .add_box(Vec3::new(14.0, -2.5, 0.0), Vec3::new(6.0, 0.5, 10.0));

        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-6.0, 0.05, 0.0),
            facing: 0.0, // +X, toward the barrier
        });

        level
    }

    /// Spawn point by index, if present.
    pub fn player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }
}
