//! Query traits the locomotion core is written against.

use glam::Vec3;

/// Result of a raycast that hit something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space point where the ray struck geometry.
    pub point: Vec3,

    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Raycasts against static world geometry.
///
/// All probing in the locomotion core (ground tracking, edge downcasts, the
/// vault fans) goes through this single entry point. Implementations must
/// reflect static geometry only; dynamic bodies are out of scope.
pub trait SpatialQuery {
    /// Cast a ray and return the closest hit within `max_distance`, if any.
    ///
    /// `direction` does not need to be normalized; a zero direction misses.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Collision-aware capsule displacement.
///
/// `feet` is the bottom-center of an upright capsule. The returned position
/// is where the capsule ends up after attempting to move by `delta`, sliding
/// along any surfaces it hits. The vault interpolation writes the pose
/// directly and never calls this, which is what "the mover is disabled while
/// vaulting" means here.
pub trait CapsuleMover {
    fn move_capsule(&self, feet: Vec3, radius: f32, height: f32, delta: Vec3) -> Vec3;
}
