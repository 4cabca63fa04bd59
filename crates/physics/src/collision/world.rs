//! Box-brush static world backing the query traits.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, Ray, RayCast};
use parry3d::shape::SharedShape;

use super::query::{CapsuleMover, RayHit, SpatialQuery};

/// Binary-search refinement steps per capsule sweep (~1/4096 resolution).
const SWEEP_ITERATIONS: usize = 12;

/// Slide passes per move; enough for floor + wall + corner.
const MAX_SLIDE_PASSES: usize = 4;

/// A piece of static collision geometry.
#[derive(Clone)]
struct Brush {
    shape: SharedShape,
    transform: Isometry<Real>,
}

/// Static collision world made of box brushes.
///
/// Immutable once level construction is done; all queries take `&self`, so a
/// built world can be shared freely.
#[derive(Default)]
pub struct StaticWorld {
    brushes: Vec<Brush>,
}

impl std::fmt::Debug for StaticWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticWorld")
            .field("brushes", &self.brushes.len())
            .finish()
    }
}

impl StaticWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box.
    ///
    /// `center` is the box center in world space, `half_extents` the
    /// half-size along each axis.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) {
        self.brushes.push(Brush {
            shape: SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            transform: Isometry::translation(center.x, center.y, center.z),
        });
    }

    /// Number of brushes in the world.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Whether an upright capsule at `feet` overlaps any brush.
    fn capsule_in_solid(&self, feet: Vec3, radius: f32, height: f32) -> bool {
        let shape = capsule_shape(radius, height);
        let transform = capsule_transform(feet, radius, height);

        for brush in &self.brushes {
            if let Ok(Some(c)) = contact(
                &transform,
                shape.as_ref(),
                &brush.transform,
                brush.shape.as_ref(),
                0.0,
            ) {
                if c.dist < 0.0 {
                    return true;
                }
            }
        }
        false
    }

    /// Accumulated push-out vector for a penetrating capsule.
    ///
    /// Zero when the capsule is free. Used to derive contact normals for the
    /// sweep; not applied to poses directly.
    fn penetration_push(&self, feet: Vec3, radius: f32, height: f32) -> Vec3 {
        let shape = capsule_shape(radius, height);
        let transform = capsule_transform(feet, radius, height);

        let mut push = Vec3::ZERO;
        for brush in &self.brushes {
            if let Ok(Some(c)) = contact(
                &transform,
                shape.as_ref(),
                &brush.transform,
                brush.shape.as_ref(),
                0.0,
            ) {
                if c.dist < 0.0 {
                    // normal2 points out of the brush, i.e. the direction
                    // that separates the capsule from it.
                    let out = Vec3::new(c.normal2.x, c.normal2.y, c.normal2.z);
                    push += out * (-c.dist + 0.001);
                }
            }
        }
        push
    }

    /// Sweep a capsule along `delta`, stopping at the first overlap.
    fn sweep_capsule(&self, feet: Vec3, radius: f32, height: f32, delta: Vec3) -> Sweep {
        let target = feet + delta;
        if !self.capsule_in_solid(target, radius, height) {
            return Sweep {
                end: target,
                fraction: 1.0,
                normal: None,
            };
        }

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        for _ in 0..SWEEP_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            if self.capsule_in_solid(feet + delta * mid, radius, height) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        // Derive the blocking normal from the first penetrating sample.
        let push = self.penetration_push(feet + delta * hi, radius, height);
        let mut normal = if push.length_squared() > 1.0e-8 {
            push.normalize()
        } else {
            let horizontal = Vec3::new(-delta.x, 0.0, -delta.z);
            if horizontal.length_squared() > 1.0e-4 {
                horizontal.normalize()
            } else {
                Vec3::Y
            }
        };
        // A blocking surface always opposes the motion.
        if normal.dot(delta) > 0.0 {
            normal = -normal;
        }

        Sweep {
            end: feet + delta * lo,
            fraction: lo,
            normal: Some(normal),
        }
    }
}

/// Result of one capsule sweep.
struct Sweep {
    end: Vec3,
    fraction: f32,
    normal: Option<Vec3>,
}

impl SpatialQuery for StaticWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<f32> = None;
        for brush in &self.brushes {
            if let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) {
                if toi < max_distance && closest.map_or(true, |d| toi < d) {
                    closest = Some(toi);
                }
            }
        }

        closest.map(|distance| RayHit {
            point: origin + dir * distance,
            distance,
        })
    }
}

impl CapsuleMover for StaticWorld {
    fn move_capsule(&self, feet: Vec3, radius: f32, height: f32, delta: Vec3) -> Vec3 {
        let mut position = feet;

        // Depenetrate first: poses written directly (vault landings) can
        // start slightly inside geometry, and a sweep from inside solid
        // cannot go anywhere.
        let push = self.penetration_push(position, radius, height);
        if push != Vec3::ZERO {
            position += push;
        }

        let mut remaining = delta;

        for _ in 0..MAX_SLIDE_PASSES {
            if remaining.length_squared() < 1.0e-10 {
                break;
            }

            let sweep = self.sweep_capsule(position, radius, height, remaining);
            position = sweep.end;

            let Some(normal) = sweep.normal else {
                break;
            };
            remaining = clip_translation(remaining * (1.0 - sweep.fraction), normal);
        }

        position
    }
}

/// Remove the into-surface component of a translation.
fn clip_translation(delta: Vec3, normal: Vec3) -> Vec3 {
    let into = delta.dot(normal);
    if into >= 0.0 {
        delta
    } else {
        delta - normal * into
    }
}

fn capsule_shape(radius: f32, height: f32) -> SharedShape {
    // Parry capsules are defined by the cylinder half-height.
    let cylinder_half = (height - 2.0 * radius).max(0.0) * 0.5;
    SharedShape::capsule_y(cylinder_half, radius)
}

fn capsule_transform(feet: Vec3, _radius: f32, height: f32) -> Isometry<Real> {
    // Poses are feet positions; the parry capsule is centered.
    Isometry::translation(feet.x, feet.y + height * 0.5, feet.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_world() -> StaticWorld {
        let mut world = StaticWorld::new();
        // Floor with its top face at y = 0.
        world.add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0));
        world
    }

    #[test]
    fn test_raycast_hits_floor() {
        let world = floor_world();
        let hit = world
            .raycast(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Y, 5.0)
            .expect("should hit the floor");
        assert!((hit.point.y - 0.0).abs() < 1.0e-4);
        assert!((hit.distance - 2.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let world = floor_world();
        assert!(world.raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 1.5).is_none());
    }

    #[test]
    fn test_raycast_zero_direction_misses() {
        let world = floor_world();
        assert!(world.raycast(Vec3::ZERO, Vec3::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_move_unobstructed() {
        let world = StaticWorld::new();
        let end = world.move_capsule(Vec3::ZERO, 0.5, 2.0, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(end, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_move_stops_on_floor() {
        let world = floor_world();
        let end = world.move_capsule(Vec3::new(0.0, 0.5, 0.0), 0.5, 2.0, Vec3::new(0.0, -1.0, 0.0));
        assert!(end.y >= 0.0 && end.y < 0.01, "end.y = {}", end.y);
    }

    #[test]
    fn test_move_slides_along_wall() {
        let mut world = StaticWorld::new();
        // Wall face at x = 2.
        world.add_box(Vec3::new(2.5, 1.0, 0.0), Vec3::new(0.5, 2.0, 10.0));

        let end = world.move_capsule(
            Vec3::new(1.4, 0.0, 0.0),
            0.5,
            2.0,
            Vec3::new(1.0, 0.0, 1.0),
        );

        // Blocked at x ~= 1.5 but the tangential component survives.
        assert!(end.x < 1.51, "end.x = {}", end.x);
        assert!(end.z > 0.9, "end.z = {}", end.z);
    }

    #[test]
    fn test_move_depenetrates_embedded_start() {
        let mut world = StaticWorld::new();
        // Wall face at x = 2.
        world.add_box(Vec3::new(2.5, 1.0, 0.0), Vec3::new(0.5, 2.0, 10.0));

        // Capsule surface embedded 0.05 into the wall face.
        let start = Vec3::new(1.55, 0.0, 0.0);
        let end = world.move_capsule(start, 0.5, 2.0, Vec3::new(0.0, 0.0, 0.5));

        // Pushed back out to the face, and the tangential move survived.
        assert!(end.x <= 1.5 + 1.0e-3, "end.x = {}", end.x);
        assert!(end.z > 0.45, "end.z = {}", end.z);
    }

    #[test]
    fn test_clip_translation_removes_into_component() {
        let clipped = clip_translation(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(clipped, Vec3::new(1.0, 0.0, 0.0));

        // Motion away from the surface is untouched.
        let away = clip_translation(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(away, Vec3::new(0.0, 1.0, 0.0));
    }
}
