//! Downward-probe sample rings.
//!
//! The edge-probe scheduler walks a fixed set of sample offsets arranged in
//! concentric rings around the capsule base. Rings are generated once at
//! controller construction and never change.

use std::f32::consts::TAU;

use glam::Vec3;

/// The generated probe offsets, grouped by ring.
///
/// Ring `i` sits at radial distance `radius / ring_count * (i + 1)` and is
/// raised by `distance / radius * 0.5` to follow the capsule's curvature.
/// Samples are equally spaced over the full turn, with the ring index added
/// as an angular phase so successive rings do not line up radially.
#[derive(Debug, Clone)]
pub struct ProbeRings {
    rings: Vec<Vec<Vec3>>,
    total: usize,
}

impl ProbeRings {
    /// Generate `ring_count` rings inside `radius`, with `samples_for_ring`
    /// giving the sample count of each ring.
    pub fn generate(
        ring_count: usize,
        radius: f32,
        samples_for_ring: impl Fn(usize) -> usize,
    ) -> Self {
        let mut rings = Vec::with_capacity(ring_count);
        let mut total = 0;

        for i in 0..ring_count {
            let count = samples_for_ring(i);
            let distance = radius / ring_count as f32 * (i + 1) as f32;
            let y = distance / radius * 0.5;

            let mut ring = Vec::with_capacity(count);
            for j in 0..count {
                let angle = TAU / count as f32 * j as f32 + i as f32;
                ring.push(Vec3::new(
                    angle.cos() * distance,
                    y,
                    angle.sin() * distance,
                ));
                total += 1;
            }
            rings.push(ring);
        }

        if total == 0 {
            log::warn!(
                "probe ring configuration produced zero samples ({} rings); edge probing disabled",
                ring_count
            );
        }

        Self { rings, total }
    }

    /// Total number of samples across all rings.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.total
    }

    /// Number of rings.
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// The rings, innermost first.
    pub fn rings(&self) -> &[Vec<Vec3>] {
        &self.rings
    }

    /// Iterate all samples in scan order as `(ring, sample, offset)`.
    pub fn iter_flat(&self) -> impl Iterator<Item = (usize, usize, Vec3)> + '_ {
        self.rings
            .iter()
            .enumerate()
            .flat_map(|(i, ring)| ring.iter().enumerate().map(move |(j, &p)| (i, j, p)))
    }
}
