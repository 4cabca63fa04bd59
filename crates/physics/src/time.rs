//! Per-tick clock sample.

use serde::{Deserialize, Serialize};

/// Time step for one simulation tick.
///
/// Carries both the scaled delta (affected by the global time scale, used by
/// all physics integration) and the unscaled delta (wall-clock time, used
/// only by the edge-probe cycle timer so probe scheduling is unaffected by
/// slow motion or pause).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickTime {
    /// Scaled delta time in seconds.
    pub delta: f32,

    /// Unscaled (real) delta time in seconds.
    pub unscaled_delta: f32,
}

impl TickTime {
    /// Build a tick time from a real delta and a global time scale.
    pub fn from_unscaled(unscaled_delta: f32, time_scale: f32) -> Self {
        Self {
            delta: unscaled_delta * time_scale,
            unscaled_delta,
        }
    }

    /// Build a tick time with no time scaling applied.
    pub fn uniform(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
        }
    }
}
