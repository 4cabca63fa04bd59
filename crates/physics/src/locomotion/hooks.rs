//! Observer seams for events and diagnostics.

use glam::Vec3;

/// Callbacks out of the locomotion core.
///
/// Both methods default to no-ops; hosting glue implements what it needs.
/// `vault_started` is the animation-facing event; `downcast_probed` exists
/// for probe visualization and test instrumentation and is kept out of the
/// core data path.
pub trait LocomotionHooks {
    /// Fired exactly once per successful vault start.
    fn vault_started(&mut self) {}

    /// Reports one executed edge probe: which ring and sample was cast, the
    /// sample's offset from the agent, and whether it found support.
    fn downcast_probed(&mut self, ring: usize, sample: usize, offset: Vec3, hit: bool) {
        let _ = (ring, sample, offset, hit);
    }
}

/// No-op hooks for callers without glue.
impl LocomotionHooks for () {}
