//! First-person locomotion.
//!
//! The controller composes, every tick and in a fixed order:
//!
//! - a single-ray ground tracker
//! - amortized ring-based edge probing with its anti-cling force
//! - gravity accumulation with jump impulses
//! - rate-limited input smoothing rotated into the facing frame
//! - a collision-aware capsule move
//!
//! All mutable per-agent state lives in [`LocomotionState`]; the controller
//! itself is configuration plus the immutable probe rings. Vaulting (see
//! [`crate::vault`]) replaces the whole movement path while active.

mod config;
mod controller;
mod downcast;
mod hooks;
mod input;
mod rings;
mod state;

pub use config::LocomotionConfig;
pub use controller::LocomotionController;
pub use downcast::DowncastState;
pub use hooks::LocomotionHooks;
pub use input::accumulate_axis;
pub use rings::ProbeRings;
pub use state::{LocomotionState, PlayerCommand};
