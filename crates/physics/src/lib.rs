//! Freerun Physics
//!
//! The locomotion core of a first-person character controller: every
//! simulation tick it decides how a capsule-shaped agent moves through a
//! static environment, whether it is resting on ground, whether it is
//! sliding off an edge, and whether a jump press should instead vault a low
//! obstacle.
//!
//! # Architecture
//!
//! - **Collision**: a small static world answering raycasts and moving a
//!   capsule with collide-and-slide, behind traits the rest of the crate is
//!   written against
//! - **Locomotion**: the per-tick integrator — ground tracking, amortized
//!   edge probing, gravity, smoothed input
//! - **Vault**: obstacle probing and the scripted vault interpolation
//!
//! # Design Principles
//!
//! 1. **One thread of control**: everything runs synchronously once per
//!    tick; each piece of mutable state has exactly one owner
//! 2. **Bounded per-tick cost**: expensive probing is budgeted and spread
//!    across ticks instead of spiking any single frame
//! 3. **Sentinels over exceptions**: degenerate geometry yields `Option`s
//!    and early returns, never panics in the simulation path

pub mod collision;
pub mod locomotion;
pub mod time;
pub mod vault;

// Re-export commonly used types
pub use collision::{CapsuleMover, RayHit, SpatialQuery, StaticWorld};
pub use locomotion::{
    LocomotionConfig, LocomotionController, LocomotionHooks, LocomotionState, PlayerCommand,
};
pub use time::TickTime;
pub use vault::{ObstacleScan, PositionCurve, VaultConfig, VaultState};
