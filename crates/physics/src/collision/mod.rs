//! Static collision queries.
//!
//! The locomotion core sees the world through two small traits:
//!
//! - [`SpatialQuery`]: single raycasts against static geometry, used for
//!   ground, edge, and vault probing
//! - [`CapsuleMover`]: the collision-aware move primitive that displaces the
//!   agent capsule, sliding along whatever it hits
//!
//! [`StaticWorld`] is the provided implementation of both, built from box
//! brushes. Hosting environments with their own spatial index can implement
//! the traits directly instead.

mod query;
mod world;

pub use query::{CapsuleMover, RayHit, SpatialQuery};
pub use world::StaticWorld;
