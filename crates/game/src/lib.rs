//! Freerun Game
//!
//! Hosting environment for the locomotion core: levels built on the static
//! collision world, raw-input conversion, and the fixed-rate simulation
//! loop that drives every player and surfaces gameplay events.

pub mod input;
pub mod level;
pub mod simulation;

// Re-export commonly used types
pub use input::{MovementInput, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use simulation::{EntityId, GameEvent, Player, Simulation, SimulationConfig};
