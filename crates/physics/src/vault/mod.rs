//! Scripted vaulting over low obstacles.
//!
//! Every tick, two raycast fans size up whatever is in front of the agent:
//! a forward fan that finds at which heights the way is blocked, and a
//! stepped downward scan that finds where the obstacle ends. When the
//! blocked band falls inside the configured vault window and a jump is
//! pressed, the agent's pose is handed to a timed, curve-eased interpolation
//! from its current position to a landing point just past the obstacle's
//! far edge. Normal movement (and its collision-aware mover) stays off for
//! the whole blend.
//!
//! Landing verification against the actual landing surface is out of scope.

mod config;
mod controller;
mod prober;

pub use config::{PositionCurve, VaultConfig};
pub use controller::{VaultController, VaultState};
pub use prober::{HeightSample, ObstacleScan};
