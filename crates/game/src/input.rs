//! Player input handling.
//!
//! Converts raw per-frame key state into commands for the physics core,
//! including the jump key edge the vault trigger needs.

use freerun_physics::PlayerCommand;
use serde::{Deserialize, Serialize};

/// Raw player input for a single frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys pressed.
    pub movement: MovementInput,

    /// Jump key held this frame.
    pub jump: bool,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    /// Convert to a physics command.
    ///
    /// `jump_was_held` is the previous frame's jump state, used to derive
    /// the press edge. Opposing keys cancel; each axis stays in [-1, 1] and
    /// the core clamps the combined vector.
    pub fn to_command(&self, jump_was_held: bool) -> PlayerCommand {
        let mut command = PlayerCommand::default();

        if self.movement.forward {
            command.move_z += 1.0;
        }
        if self.movement.backward {
            command.move_z -= 1.0;
        }
        if self.movement.right {
            command.move_x += 1.0;
        }
        if self.movement.left {
            command.move_x -= 1.0;
        }

        command.jump_held = self.jump;
        command.jump_pressed = self.jump && !jump_was_held;

        command
    }

    /// Check if any movement key is down.
    pub fn has_movement(&self) -> bool {
        self.movement.forward || self.movement.backward || self.movement.left || self.movement.right
    }
}
