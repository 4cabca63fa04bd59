//! Game simulation - the fixed-rate tick loop.
//!
//! Advances every player's locomotion once per tick and collects the events
//! the out-of-scope glue (animation, effects) consumes by polling.

use freerun_physics::{
    LocomotionConfig, LocomotionController, LocomotionHooks, LocomotionState, TickTime,
    VaultConfig,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::PlayerInput;
use crate::level::Level;

/// Unique identifier for entities.
pub type EntityId = u32;

/// Game simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Global time scale. Scales physics integration but not the edge-probe
    /// cycle timer, so probing keeps its real-time cadence in slow motion.
    pub time_scale: f32,

    /// Movement physics configuration.
    pub locomotion: LocomotionConfig,

    /// Vault configuration.
    pub vault: VaultConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            time_scale: 1.0,
            locomotion: LocomotionConfig::default(),
            vault: VaultConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Real (unscaled) seconds per tick.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// The clock sample handed to the physics core each tick.
    pub fn tick_time(&self) -> TickTime {
        TickTime::from_unscaled(self.delta_time(), self.time_scale)
    }
}

/// Events emitted by the simulation, drained by the hosting glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player started a vault.
    VaultStarted { player: EntityId },
}

/// A player in the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID.
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Locomotion state (pose, velocity, probes, vault).
    pub locomotion: LocomotionState,

    /// Previous frame's jump key state, for edge detection.
    jump_was_held: bool,
}

impl Player {
    /// Create a player at a spawn pose.
    pub fn new(id: EntityId, name: String, position: Vec3, facing: f32) -> Self {
        let mut locomotion = LocomotionState::new(position);
        locomotion.yaw = facing;
        Self {
            id,
            name,
            locomotion,
            jump_was_held: false,
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.locomotion.position
    }
}

/// Forwards core callbacks into the simulation's event queue.
struct EventCollector<'a> {
    events: &'a mut Vec<GameEvent>,
    player: EntityId,
}

impl LocomotionHooks for EventCollector<'_> {
    fn vault_started(&mut self) {
        self.events.push(GameEvent::VaultStarted {
            player: self.player,
        });
    }
}

/// The main simulation: a level, its players, and the tick loop.
#[derive(Debug)]
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// All players in the game.
    pub players: Vec<Player>,

    controller: LocomotionController,
    events: Vec<GameEvent>,
    next_entity_id: EntityId,
}

impl Simulation {
    /// Create a simulation with the given configuration and level.
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        let controller =
            LocomotionController::new(config.locomotion.clone(), config.vault.clone());

        Self {
            frame: 0,
            config,
            level,
            players: Vec::new(),
            controller,
            events: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Default configuration on the training course.
    pub fn training_course() -> Self {
        Self::new(SimulationConfig::default(), Level::training_course())
    }

    /// Add a player at the next spawn point. Returns the player's ID.
    pub fn add_player(&mut self, name: &str) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;

        let spawn_index = self.players.len() % self.level.spawn_points.len().max(1);
        let spawn = self.level.player_spawn(spawn_index);
        let position = spawn.map(|s| s.position).unwrap_or(Vec3::ZERO);
        let facing = spawn.map(|s| s.facing).unwrap_or(0.0);

        log::debug!("player {id} '{name}' spawned at {position}");
        self.players.push(Player::new(id, name.to_string(), position, facing));
        id
    }

    /// Get a player by ID.
    pub fn get_player(&self, player_id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Get a mutable reference to a player by ID.
    pub fn get_player_mut(&mut self, player_id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Advance the simulation by one tick.
    ///
    /// `inputs` are indexed by player position in the `players` array;
    /// missing entries default to no input.
    pub fn tick(&mut self, inputs: &[PlayerInput]) {
        let time = self.config.tick_time();

        for (i, player) in self.players.iter_mut().enumerate() {
            let input = inputs.get(i).copied().unwrap_or_default();
            let command = input.to_command(player.jump_was_held);
            player.jump_was_held = input.jump;

            let mut collector = EventCollector {
                events: &mut self.events,
                player: player.id,
            };
            self.controller.update(
                &mut player.locomotion,
                &command,
                &self.level.world,
                time,
                &mut collector,
            );
        }

        self.frame += 1;
    }

    /// Drain the events collected since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

// ============================================================================
// Tests
// ============================================================================
