//! Freerun - headless demo.
//!
//! Scripts a player through the training course: run at the barrier, vault
//! it on the jump press, keep running to the drop edge, and fall to the
//! lower platform. State is polled and logged the way camera/animation glue
//! would consume it.

use freerun_game::{PlayerInput, Simulation};

/// Seconds of simulated time to run.
const DEMO_SECONDS: f32 = 6.0;

fn main() {
    env_logger::init();

    let mut simulation = Simulation::training_course();
    let player_id = simulation.add_player("Runner");

    let tick_rate = simulation.config.tick_rate;
    let total_ticks = (DEMO_SECONDS * tick_rate as f32) as u64;

    log::info!(
        "running '{}' for {} ticks at {} Hz",
        simulation.level.name,
        total_ticks,
        tick_rate
    );

    let mut vaults = 0u32;
    let mut landings = 0u32;
    let mut was_on_floor = true;

    for tick in 0..total_ticks {
        let mut input = PlayerInput::default();
        input.movement.forward = true;

        // Tap jump whenever a vault is on offer; the core turns the same
        // press into a jump if it is not.
        let can_vault = simulation
            .get_player(player_id)
            .map(|p| p.locomotion.can_vault)
            .unwrap_or(false);
        input.jump = can_vault && tick % 2 == 0;

        simulation.tick(&[input]);

        for event in simulation.take_events() {
            vaults += 1;
            log::info!("tick {tick}: {event:?}");
        }

        let player = simulation.get_player(player_id).expect("player exists");
        let state = &player.locomotion;

        // Landing edge, the way effect glue would poll for it.
        if state.on_floor && !was_on_floor {
            landings += 1;
            log::info!(
                "tick {tick}: landed at {:.2} with fall velocity {:.2}",
                state.position,
                state.last_fall_velocity
            );
        }
        was_on_floor = state.on_floor;

        if tick % (tick_rate as u64 / 2) == 0 {
            log::info!(
                "tick {tick}: pos {:>6.2} {:>5.2} {:>5.2}  vel {:>6.2}  floor {}  vault {}  probes {}",
                state.position.x,
                state.position.y,
                state.position.z,
                state.velocity.length(),
                state.on_floor,
                state.is_vaulting(),
                state.downcast.probes_done,
            );
        }
    }

    let player = simulation.get_player(player_id).expect("player exists");
    log::info!(
        "demo done: final position {:.2}, {} vault(s), {} landing(s)",
        player.position(),
        vaults,
        landings
    );
}
