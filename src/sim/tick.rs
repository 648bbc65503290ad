//! Fixed timestep simulation tick
//!
//! Per-frame order: one-shot actions, vehicle dynamics (coast-down once the
//! session has ended), physics integration, world wrap, visual sync, pickups,
//! speed telemetry. The one-second session timer is a separate entry point
//! that may be interleaved between ticks.

use super::collectible::collect_within;
use super::events::GameEvent;
use super::input::TickInput;
use super::physics::PhysicsWorld;
use super::state::GameState;
use crate::consts::{SPEED_READOUT_FACTOR, SPEED_REPORT_THRESHOLD};
use crate::highscores::HighScoreStore;
use crate::planar_speed;

/// Advance the game state by one fixed timestep
pub fn tick<P: PhysicsWorld>(state: &mut GameState, physics: &mut P, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    let active = state.session.is_active();

    if active {
        apply_one_shots(state, physics, input);
    }

    let profile = state.registry.get(state.vehicle.profile_index);
    state
        .vehicle
        .drive(physics, input, profile, &state.settings.handling, active);

    physics.step(dt);

    // Wrap before anything reads the position this frame
    if let Some(mut body) = physics.body(state.vehicle.body) {
        let (wrapped, moved) = state.bounds.wrap(body.position);
        if moved {
            log::debug!(
                "Wrapped ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                body.position.x,
                body.position.z,
                wrapped.x,
                wrapped.z
            );
            body.position = wrapped;
            physics.set_body(state.vehicle.body, &body);
        }
    }
    state.vehicle.sync_visual(physics);

    if active {
        collect_pickups(state);
    }

    report_speed(state, physics);
}

fn apply_one_shots<P: PhysicsWorld>(state: &mut GameState, physics: &mut P, input: &TickInput) {
    if input.switch_vehicle {
        match state.vehicle.switch_profile(physics, &state.registry) {
            Ok(index) => {
                let name = state.registry.get(index).name.clone();
                state.push_event(GameEvent::VehicleSwitched { index, name });
            }
            Err(e) => log::error!("Vehicle switch failed: {}", e),
        }
    }
    if input.switch_camera {
        state.camera = state.camera.next();
        state.push_event(GameEvent::CameraChanged(state.camera));
    }
    if input.reset {
        state
            .vehicle
            .reset(physics, state.settings.world.spawn_height);
        state.push_event(GameEvent::VehicleReset);
    }
}

fn collect_pickups(state: &mut GameState) {
    let picked = collect_within(
        &mut state.collectibles,
        state.vehicle.visual.position,
        state.settings.session.pickup_radius,
    );
    for c in picked {
        log::debug!("Collected #{} at ({:.1}, {:.1})", c.id, c.pos.x, c.pos.z);
        state
            .session
            .add_score(state.settings.session.pickup_reward, &mut state.events);
    }
}

fn report_speed<P: PhysicsWorld>(state: &mut GameState, physics: &P) {
    let Some(body) = physics.body(state.vehicle.body) else {
        return;
    };
    let readout = planar_speed(body.linear_velocity) * SPEED_READOUT_FACTOR;
    if (readout - state.reported_speed).abs() > SPEED_REPORT_THRESHOLD {
        state.reported_speed = readout;
        state.push_event(GameEvent::SpeedChanged(readout));
    }
}

/// One external timer tick (once per second). Returns true if it ended the
/// session.
pub fn timer_tick<S: HighScoreStore + ?Sized>(state: &mut GameState, store: &mut S) -> bool {
    state.session.tick_second(store, &mut state.events)
}

/// Drive the session's own timer from frame time, for hosts without a
/// one-second scheduler. Returns true if the session ended during this call.
pub fn advance_timer<S: HighScoreStore + ?Sized>(
    state: &mut GameState,
    store: &mut S,
    frame_dt: f32,
) -> bool {
    let due = state.session.timer.advance(frame_dt);
    (0..due).any(|_| timer_tick(state, store))
}
