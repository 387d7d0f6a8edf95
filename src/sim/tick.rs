//! Per-frame simulation tick
//!
//! Advances the clock by the frame's wall-clock delta, then either plays
//! the jump/landing logic or the death animation.

use super::lane::Intent;
use super::state::{GamePhase, GameState};

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent (at most one; extras mid-jump are dropped anyway)
    pub intent: Option<Intent>,
    /// Leave the start screen
    pub start: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Intents are checked against the phase they were issued in
    if let Some(intent) = input.intent {
        state.handle_intent(intent);
    }
    if input.start {
        state.start();
    }

    let dt = dt.max(0.0);
    state.clock += dt as f64;

    match state.phase {
        GamePhase::NotStarted => {}

        GamePhase::Playing => {
            let tuning = &state.tuning;
            state
                .actor
                .animate(state.clock, tuning.jump_duration, tuning.jump_height);

            // Landing detection runs on the clock, not on animation progress
            state.resolve_landing();

            let tuning = &state.tuning;
            state.camera.follow(
                state.actor.position.z,
                tuning.camera_offset,
                tuning.camera_lerp,
            );
        }

        GamePhase::Dead => {
            let tuning = &state.tuning;
            state.actor.sink(dt, tuning.sink_speed, tuning.sink_floor);
            state.announce_game_over();
        }
    }
}
