//! Fixed timestep simulation tick
//!
//! Order inside a tick is fixed: physics, collision, scoring, eviction,
//! then the terminal check. Collision always sees the post-physics position.

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState, LossCause};
use crate::consts::SCORE_PER_OBSTACLE;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (tap/click/space) delivered since the previous tick
    pub impulse: bool,
}

/// Advance the run by one tick. Does nothing unless the run is active.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    step_physics(state, input);

    let hit = first_hit(&state.player, &state.obstacles).is_some();
    if hit {
        state.events.push(GameEvent::Collided);
    }

    award_passes(state);
    evict_offscreen(state);

    let fell_out = state.player.pos.y > state.tuning.board_height;
    let cause = if hit {
        Some(LossCause::Collision)
    } else if fell_out {
        Some(LossCause::FellOut)
    } else {
        None
    };

    if let Some(cause) = cause {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            cause,
            score: state.score,
        });
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            cause,
            state.time_ticks,
            state.score
        );
    }
}

/// Integrate the player and scroll every pipe.
///
/// An impulse replaces the accumulated velocity instead of adding to it.
pub fn step_physics(state: &mut GameState, input: &TickInput) {
    if state.is_terminal() {
        return;
    }

    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.impulse {
        player.vel_y = tuning.impulse_velocity;
        state.events.push(GameEvent::Flapped);
    } else {
        player.vel_y += tuning.gravity;
    }
    player.pos.y = (player.pos.y + player.vel_y).max(0.0);

    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x += tuning.scroll_velocity;
    }
}

/// Mark pipes whose trailing edge is behind the player and score them.
///
/// Returns the number of pipes newly passed.
pub fn award_passes(state: &mut GameState) -> usize {
    let player_x = state.player.pos.x;
    let mut newly_passed = 0;

    for obstacle in state.obstacles.iter_mut() {
        if !obstacle.passed && player_x > obstacle.trailing_edge() {
            obstacle.passed = true;
            state.score += SCORE_PER_OBSTACLE;
            newly_passed += 1;
            state.events.push(GameEvent::ObstaclePassed { score: state.score });
        }
    }

    // Two half points per pair
    state.gaps_cleared = state.score as u32;

    newly_passed
}

/// Drop pipes that have scrolled completely past the left edge.
///
/// Pipes share a velocity and are queued in spawn order, so only the front
/// can ever be off-screen first.
pub fn evict_offscreen(state: &mut GameState) -> usize {
    let mut evicted = 0;
    while state
        .obstacles
        .front()
        .is_some_and(|front| front.trailing_edge() < 0.0)
    {
        state.obstacles.pop_front();
        evicted += 1;
    }
    if evicted > 0 {
        log::debug!(
            "Evicted {} pipes, {} live",
            evicted,
            state.obstacles.len()
        );
    }
    evicted
}
