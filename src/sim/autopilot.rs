//! Idle/demo mode - the AI plays the game
//!
//! Flaps whenever the player has sunk below the middle of the next gap and
//! is no longer rising. Pure function of the state, so demo runs stay
//! deterministic for a given seed.

use super::state::{GamePhase, GameState, ObstacleKind};

/// Height the autopilot tries to hold (centre of the next gap, or the board
/// centre when no pipe is ahead)
pub fn target_y(state: &GameState) -> f32 {
    let player_x = state.player.pos.x;
    state
        .obstacles
        .iter()
        .find(|o| o.kind == ObstacleKind::Upper && o.trailing_edge() >= player_x)
        .map(|upper| upper.bounds().bottom() + state.tuning.gap_height() / 2.0)
        .unwrap_or(state.tuning.board_height / 2.0)
}

/// Whether the autopilot would tap this tick
pub fn wants_impulse(state: &GameState) -> bool {
    match state.phase {
        // Any tap starts the run
        GamePhase::NotStarted => true,
        GamePhase::GameOver => false,
        GamePhase::Running => {
            let centre = state.player.pos.y + state.player.size.y / 2.0;
            centre > target_y(state) && state.player.vel_y >= 0.0
        }
    }
}
