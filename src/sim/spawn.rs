//! Pipe pair generation
//!
//! The gap offset is the only random element of the game.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Build a pair at the right edge for a given gap offset `r` in
/// `[0, obstacle_height / 2)`
pub fn pair_at_offset(tuning: &Tuning, r: f32) -> (Obstacle, Obstacle) {
    let size = Vec2::new(tuning.obstacle_width, tuning.obstacle_height);
    let x = tuning.board_width;

    let upper_y = tuning.obstacle_base_y - tuning.obstacle_height / 4.0 - r;
    let lower_y = upper_y + (tuning.obstacle_height + tuning.gap_height());

    let upper = Obstacle {
        kind: ObstacleKind::Upper,
        pos: Vec2::new(x, upper_y),
        size,
        passed: false,
    };
    let lower = Obstacle {
        kind: ObstacleKind::Lower,
        pos: Vec2::new(x, lower_y),
        size,
        passed: false,
    };
    (upper, lower)
}

/// Draw a gap offset from `rng` and build the pair
pub fn spawn_pair<R: Rng>(tuning: &Tuning, rng: &mut R) -> (Obstacle, Obstacle) {
    let r = rng.random_range(0.0..tuning.obstacle_height / 2.0);
    pair_at_offset(tuning, r)
}

/// Spawn-timer handler: append a new pair to the live queue.
///
/// Returns false (and does nothing) once the run is over.
pub fn place_pair(state: &mut GameState) -> bool {
    if state.is_terminal() {
        return false;
    }
    let (upper, lower) = spawn_pair(&state.tuning, &mut state.rng);
    let gap_top = upper.bounds().bottom();
    log::debug!(
        "Pair spawned at tick {}: gap {:.1}..{:.1}",
        state.time_ticks,
        gap_top,
        lower.pos.y
    );
    state.obstacles.push_back(upper);
    state.obstacles.push_back(lower);
    state.events.push(GameEvent::PairSpawned { gap_top });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pair_geometry_at_zero_offset() {
        let tuning = Tuning::default();
        let (upper, lower) = pair_at_offset(&tuning, 0.0);

        assert_eq!(upper.kind, ObstacleKind::Upper);
        assert_eq!(lower.kind, ObstacleKind::Lower);
        assert_eq!(upper.pos, Vec2::new(360.0, -128.0));
        assert_eq!(lower.pos, Vec2::new(360.0, 544.0));
        assert!(!upper.passed && !lower.passed);
        // Opening is exactly a quarter of the board
        assert_eq!(lower.pos.y - upper.bounds().bottom(), 160.0);
    }

    #[test]
    fn test_seeded_spawns_repeat() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(spawn_pair(&tuning, &mut a), spawn_pair(&tuning, &mut b));
        }
    }

    #[test]
    fn test_place_pair_noop_when_terminal() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.phase = GamePhase::Running;
        assert!(place_pair(&mut state));
        assert_eq!(state.obstacles.len(), 2);

        state.phase = GamePhase::GameOver;
        assert!(!place_pair(&mut state));
        assert_eq!(state.obstacles.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_pair_spacing_is_constant(r in 0.0f32..256.0) {
            let tuning = Tuning::default();
            let (upper, lower) = pair_at_offset(&tuning, r);
            let spacing = lower.pos.y - upper.pos.y;
            prop_assert!((spacing - (tuning.obstacle_height + tuning.gap_height())).abs() < 1e-3);
            prop_assert_eq!(upper.pos.x, lower.pos.x);
        }

        #[test]
        fn prop_offset_within_band(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let (upper, _) = spawn_pair(&tuning, &mut rng);
            let top = tuning.obstacle_base_y - tuning.obstacle_height / 4.0;
            prop_assert!(upper.pos.y <= top);
            prop_assert!(upper.pos.y >= top - tuning.obstacle_height / 2.0);
        }
    }
}
