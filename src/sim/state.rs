//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; the tuning is read-only.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended (fell out or hit a pipe)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Dropped below the bottom of the board
    FellOut,
    /// Overlapped a pipe
    Collision,
}

/// Things that happened during a tick, drained by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Run started (first tap or reset)
    RunStarted,
    /// Impulse applied to the player
    Flapped,
    /// A pipe pair entered at the right edge
    PairSpawned { gap_top: f32 },
    /// One pipe's trailing edge went behind the player
    ObstaclePassed { score: f32 },
    /// Player overlapped a pipe
    Collided,
    /// Run is over
    GameOver { cause: LossCause, score: f32 },
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive = down)
    pub vel_y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x(), tuning.player_start_y()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
        }
    }

    /// Put the player back at the spawn point, at rest
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(tuning.player_x(), tuning.player_start_y());
        self.vel_y = 0.0;
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Which half of a pipe pair (render only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Upper,
    Lower,
}

/// A single pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner; y never changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
    /// Trailing edge is behind the player (scored)
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Right edge x
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters, fixed for the lifetime of the state
    pub tuning: Tuning,
    /// Seed of the current run
    pub seed: u64,
    /// Gap offset source
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Live pipes in spawn order; the front is the oldest and leftmost
    pub obstacles: VecDeque<Obstacle>,
    /// +0.5 per pipe passed
    pub score: f32,
    /// Full pairs cleared
    pub gaps_cleared: u32,
    /// Simulation ticks since the run started
    pub time_ticks: u64,
    /// Pending events (drain with `take_events`)
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state waiting for the first tap
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(&tuning);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            player,
            obstacles: VecDeque::new(),
            score: 0.0,
            gaps_cleared: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Clear run data and respawn the player. The rng keeps its stream so
    /// consecutive runs see different pipes.
    pub fn reset_run(&mut self) {
        self.player.respawn(&self.tuning);
        self.obstacles.clear();
        self.score = 0.0;
        self.gaps_cleared = 0;
        self.time_ticks = 0;
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
