//! Flappy Pipes - a side-scrolling pipe-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Frame orchestration (run state machine, periodic drivers)
//! - `render`: Per-frame snapshot handed to an external renderer
//! - `audio`: Sound cues handed to an external audio player
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volume mixing)
//! - `highscores`: In-memory session leaderboard

pub mod audio;
pub mod game;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioCue, AudioSink};
pub use game::Game;
pub use highscores::HighScores;
pub use render::{RenderFrame, RenderSink};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, physics constants are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted by a single advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 360.0;
    pub const BOARD_HEIGHT: f32 = 640.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;

    /// Pipe sprite size
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const OBSTACLE_HEIGHT: f32 = 512.0;
    /// Reference y the upper pipe is offset from
    pub const OBSTACLE_BASE_Y: f32 = 0.0;

    /// Horizontal pipe velocity (pixels/tick, leftward)
    pub const SCROLL_VELOCITY: f32 = -2.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a flap (pixels/tick, upward)
    pub const IMPULSE_VELOCITY: f32 = -6.0;

    /// Seconds between pipe pairs
    pub const SPAWN_INTERVAL: f32 = 1.5;

    /// Score for each pipe passed (a pair is worth 1.0)
    pub const SCORE_PER_OBSTACLE: f32 = 0.5;
}

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub pos: glam::Vec2,
    pub size: glam::Vec2,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: glam::Vec2::new(x, y),
            size: glam::Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}
