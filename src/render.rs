//! Render handoff
//!
//! The core never draws. Each frame it hands a snapshot of what is on the
//! board to whatever renderer the host plugs in.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::sim::{GamePhase, GameState, ObstacleKind};

/// One pipe as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSprite {
    pub kind: ObstacleKind,
    pub bounds: Rect,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub board: Rect,
    pub player: Rect,
    pub obstacles: Vec<ObstacleSprite>,
    pub score: f32,
    pub phase: GamePhase,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            board: Rect::new(
                0.0,
                0.0,
                state.tuning.board_width,
                state.tuning.board_height,
            ),
            player: state.player.bounds(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleSprite {
                    kind: o.kind,
                    bounds: o.bounds(),
                })
                .collect(),
            score: state.score,
            phase: state.phase,
        }
    }

    /// Score text as drawn on the HUD (halves shown while a pair is half cleared)
    pub fn score_label(&self) -> String {
        if self.score.fract() == 0.0 {
            format!("{}", self.score as u32)
        } else {
            format!("{:.1}", self.score)
        }
    }

    /// Pipes that intersect the visible board
    pub fn visible_obstacles(&self) -> impl Iterator<Item = &ObstacleSprite> {
        self.obstacles
            .iter()
            .filter(|o| o.bounds.right() > 0.0 && o.bounds.left() < self.board.right())
    }
}

/// Receives a frame snapshot once per tick
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Keeps only the latest frame (headless hosts, tests)
#[derive(Debug, Default)]
pub struct LatestFrame {
    pub frame: Option<RenderFrame>,
    pub presented: u64,
}

impl RenderSink for LatestFrame {
    fn present(&mut self, frame: &RenderFrame) {
        self.frame = Some(frame.clone());
        self.presented += 1;
    }
}
