//! Data-driven game balance
//!
//! Every board and physics constant lives here so a run can be reproduced
//! from a seed plus a tuning file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning is rejected at construction time
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A width or height is zero, negative or not finite
    InvalidDimension { field: &'static str, value: f32 },
    /// Gravity must pull downward
    InvalidGravity(f32),
    /// Impulse must push upward
    InvalidImpulse(f32),
    /// Pipes must scroll leftward
    InvalidScrollVelocity(f32),
    /// Spawn interval must be positive
    InvalidSpawnInterval(f32),
    /// Tick rate must be positive
    InvalidTickRate(f32),
    /// Player does not fit on the board
    PlayerOutOfBoard,
    /// JSON could not be parsed
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            Self::InvalidGravity(v) => write!(f, "gravity must be positive, got {}", v),
            Self::InvalidImpulse(v) => write!(f, "impulse must be negative, got {}", v),
            Self::InvalidScrollVelocity(v) => {
                write!(f, "scroll velocity must be negative, got {}", v)
            }
            Self::InvalidSpawnInterval(v) => {
                write!(f, "spawn interval must be positive, got {}", v)
            }
            Self::InvalidTickRate(v) => write!(f, "tick rate must be positive, got {}", v),
            Self::PlayerOutOfBoard => write!(f, "player does not fit inside the board"),
            Self::Parse(msg) => write!(f, "invalid tuning json: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {}

/// Board, sprite and physics parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub board_width: f32,
    pub board_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_base_y: f32,
    /// Pixels per tick (negative = leftward)
    pub scroll_velocity: f32,
    /// Pixels per tick²
    pub gravity: f32,
    /// Pixels per tick (negative = upward)
    pub impulse_velocity: f32,
    /// Seconds between pipe pairs
    pub spawn_interval: f32,
    /// Simulation ticks per second
    pub tick_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_base_y: OBSTACLE_BASE_Y,
            scroll_velocity: SCROLL_VELOCITY,
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            spawn_interval: SPAWN_INTERVAL,
            tick_rate: 1.0 / SIM_DT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), TuningError> {
        let dims = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (field, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::InvalidDimension { field, value });
            }
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(TuningError::InvalidGravity(self.gravity));
        }
        if !(self.impulse_velocity.is_finite() && self.impulse_velocity < 0.0) {
            return Err(TuningError::InvalidImpulse(self.impulse_velocity));
        }
        if !(self.scroll_velocity.is_finite() && self.scroll_velocity < 0.0) {
            return Err(TuningError::InvalidScrollVelocity(self.scroll_velocity));
        }
        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            return Err(TuningError::InvalidSpawnInterval(self.spawn_interval));
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(TuningError::InvalidTickRate(self.tick_rate));
        }
        if self.player_x() + self.player_width > self.board_width
            || self.player_height > self.board_height
        {
            return Err(TuningError::PlayerOutOfBoard);
        }
        Ok(())
    }

    /// Fixed player column (one eighth of the board)
    pub fn player_x(&self) -> f32 {
        self.board_width / 8.0
    }

    /// Player spawn height (board centre)
    pub fn player_start_y(&self) -> f32 {
        self.board_height / 2.0
    }

    /// Vertical opening between the two pipes of a pair
    pub fn gap_height(&self) -> f32 {
        self.board_height / 4.0
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_x(), 45.0);
        assert_eq!(tuning.player_start_y(), 320.0);
        assert_eq!(tuning.gap_height(), 160.0);
    }

    #[test]
    fn test_rejects_negative_dimension() {
        let tuning = Tuning {
            board_height: -1.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::InvalidDimension {
                field: "board_height",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_wrong_signs() {
        let up_gravity = Tuning {
            gravity: -0.4,
            ..Default::default()
        };
        assert!(matches!(
            up_gravity.validate(),
            Err(TuningError::InvalidGravity(_))
        ));

        let down_impulse = Tuning {
            impulse_velocity: 6.0,
            ..Default::default()
        };
        assert!(matches!(
            down_impulse.validate(),
            Err(TuningError::InvalidImpulse(_))
        ));

        let right_scroll = Tuning {
            scroll_velocity: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            right_scroll.validate(),
            Err(TuningError::InvalidScrollVelocity(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_player() {
        let tuning = Tuning {
            player_width: 400.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::PlayerOutOfBoard));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.board_width, BOARD_WIDTH);
    }

    #[test]
    fn test_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("invalid tuning json"));

        let err = Tuning::from_json(r#"{ "spawn_interval": 0.0 }"#).unwrap_err();
        assert_eq!(err, TuningError::InvalidSpawnInterval(0.0));
    }
}
