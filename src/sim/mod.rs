//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{first_hit, overlaps};
pub use spawn::{pair_at_offset, place_pair, spawn_pair};
pub use state::{
    GameEvent, GamePhase, GameState, LossCause, Obstacle, ObstacleKind, Player,
};
pub use tick::{TickInput, award_passes, evict_offscreen, step_physics, tick};
pub use timer::{Drivers, PeriodicTimer};
