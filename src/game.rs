//! Frame orchestration
//!
//! Owns the run state machine (`NotStarted -> Running -> GameOver -> Running`)
//! and the two periodic drivers. Hosts either feed wall time to `advance`
//! or call `on_frame` / `on_spawn_timer` from their own schedulers.

use crate::audio::{self, AudioSink};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::highscores::HighScores;
use crate::render::{RenderFrame, RenderSink};
use crate::settings::Settings;
use crate::sim::{
    Drivers, GameEvent, GamePhase, GameState, TickInput, autopilot, place_pair, tick,
};
use crate::tuning::{Tuning, TuningError};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    drivers: Drivers,
    /// One-shot input waiting for the next tick
    input: TickInput,
    settings: Settings,
    high_scores: HighScores,
}

impl Game {
    /// Validate the tuning and build a game waiting for its first tap
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let drivers = Drivers::new(tuning.tick_dt(), tuning.spawn_interval);
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state: GameState::new(tuning, seed),
            drivers,
            input: TickInput::default(),
            settings: Settings::default(),
            high_scores: HighScores::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Player tap. Starts the run from the title screen, queues a flap while
    /// running, and is ignored once the run is over.
    pub fn impulse(&mut self) {
        match self.state.phase {
            GamePhase::NotStarted => self.start_run(),
            GamePhase::Running => self.input.impulse = true,
            GamePhase::GameOver => log::debug!("Impulse ignored after game over"),
        }
    }

    /// Let the autopilot tap for the player (idle/demo mode)
    pub fn autopilot(&mut self) {
        if autopilot::wants_impulse(&self.state) {
            self.impulse();
        }
    }

    /// Restart after a game over. Returns false (and changes nothing) from
    /// any other phase.
    pub fn reset(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            log::warn!("Reset ignored in phase {:?}", self.state.phase);
            return false;
        }
        self.state.reset_run();
        self.input = TickInput::default();
        self.start_run();
        true
    }

    fn start_run(&mut self) {
        self.state.phase = GamePhase::Running;
        self.drivers.start_all();
        self.state.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.state.seed);
    }

    /// Frame-driver handler: run one simulation tick
    pub fn on_frame(&mut self) {
        if !self.drivers.frame.is_active() {
            return;
        }
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);
        self.settle_terminal();
    }

    /// Spawn-driver handler: place one pipe pair
    pub fn on_spawn_timer(&mut self) {
        if !self.drivers.spawn.is_active() {
            return;
        }
        place_pair(&mut self.state);
    }

    /// Feed elapsed wall time to both drivers. Returns the ticks simulated.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.min(MAX_FRAME_DT);

        let spawns = self.drivers.spawn.advance(dt, u32::MAX);
        for _ in 0..spawns {
            place_pair(&mut self.state);
        }

        let substeps = self.drivers.frame.advance(dt, MAX_SUBSTEPS);
        let mut ticks = 0;
        for _ in 0..substeps {
            self.on_frame();
            ticks += 1;
            if !self.drivers.frame.is_active() {
                break;
            }
        }
        ticks
    }

    /// Stop both drivers (host teardown)
    pub fn shutdown(&mut self) {
        self.drivers.cancel_all();
        self.input = TickInput::default();
        log::info!("Drivers stopped");
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.state)
    }

    /// Drain pending events without routing them anywhere
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Hand the current frame to `render`, route pending cues to `audio`,
    /// and return the drained events.
    pub fn present<R, A>(&mut self, render: &mut R, audio: &mut A) -> Vec<GameEvent>
    where
        R: RenderSink + ?Sized,
        A: AudioSink + ?Sized,
    {
        let events = self.state.take_events();
        audio::dispatch(&events, &self.settings, audio);
        render.present(&self.frame());
        events
    }

    /// Stop both drivers together the moment the run ends
    fn settle_terminal(&mut self) {
        if !self.state.is_terminal() || !self.drivers.any_active() {
            return;
        }
        self.drivers.cancel_all();
        let cause = self.state.events.iter().rev().find_map(|e| match e {
            GameEvent::GameOver { cause, .. } => Some(*cause),
            _ => None,
        });
        if let Some(cause) = cause {
            self.high_scores.record_run(&self.state, cause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, CueLog};
    use crate::render::LatestFrame;
    use crate::sim::{LossCause, pair_at_offset};

    fn new_game() -> Game {
        Game::new(Tuning::default(), 12345).unwrap()
    }

    /// Let the player fall until the run ends
    fn fall_out(game: &mut Game) {
        for _ in 0..200 {
            game.on_frame();
            if game.phase() == GamePhase::GameOver {
                return;
            }
        }
        panic!("player never fell out");
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Game::new(tuning, 1),
            Err(TuningError::InvalidGravity(_))
        ));
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let mut game = new_game();
        game.on_frame();
        game.on_spawn_timer();
        assert_eq!(game.advance(0.1), 0);
        assert_eq!(game.state().player.pos.y, 320.0);
        assert!(game.state().obstacles.is_empty());
    }

    #[test]
    fn test_first_tap_starts_without_flap() {
        let mut game = new_game();
        game.impulse();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.drivers().frame.is_active());
        assert!(game.drivers().spawn.is_active());

        game.on_frame();
        assert!((game.state().player.vel_y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_tap_flaps_on_next_tick_once() {
        let mut game = new_game();
        game.impulse();
        game.on_frame();

        game.impulse();
        game.on_frame();
        assert_eq!(game.state().player.vel_y, -6.0);

        game.on_frame();
        assert!((game.state().player.vel_y - (-5.6)).abs() < 1e-6);
    }

    #[test]
    fn test_advance_drives_both_timers() {
        let tuning = Tuning {
            tick_rate: 8.0,
            ..Default::default()
        };
        let mut game = Game::new(tuning, 5).unwrap();
        game.impulse();

        let mut ticks = 0;
        for _ in 0..23 {
            ticks += game.advance(0.0625);
        }
        assert!(game.state().obstacles.is_empty());

        ticks += game.advance(0.0625);
        assert_eq!(ticks, 12);
        assert_eq!(game.state().obstacles.len(), 2);
        assert_eq!(game.state().time_ticks, 12);
    }

    #[test]
    fn test_game_over_cancels_both_drivers() {
        let mut game = new_game();
        game.impulse();
        game.on_spawn_timer();
        fall_out(&mut game);

        assert!(!game.drivers().any_active());
        let live = game.state().obstacles.len();
        let x = game.state().obstacles[0].pos.x;

        // Neither driver may touch the board after the loss
        game.on_spawn_timer();
        game.on_frame();
        for _ in 0..100 {
            game.advance(0.1);
        }
        assert_eq!(game.state().obstacles.len(), live);
        assert_eq!(game.state().obstacles[0].pos.x, x);

        game.impulse();
        game.on_frame();
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_reset_reinitializes_run() {
        let mut game = new_game();
        game.impulse();
        game.on_spawn_timer();
        game.state.score = 2.5;
        fall_out(&mut game);
        assert!(!game.state().obstacles.is_empty());

        assert!(game.reset());

        let state = game.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos.y, 320.0);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(game.drivers().frame.is_active() && game.drivers().spawn.is_active());
    }

    #[test]
    fn test_reset_only_after_game_over() {
        let mut game = new_game();
        assert!(!game.reset());
        assert_eq!(game.phase(), GamePhase::NotStarted);

        game.impulse();
        game.on_frame();
        assert!(!game.reset());
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_loss_recorded_on_leaderboard() {
        let mut game = new_game();
        game.impulse();
        game.state.score = 3.0;
        fall_out(&mut game);

        let best = &game.high_scores().entries[0];
        assert_eq!(best.score, 3.0);
        assert_eq!(best.cause, LossCause::FellOut);
        assert_eq!(best.seed, 12345);
    }

    #[test]
    fn test_present_routes_cues_and_frame() {
        let mut game = new_game();
        let mut screen = LatestFrame::default();
        let mut speaker = CueLog::default();

        game.impulse();
        // Put a pipe right on top of the player
        let (_, mut lower) = pair_at_offset(&game.state.tuning, 0.0);
        lower.pos = glam::Vec2::new(40.0, 330.0);
        game.state.obstacles.push_back(lower);
        game.on_frame();

        let events = game.present(&mut screen, &mut speaker);
        assert!(events.contains(&GameEvent::Collided));
        let cues: Vec<AudioCue> = speaker.cues.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            cues,
            vec![AudioCue::MusicStart, AudioCue::Hit, AudioCue::MusicStop]
        );
        assert_eq!(screen.presented, 1);
        assert_eq!(
            screen.frame.as_ref().map(|f| f.phase),
            Some(GamePhase::GameOver)
        );
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = new_game();
        let mut b = new_game();
        for step in 0..2000 {
            a.autopilot();
            b.autopilot();
            if step % 90 == 0 {
                a.on_spawn_timer();
                b.on_spawn_timer();
            }
            a.on_frame();
            b.on_frame();
        }
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.state().time_ticks, b.state().time_ticks);
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut game = new_game();
        game.impulse();
        game.shutdown();
        game.on_frame();
        game.on_spawn_timer();
        assert_eq!(game.state().time_ticks, 0);
        assert!(game.state().obstacles.is_empty());
    }
}
