//! Flappy Pipes headless entry point
//!
//! Plays seeded demo runs with the autopilot and prints the session
//! leaderboard. Usage: `flappy-pipes [seed] [runs] [tuning.json]`

use flappy_pipes::audio::CueLog;
use flappy_pipes::render::LatestFrame;
use flappy_pipes::sim::{GameEvent, GamePhase};
use flappy_pipes::{Game, Tuning};

/// Give up on a run after two simulated minutes
const MAX_RUN_SECONDS: f32 = 120.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Flappy Pipes (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => rand::random::<u64>(),
    };
    let runs = match args.next() {
        Some(s) => s.parse::<u32>()?,
        None => 5,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(&path)?)?,
        None => Tuning::default(),
    };

    let dt = tuning.tick_dt();
    let max_ticks = (MAX_RUN_SECONDS / dt) as u64;
    let mut game = Game::new(tuning, seed)?;
    let mut screen = LatestFrame::default();
    let mut speaker = CueLog::default();

    for run in 1..=runs {
        if run > 1 {
            game.reset();
        }

        let mut flaps = 0u32;
        loop {
            game.autopilot();
            game.advance(dt);
            flaps += game
                .present(&mut screen, &mut speaker)
                .iter()
                .filter(|e| matches!(e, GameEvent::Flapped))
                .count() as u32;

            if game.phase() == GamePhase::GameOver {
                break;
            }
            if game.state().time_ticks >= max_ticks {
                log::warn!("Run {} hit the time limit, stopping it", run);
                game.shutdown();
                break;
            }
        }

        let label = screen
            .frame
            .as_ref()
            .map(|f| f.score_label())
            .unwrap_or_default();
        println!(
            "run {:>2}: score {:>5}  ticks {:>6}  flaps {:>4}",
            run,
            label,
            game.state().time_ticks,
            flaps
        );

        if game.phase() != GamePhase::GameOver {
            break;
        }
    }

    println!("\nSession leaderboard (seed {}):", seed);
    for (i, entry) in game.high_scores().entries.iter().enumerate() {
        println!(
            "{:>2}. {:>5}  ({:?}, {} ticks)",
            i + 1,
            entry.score,
            entry.cause,
            entry.ticks
        );
    }
    if game.high_scores().is_empty() {
        println!("    no scoring runs");
    }
    log::info!("{} cues routed", speaker.cues.len());

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Game` directly; there is no headless runner on wasm
}
