//! Audio cue routing
//!
//! The core decides *when* a sound should play; the host decides how.
//! Cues are derived from simulation events and mixed with `Settings`.

use crate::settings::{AudioChannel, Settings};
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Impulse applied (wing flap)
    Wing,
    /// Player hit a pipe
    Hit,
    /// Background music starts from the top (run start or reset)
    MusicStart,
    /// Background music stops and rewinds (game over)
    MusicStop,
}

impl AudioCue {
    /// Cue for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted => Some(AudioCue::MusicStart),
            GameEvent::Flapped => Some(AudioCue::Wing),
            GameEvent::Collided => Some(AudioCue::Hit),
            GameEvent::GameOver { .. } => Some(AudioCue::MusicStop),
            GameEvent::PairSpawned { .. } | GameEvent::ObstaclePassed { .. } => None,
        }
    }

    pub fn channel(&self) -> AudioChannel {
        match self {
            AudioCue::Wing | AudioCue::Hit => AudioChannel::Sfx,
            AudioCue::MusicStart | AudioCue::MusicStop => AudioChannel::Music,
        }
    }
}

/// Receives cues with their final gain
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Route every cue-bearing event to `sink`.
///
/// Silent effect cues are dropped; music stop is always delivered so the
/// host can rewind its track even while muted.
pub fn dispatch<S: AudioSink + ?Sized>(events: &[GameEvent], settings: &Settings, sink: &mut S) {
    for cue in events.iter().filter_map(AudioCue::from_event) {
        let volume = settings.effective_volume(cue.channel());
        if volume <= 0.0 && cue != AudioCue::MusicStop {
            continue;
        }
        sink.play(cue, volume);
    }
}

/// Records cues instead of playing them (headless hosts, tests)
#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: Vec<(AudioCue, f32)>,
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::trace!("cue {:?} at {:.2}", cue, volume);
        self.cues.push((cue, volume));
    }
}
