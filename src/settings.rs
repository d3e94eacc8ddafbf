//! Player preferences
//!
//! Only the audio mix lives here; the simulation never reads settings.

use serde::{Deserialize, Serialize};

/// Which mixer channel a cue plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioChannel {
    Sfx,
    Music,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            // Music sits under the effects
            music_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::warn!("Ignoring unreadable settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain struct of floats and bools always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Volumes forced into 0.0 - 1.0
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Final gain for a channel
    pub fn effective_volume(&self, channel: AudioChannel) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel_volume = match channel {
            AudioChannel::Sfx => self.sfx_volume,
            AudioChannel::Music => self.music_volume,
        };
        self.master_volume * channel_volume
    }
}
