//! # Configuration
//!
//! YAML configuration. Every key is optional:
//!
//! ```yaml
//! resolution: 10        # ticks per quarter note
//! tempo: 120            # quarter notes per minute
//! chord-timing: last-token   # or: longest
//! port: "FluidSynth"    # substring of the MIDI output port name
//! channel:
//!   num: 0
//!   velocity: 64
//! keyboard:
//!   octaves: 6
//!   lowest-pitch: 24
//!   key-width: 16
//!   key-height: 80
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::channel::ChannelState;
use crate::error::MelodyError;
use crate::keyboard::KeyboardLayout;
use crate::notation::MAX_NAMED_PITCH;
use crate::timeline::{ChordTiming, DEFAULT_RESOLUTION};

pub const DEFAULT_TEMPO: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub resolution: u32,
    pub tempo: u32,
    pub chord_timing: ChordTiming,
    pub port: Option<String>,
    pub channel: ChannelState,
    pub keyboard: KeyboardLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            tempo: DEFAULT_TEMPO,
            chord_timing: ChordTiming::default(),
            port: None,
            channel: ChannelState::default(),
            keyboard: KeyboardLayout::default(),
        }
    }
}

impl Config {
    /// Parse and validate a YAML document. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, MelodyError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| MelodyError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MelodyError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<(), MelodyError> {
        if self.resolution == 0 {
            return Err(MelodyError::ConfigError("resolution must be at least 1".to_string()));
        }
        if self.tempo == 0 {
            return Err(MelodyError::ConfigError("tempo must be at least 1".to_string()));
        }
        if self.channel.num > 15 {
            return Err(MelodyError::ConfigError(format!(
                "channel num must be 0-15, got {}",
                self.channel.num
            )));
        }
        let controls = [
            ("velocity", self.channel.velocity),
            ("pressure", self.channel.pressure),
            ("bend", self.channel.bend),
            ("reverb", self.channel.reverb),
        ];
        if let Some((name, value)) = controls.iter().find(|(_, value)| *value > 127) {
            return Err(MelodyError::ConfigError(format!(
                "channel {} must be 0-127, got {}",
                name, value
            )));
        }
        let keyboard = &self.keyboard;
        if keyboard.octaves == 0 || keyboard.key_width < 2 || keyboard.key_height < 2 {
            return Err(MelodyError::ConfigError(
                "keyboard needs at least one octave and keys of at least 2x2".to_string(),
            ));
        }
        if keyboard.lowest_pitch > MAX_NAMED_PITCH {
            return Err(MelodyError::ConfigError(format!(
                "keyboard lowest-pitch must be 0-{}, got {}",
                MAX_NAMED_PITCH, keyboard.lowest_pitch
            )));
        }
        Ok(())
    }
}
