//! # Error Types
//!
//! This module defines the error type for the melody crate.
//!
//! Notation mistakes are NOT errors: the parser is permissive and malformed or
//! out-of-range notes simply drop out of playback. Errors are reserved for the
//! device boundary and for configuration.
//!
//! ## Error Types
//! - `DeviceUnavailable` - The sequencer or synthesizer could not be opened
//! - `DeviceError` - An opened device rejected the timeline or failed to start
//! - `PlaybackInProgress` - `play` was called before the previous playback finished
//! - `ConfigError` - Invalid YAML configuration
//! - `IoError` - Reading a notation or configuration file failed
//!
//! ## Usage
//! ```rust
//! use melody::{Config, MelodyError};
//!
//! match Config::from_yaml("resolution: 0") {
//!     Ok(_) => println!("loaded"),
//!     Err(MelodyError::ConfigError(message)) => eprintln!("bad config: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MelodyError {
    /// The sequencing or synthesis device could not be acquired.
    ///
    /// # Example
    /// ```
    /// # use melody::MelodyError;
    /// let err = MelodyError::DeviceUnavailable("no MIDI output ports".to_string());
    /// assert_eq!(err.to_string(), "Device unavailable: no MIDI output ports");
    /// ```
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device was opened but refused the timeline or could not start.
    #[error("Device error: {0}")]
    DeviceError(String),

    /// A playback started earlier has not signalled end-of-track yet.
    ///
    /// # Example
    /// ```
    /// # use melody::MelodyError;
    /// assert_eq!(
    ///     MelodyError::PlaybackInProgress.to_string(),
    ///     "Playback already in progress"
    /// );
    /// ```
    #[error("Playback already in progress")]
    PlaybackInProgress,

    /// Invalid configuration.
    ///
    /// # Example
    /// ```
    /// # use melody::MelodyError;
    /// let err = MelodyError::ConfigError("resolution must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: resolution must be at least 1");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
