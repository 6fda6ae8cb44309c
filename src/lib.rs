pub mod buffer;
pub mod channel;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod midi;
pub mod notation;
pub mod playback;
pub mod timeline;

pub use buffer::NotationBuffer;
pub use config::Config;
pub use error::*;
pub use notation::parse;
pub use timeline::{build, Timeline};

/// Compile notation text to a timeline with the configured resolution,
/// channel and chord timing.
/// This is the main entry point for the library.
pub fn compile(text: &str, config: &Config) -> Timeline {
    let chords = parse(text);
    build(&chords, config.resolution, &config.channel, config.chord_timing)
}
