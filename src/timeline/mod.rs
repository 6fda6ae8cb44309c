//! # Timeline Module
//!
//! Compile parsed chords into a single track of timed note-on/note-off events.
//!
//! ## Timing
//! Time is counted in ticks at a fixed resolution (ticks per quarter note).
//! A note with duration divisor `d` lasts `resolution * 4 / d` ticks:
//!
//! | divisor | name    | ticks at resolution 10 |
//! |---------|---------|------------------------|
//! | 1       | whole   | 40                     |
//! | 2       | half    | 20                     |
//! | 4       | quarter | 10                     |
//! | 8       | eighth  | 5                      |
//!
//! All notes of a chord start together. How far the next chord starts is set by
//! [`ChordTiming`]: by default the duration of the note written last in the
//! chord, whether or not that note was playable.
//!
//! ## Example
//! ```rust
//! use melody::channel::ChannelState;
//! use melody::notation::parse;
//! use melody::timeline::{build, ChordTiming, EventKind};
//!
//! let chords = parse("4c5+4e5 2g5");
//! let timeline = build(&chords, 10, &ChannelState::default(), ChordTiming::LastToken);
//!
//! assert_eq!(timeline.len(), 6);
//! assert_eq!(timeline.events()[0].kind, EventKind::On);
//! assert_eq!(timeline.end_tick(), 30);
//! ```
//!
//! ## Sub-modules
//! - `types` - TimedEvent, EventKind, Timeline
//! - `builder` - Chords to Timeline

mod builder;
mod types;

#[cfg(test)]
mod tests;

pub use builder::{build, ChordTiming};
pub use types::{channel_message, EventKind, TimedEvent, Timeline, DEFAULT_RESOLUTION};
