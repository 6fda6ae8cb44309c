//! # Notation Module
//!
//! Parse the melody notation typed (or clicked) into the query field.
//!
//! ## Grammar
//! ```text
//! notation := chord (whitespace chord)*
//! chord    := note ('+' note)*
//! note     := digits? letter '#'? digits?
//! letter   := 'c' | 'd' | 'e' | 'f' | 'g' | 'a' | 'b'
//! ```
//!
//! - Leading digits are the duration divisor: `4` = quarter, `2` = half, `8` = eighth.
//!   Missing or unreadable digits mean a quarter note.
//! - Trailing digits are the octave. Missing or unreadable digits mean octave 5.
//! - Letters are case-insensitive on input; names produced by this crate are
//!   upper-case (`C5`, `F#3`).
//!
//! ## Permissive Parsing
//! The parser never fails. Every note becomes a [`ParsedNote`]:
//! - `Valid` - everything was written explicitly and is in range
//! - `Defaulted` - in range, but a duration or octave default was applied
//! - `Invalid` - unknown letter, or pitch/octave/duration out of range
//!
//! Invalid notes stay in the chord so the timeline builder can still use their
//! duration for chord timing; they never produce sound.
//!
//! ## Example
//! ```rust
//! use melody::notation::parse;
//!
//! let chords = parse("4c5+4e5 2g5");
//! assert_eq!(chords.len(), 2);
//! assert_eq!(chords[0].notes().len(), 2);
//! assert_eq!(chords[1].notes()[0].token().midi_pitch(), Some(67));
//! ```
//!
//! ## Sub-modules
//! - `token` - NoteToken, ParsedNote, Chord
//! - `parser` - Notation text to chords
//! - `names` - MIDI pitch to note name and back

mod names;
mod parser;
mod token;

pub use names::{midi_value_to_note_name, note_name_to_midi_pitch};
pub use parser::{parse, parse_note};
pub use token::{
    Chord, Fallback, NoteToken, ParsedNote, DEFAULT_DURATION_DIVISOR, DEFAULT_OCTAVE,
    MAX_DURATION_DIVISOR, MAX_NAMED_PITCH, MAX_OCTAVE,
};
