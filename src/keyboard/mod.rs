//! # Keyboard Module
//!
//! On-screen piano keyboard input.
//!
//! The controller owns one [`Key`] per pitch in the keyboard span. A press plays
//! the key on the current synthesizer channel at once and appends a quarter-note
//! token such as `" 4C5"` to the notation buffer; a release silences it.
//!
//! ## Key Layout
//! ```text
//!   |C#| |D#|   |F#| |G#| |A#|
//! | C  | D  | E  | F  | G  | A  | B  |
//! ```
//! White keys sit side by side. Each black key straddles the boundary between
//! two white keys and is hit-tested first, so it wins where they overlap.
//!
//! ## Example
//! ```rust
//! use melody::buffer::NotationBuffer;
//! use melody::channel::ChannelState;
//! use melody::keyboard::{KeyboardInputController, KeyboardLayout, Point, SynthesizerChannel};
//!
//! #[derive(Default)]
//! struct Silent;
//! impl SynthesizerChannel for Silent {
//!     fn note_on(&mut self, _pitch: u8, _velocity: u8) {}
//!     fn note_off(&mut self, _pitch: u8, _velocity: u8) {}
//! }
//!
//! let mut keyboard = KeyboardInputController::new(&KeyboardLayout::default());
//! let mut buffer = NotationBuffer::new();
//! let channel = ChannelState::default();
//!
//! // Leftmost white key of the default layout is pitch 24 (C2).
//! let key = keyboard.key_at(Point::new(2, 70)).unwrap();
//! keyboard.on_press(key, &channel, &mut Silent, &mut buffer);
//! assert_eq!(buffer.read(), " 4C2");
//! ```
//!
//! ## Sub-modules
//! - `layout` - Point, Rect, Key, KeyboardLayout
//! - `controller` - KeyboardInputController

mod controller;
mod layout;

pub use controller::KeyboardInputController;
pub use layout::{Key, KeyId, KeyboardLayout, Point, Rect};

/// A live synthesizer channel that sounds notes immediately.
pub trait SynthesizerChannel {
    fn note_on(&mut self, pitch: u8, velocity: u8);
    fn note_off(&mut self, pitch: u8, velocity: u8);
}
