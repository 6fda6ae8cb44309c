//! Keyboard input controller
//!
//! Key state machine per key:
//! ```text
//! Off --press--> On --release--> Off
//! ```
//! Pressing a held key and releasing a released key do nothing.

use tracing::debug;

use super::layout::{Key, KeyId, KeyboardLayout, Point};
use super::SynthesizerChannel;
use crate::buffer::NotationBuffer;
use crate::channel::ChannelState;
use crate::notation::midi_value_to_note_name;

/// Every key press is written down as a quarter note, however long it is held.
const PRESSED_NOTE_DURATION: u32 = 4;

pub struct KeyboardInputController {
    /// Black keys first, then white keys.
    keys: Vec<Key>,
    /// Key under the pointer since the last pointer press.
    pressed: Option<KeyId>,
}

impl KeyboardInputController {
    pub fn new(layout: &KeyboardLayout) -> Self {
        Self {
            keys: layout.keys(),
            pressed: None,
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.0)
    }

    /// The key containing `point`. Black keys win where they overlap white ones.
    pub fn key_at(&self, point: Point) -> Option<KeyId> {
        self.keys
            .iter()
            .position(|key| key.bounds.contains(point))
            .map(KeyId)
    }

    /// Find the key playing `pitch`.
    pub fn key_for_pitch(&self, pitch: u8) -> Option<KeyId> {
        self.keys.iter().position(|key| key.pitch == pitch).map(KeyId)
    }

    /// Press a key: sound it on `synth` and append its token to `buffer`.
    ///
    /// Returns false (and does nothing) if the key is already on or unknown.
    pub fn on_press<S>(
        &mut self,
        id: KeyId,
        channel: &ChannelState,
        synth: &mut S,
        buffer: &mut NotationBuffer,
    ) -> bool
    where
        S: SynthesizerChannel + ?Sized,
    {
        let Some(key) = self.keys.get_mut(id.0) else {
            return false;
        };
        if key.on {
            return false;
        }

        key.on = true;
        synth.note_on(key.pitch, channel.velocity);
        let token = format!(" {}{}", PRESSED_NOTE_DURATION, midi_value_to_note_name(key.pitch));
        debug!(pitch = key.pitch, token = token.trim_start(), "key pressed");
        buffer.append(&token);
        true
    }

    /// Release a key: silence it on `synth`. Never touches the notation buffer.
    ///
    /// Returns false (and does nothing) if the key is already off or unknown.
    pub fn on_release<S>(&mut self, id: KeyId, channel: &ChannelState, synth: &mut S) -> bool
    where
        S: SynthesizerChannel + ?Sized,
    {
        let Some(key) = self.keys.get_mut(id.0) else {
            return false;
        };
        if !key.on {
            return false;
        }

        key.on = false;
        synth.note_off(key.pitch, channel.velocity);
        true
    }

    /// Mouse button down at `point`.
    pub fn pointer_pressed<S>(
        &mut self,
        point: Point,
        channel: &ChannelState,
        synth: &mut S,
        buffer: &mut NotationBuffer,
    ) -> Option<KeyId>
    where
        S: SynthesizerChannel + ?Sized,
    {
        self.pressed = self.key_at(point);
        let id = self.pressed?;
        self.on_press(id, channel, synth, buffer);
        Some(id)
    }

    /// Mouse button up. Releases the key that was pressed, wherever the pointer is now.
    pub fn pointer_released<S>(&mut self, channel: &ChannelState, synth: &mut S)
    where
        S: SynthesizerChannel + ?Sized,
    {
        if let Some(id) = self.pressed {
            self.on_release(id, channel, synth);
        }
    }

    /// Pointer left the keyboard. Releases and forgets the pressed key.
    pub fn pointer_exited<S>(&mut self, channel: &ChannelState, synth: &mut S)
    where
        S: SynthesizerChannel + ?Sized,
    {
        if let Some(id) = self.pressed.take() {
            self.on_release(id, channel, synth);
        }
    }
}
