//! Timeline type definitions

use serde::Serialize;

/// Ticks per quarter note used by the melody-search applet.
pub const DEFAULT_RESOLUTION: u32 = 10;

const NOTE_ON_STATUS: u8 = 0x90;
const NOTE_OFF_STATUS: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    On,
    Off,
}

/// One note-on or note-off at a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimedEvent {
    pub pitch: u8,
    pub velocity: u8,
    /// MIDI channel (0-15).
    pub channel: u8,
    pub kind: EventKind,
    pub tick: u64,
}

impl TimedEvent {
    /// Raw three-byte channel message for this event.
    ///
    /// # Example
    /// ```
    /// use melody::timeline::{EventKind, TimedEvent};
    ///
    /// let event = TimedEvent {
    ///     pitch: 60,
    ///     velocity: 64,
    ///     channel: 2,
    ///     kind: EventKind::On,
    ///     tick: 0,
    /// };
    /// assert_eq!(event.to_midi_bytes(), [0x92, 60, 64]);
    /// ```
    pub fn to_midi_bytes(&self) -> [u8; 3] {
        channel_message(self.kind, self.channel, self.pitch, self.velocity)
    }
}

/// Note-on or note-off channel message. Channel is masked to 0-15, data bytes to 0-127.
pub fn channel_message(kind: EventKind, channel: u8, pitch: u8, velocity: u8) -> [u8; 3] {
    let status = match kind {
        EventKind::On => NOTE_ON_STATUS,
        EventKind::Off => NOTE_OFF_STATUS,
    };
    [status | (channel & 0x0F), pitch & 0x7F, velocity & 0x7F]
}

/// Events of one track, ordered by tick.
///
/// Only [`build`](super::build) creates a timeline, so the ordering always holds.
/// Once handed to a sequencing device it is not modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    resolution: u32,
    events: Vec<TimedEvent>,
}

impl Timeline {
    pub(crate) fn new(resolution: u32, events: Vec<TimedEvent>) -> Self {
        debug_assert!(events.windows(2).all(|pair| pair[0].tick <= pair[1].tick));
        Self { resolution, events }
    }

    /// Ticks per quarter note.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Tick of the last event, 0 for an empty timeline.
    pub fn end_tick(&self) -> u64 {
        self.events.last().map_or(0, |event| event.tick)
    }
}
