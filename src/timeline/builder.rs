//! Chords to timeline
//!
//! Walks the chords with a running start tick, emits an On/Off pair for every
//! playable note and stable-sorts the result by tick.

use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{EventKind, TimedEvent, Timeline};
use crate::channel::ChannelState;
use crate::notation::{Chord, NoteToken};

/// How far the start tick moves after each chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordTiming {
    /// Duration of the note written last in the chord, playable or not.
    ///
    /// `"1c5+8e5 4g5"` starts the G an eighth after the chord, while the C is
    /// still sounding. A chord with no playable note still leaves a gap.
    #[default]
    LastToken,
    /// Duration of the longest playable note in the chord. A chord with no
    /// playable note falls back to `LastToken`.
    Longest,
}

impl ChordTiming {
    fn advance(self, chord: &Chord, resolution: u32) -> u64 {
        let last = chord.last().token().ticks(resolution);
        match self {
            ChordTiming::LastToken => last,
            ChordTiming::Longest => chord
                .playable_notes()
                .map(|token| token.ticks(resolution))
                .max()
                .unwrap_or(last),
        }
    }
}

/// Build a timeline from parsed chords.
///
/// Every playable note yields a NoteOn at the chord's start tick and a NoteOff
/// `resolution * 4 / duration_divisor` ticks later, on `channel.num` with
/// `channel.velocity`. Unplayable notes are skipped; their chord siblings are
/// unaffected.
///
/// Events come out in non-decreasing tick order. Events on the same tick keep
/// the order they were generated in, so a note's Off never precedes its On and
/// an Off releasing a pitch precedes a later On of that pitch.
pub fn build(
    chords: &[Chord],
    resolution: u32,
    channel: &ChannelState,
    timing: ChordTiming,
) -> Timeline {
    let mut events = Vec::new();
    let mut start_tick: u64 = 0;
    let mut dropped = 0usize;

    for chord in chords {
        for note in chord.notes() {
            match note.playable() {
                Some(token) => push_note(&mut events, token, start_tick, resolution, channel),
                None => dropped += 1,
            }
        }
        start_tick += timing.advance(chord, resolution);
    }

    if dropped > 0 {
        warn!(dropped, "skipped unplayable notes");
    }

    // Stable: equal ticks keep generation order.
    events.sort_by_key(|event: &TimedEvent| event.tick);

    debug!(events = events.len(), end_tick = start_tick, resolution, "built timeline");
    Timeline::new(resolution, events)
}

fn push_note(
    events: &mut Vec<TimedEvent>,
    token: &NoteToken,
    start_tick: u64,
    resolution: u32,
    channel: &ChannelState,
) {
    // Playable tokens always have a pitch within 0-127.
    let Some(pitch) = token.midi_pitch().and_then(|p| u8::try_from(p).ok()) else {
        return;
    };

    let event = |kind, tick| TimedEvent {
        pitch,
        velocity: channel.velocity,
        channel: channel.num,
        kind,
        tick,
    };
    events.push(event(EventKind::On, start_tick));
    events.push(event(EventKind::Off, start_tick + token.ticks(resolution)));
}
