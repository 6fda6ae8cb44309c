//! Parsed notation types

/// Duration divisor used when a note has no readable duration digits.
pub const DEFAULT_DURATION_DIVISOR: u32 = 4;

/// Octave used when a note has no readable octave digits.
pub const DEFAULT_OCTAVE: i32 = 5;

pub const MAX_DURATION_DIVISOR: u32 = 128;
pub const MAX_OCTAVE: i32 = 9;

/// Highest pitch whose name (`B9`) has an octave the parser accepts.
pub const MAX_NAMED_PITCH: u8 = 119;

/// One note as written, before validation.
///
/// `duration_divisor` and `octave` hold whatever was read (or the defaults), so
/// an out-of-range value survives parsing and is rejected by [`NoteToken::is_playable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteToken {
    /// 1 = whole note, 4 = quarter note, 8 = eighth note, ...
    pub duration_divisor: u32,
    /// Semitone of the natural letter (C=0 ... B=11), `None` for an unknown letter.
    pub pitch_class: Option<u8>,
    pub sharp: bool,
    pub octave: i32,
}

impl NoteToken {
    /// Pitch class including the sharp. B# yields 12.
    pub fn semitone(&self) -> Option<i32> {
        self.pitch_class
            .map(|class| i32::from(class) + i32::from(self.sharp))
    }

    /// `semitone + octave * 12`, or `None` when the letter was not a pitch.
    pub fn midi_pitch(&self) -> Option<i32> {
        self.semitone().map(|semitone| semitone + self.octave * 12)
    }

    /// A token is playable iff its MIDI pitch is 0-127, its octave 0-9 and its
    /// duration divisor 1-128.
    pub fn is_playable(&self) -> bool {
        let pitch_ok = matches!(self.midi_pitch(), Some(pitch) if (0..=127).contains(&pitch));
        let octave_ok = (0..=MAX_OCTAVE).contains(&self.octave);
        let duration_ok = (1..=MAX_DURATION_DIVISOR).contains(&self.duration_divisor);
        pitch_ok && octave_ok && duration_ok
    }

    /// Length in ticks at `resolution` ticks per quarter note.
    ///
    /// Integer division, like the sequencer tick grid. A zero divisor has no length.
    pub fn ticks(&self, resolution: u32) -> u64 {
        (u64::from(resolution) * 4)
            .checked_div(u64::from(self.duration_divisor))
            .unwrap_or(0)
    }
}

/// Which part of a note fell back to its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Duration,
    Octave,
    Both,
}

impl Fallback {
    pub(crate) fn from_flags(duration: bool, octave: bool) -> Option<Self> {
        match (duration, octave) {
            (true, true) => Some(Fallback::Both),
            (true, false) => Some(Fallback::Duration),
            (false, true) => Some(Fallback::Octave),
            (false, false) => None,
        }
    }
}

/// Result of parsing one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedNote {
    /// Fully specified and playable.
    Valid(NoteToken),
    /// Playable after falling back to a default duration and/or octave.
    Defaulted(NoteToken, Fallback),
    /// Not playable. The raw token is kept for chord timing.
    Invalid(NoteToken),
}

impl ParsedNote {
    pub fn token(&self) -> &NoteToken {
        match self {
            ParsedNote::Valid(token)
            | ParsedNote::Defaulted(token, _)
            | ParsedNote::Invalid(token) => token,
        }
    }

    /// The token, if it may be played.
    pub fn playable(&self) -> Option<&NoteToken> {
        match self {
            ParsedNote::Valid(token) | ParsedNote::Defaulted(token, _) => Some(token),
            ParsedNote::Invalid(_) => None,
        }
    }

    pub fn is_playable(&self) -> bool {
        self.playable().is_some()
    }
}

/// Notes written with `+` between them, sounding together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    notes: Vec<ParsedNote>,
}

impl Chord {
    /// Returns `None` for an empty note list; a chord always has a note.
    pub fn new(notes: Vec<ParsedNote>) -> Option<Self> {
        if notes.is_empty() {
            None
        } else {
            Some(Self { notes })
        }
    }

    pub fn notes(&self) -> &[ParsedNote] {
        &self.notes
    }

    /// The note written last, whose duration drives chord timing.
    pub fn last(&self) -> &ParsedNote {
        // Non-empty by construction.
        &self.notes[self.notes.len() - 1]
    }

    pub fn playable_notes(&self) -> impl Iterator<Item = &NoteToken> {
        self.notes.iter().filter_map(ParsedNote::playable)
    }
}
