//! Notation text to chords
//!
//! Hand-rolled scanner over each note substring. Every malformed fragment
//! resolves to a default value or an unplayable token; nothing here fails.

use tracing::{debug, trace};

use super::token::{
    Chord, Fallback, NoteToken, ParsedNote, DEFAULT_DURATION_DIVISOR, DEFAULT_OCTAVE,
};

/// Parse notation text into chords, in playback order.
///
/// Words are separated by whitespace; notes inside a word by `+`. Empty pieces
/// (`"c5++e5"`, a lone `"+"`) are skipped.
///
/// # Example
/// ```
/// use melody::notation::{parse, ParsedNote};
///
/// let chords = parse("4C5 8h5");
/// assert!(matches!(chords[0].notes()[0], ParsedNote::Valid(_)));
/// assert!(matches!(chords[1].notes()[0], ParsedNote::Invalid(_)));
/// ```
pub fn parse(text: &str) -> Vec<Chord> {
    let lowered = text.to_lowercase();
    let chords: Vec<Chord> = lowered
        .split_whitespace()
        .filter_map(|word| {
            let notes = word
                .split('+')
                .filter(|piece| !piece.is_empty())
                .map(parse_note)
                .collect();
            Chord::new(notes)
        })
        .collect();

    debug!(
        chords = chords.len(),
        notes = chords.iter().map(|c| c.notes().len()).sum::<usize>(),
        "parsed notation"
    );
    chords
}

/// Parse one note such as `"8f#4"`, `"c"` or `"16a3"`.
///
/// Expects lower-case input; [`parse`] lowers the whole text first.
pub fn parse_note(note: &str) -> ParsedNote {
    let bytes = note.as_bytes();
    let mut pos = 0;

    // Duration digits
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let duration = note[..pos].parse::<u32>().ok();

    // Pitch letter
    let pitch_class = match bytes.get(pos) {
        Some(b'c') => Some(0),
        Some(b'd') => Some(2),
        Some(b'e') => Some(4),
        Some(b'f') => Some(5),
        Some(b'g') => Some(7),
        Some(b'a') => Some(9),
        Some(b'b') => Some(11),
        _ => None,
    };

    // Sharp
    let sharp = bytes.get(pos + 1) == Some(&b'#');
    if sharp {
        pos += 1;
    }

    // Octave: everything after the letter (and sharp). The letter position may
    // hold a multi-byte character, so slice on a char boundary.
    let rest_start = note
        .char_indices()
        .map(|(index, _)| index)
        .find(|&index| index > pos)
        .unwrap_or(note.len());
    let octave = note[rest_start..].parse::<i32>().ok();

    let token = NoteToken {
        duration_divisor: duration.unwrap_or(DEFAULT_DURATION_DIVISOR),
        pitch_class,
        sharp,
        octave: octave.unwrap_or(DEFAULT_OCTAVE),
    };

    if !token.is_playable() {
        trace!(note, ?token, "unplayable note");
        return ParsedNote::Invalid(token);
    }

    match Fallback::from_flags(duration.is_none(), octave.is_none()) {
        Some(fallback) => ParsedNote::Defaulted(token, fallback),
        None => ParsedNote::Valid(token),
    }
}
