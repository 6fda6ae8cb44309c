//! MIDI pitch to note name and back
//!
//! Names are upper-case letter, optional `#`, then the octave with no
//! separator: pitch 60 is `C5`, pitch 61 is `C#5`. Octave is `pitch / 12`, the
//! same numbering the parser uses.

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a MIDI pitch number to its note name.
///
/// # Examples
/// ```
/// use melody::notation::midi_value_to_note_name;
///
/// assert_eq!(midi_value_to_note_name(60), "C5");
/// assert_eq!(midi_value_to_note_name(61), "C#5");
/// assert_eq!(midi_value_to_note_name(24), "C2");
/// assert_eq!(midi_value_to_note_name(119), "B9");
/// ```
pub fn midi_value_to_note_name(pitch: u8) -> String {
    format!("{}{}", NOTE_NAMES[usize::from(pitch % 12)], pitch / 12)
}

/// Convert a note name such as `C5`, `f#3` or `A#0` to its MIDI pitch.
///
/// Strict counterpart of [`midi_value_to_note_name`]: accepts only the names
/// it produces for pitches 0-119 (in either case). `E#` and `B#` are rejected
/// since those pitches are written `F` and `C`.
///
/// # Examples
/// ```
/// use melody::notation::note_name_to_midi_pitch;
///
/// assert_eq!(note_name_to_midi_pitch("C5"), Some(60));
/// assert_eq!(note_name_to_midi_pitch("f#3"), Some(42));
/// assert_eq!(note_name_to_midi_pitch("H2"), None);
/// assert_eq!(note_name_to_midi_pitch("C10"), None);
/// assert_eq!(note_name_to_midi_pitch("E#5"), None);
/// ```
pub fn note_name_to_midi_pitch(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let semitone: u8 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (semitone, octave) = match rest.strip_prefix('#') {
        // E and B have no sharp of their own.
        Some(_) if semitone == 4 || semitone == 11 => return None,
        Some(octave) => (semitone + 1, octave),
        None => (semitone, rest),
    };

    if octave.len() != 1 {
        return None;
    }
    let octave = octave.chars().next()?.to_digit(10)? as u8;
    Some(semitone + octave * 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pitch_class() {
        let names: Vec<String> = (60..72).map(midi_value_to_note_name).collect();
        assert_eq!(
            names,
            vec!["C5", "C#5", "D5", "D#5", "E5", "F5", "F#5", "G5", "G#5", "A5", "A#5", "B5"]
        );
    }

    #[test]
    fn test_low_and_high_pitches() {
        assert_eq!(midi_value_to_note_name(0), "C0");
        assert_eq!(midi_value_to_note_name(127), "G10");
    }

    #[test]
    fn test_round_trip_c0_to_b9() {
        for octave in 0..=9 {
            for name in NOTE_NAMES {
                let written = format!("{}{}", name, octave);
                let pitch = note_name_to_midi_pitch(&written).unwrap();
                assert_eq!(midi_value_to_note_name(pitch), written);
                let lowered = note_name_to_midi_pitch(&written.to_lowercase()).unwrap();
                assert_eq!(midi_value_to_note_name(lowered), written);
            }
        }
    }

    #[test]
    fn test_rejects_malformed_names() {
        assert_eq!(note_name_to_midi_pitch(""), None);
        assert_eq!(note_name_to_midi_pitch("C"), None);
        assert_eq!(note_name_to_midi_pitch("C#"), None);
        assert_eq!(note_name_to_midi_pitch("4C5"), None);
        assert_eq!(note_name_to_midi_pitch("C-1"), None);
    }

    #[test]
    fn test_rejects_non_canonical_sharps() {
        assert_eq!(note_name_to_midi_pitch("E#5"), None);
        assert_eq!(note_name_to_midi_pitch("b#9"), None);
        assert_eq!(note_name_to_midi_pitch("F5"), Some(65));
        assert_eq!(note_name_to_midi_pitch("B9"), Some(119));
    }
}
