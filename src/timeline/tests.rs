use super::*;
use crate::channel::ChannelState;
use crate::notation::parse;
use proptest::prelude::*;

const R: u32 = 10;

fn event(kind: EventKind, pitch: u8, tick: u64) -> TimedEvent {
    TimedEvent {
        pitch,
        velocity: 64,
        channel: 0,
        kind,
        tick,
    }
}

fn on(pitch: u8, tick: u64) -> TimedEvent {
    event(EventKind::On, pitch, tick)
}

fn off(pitch: u8, tick: u64) -> TimedEvent {
    event(EventKind::Off, pitch, tick)
}

fn build_default(text: &str) -> Timeline {
    build(&parse(text), R, &ChannelState::default(), ChordTiming::LastToken)
}

#[test]
fn test_chord_then_half_note() {
    let timeline = build_default("4c5+4e5 2g5");
    let r = u64::from(R);
    assert_eq!(
        timeline.events(),
        &[on(60, 0), on(64, 0), off(60, r), off(64, r), on(67, r), off(67, r + 2 * r)]
    );
    assert_eq!(timeline.resolution(), R);
}

#[test]
fn test_sequential_durations() {
    let timeline = build_default("1c5 2d5 8e5 4f5");
    let ons: Vec<u64> = timeline
        .events()
        .iter()
        .filter(|e| e.kind == EventKind::On)
        .map(|e| e.tick)
        .collect();
    assert_eq!(ons, vec![0, 40, 60, 65]);
    assert_eq!(timeline.end_tick(), 75);
}

#[test]
fn test_channel_number_and_velocity() {
    let channel = ChannelState {
        num: 9,
        velocity: 100,
        ..ChannelState::default()
    };
    let timeline = build(&parse("c5"), R, &channel, ChordTiming::LastToken);
    for event in timeline.events() {
        assert_eq!(event.channel, 9);
        assert_eq!(event.velocity, 100);
    }
    assert_eq!(timeline.events()[0].to_midi_bytes(), [0x99, 60, 100]);
    assert_eq!(timeline.events()[1].to_midi_bytes(), [0x89, 60, 100]);
}

#[test]
fn test_channel_message_masks_fields() {
    assert_eq!(channel_message(EventKind::On, 0, 60, 64), [0x90, 60, 64]);
    assert_eq!(channel_message(EventKind::Off, 15, 127, 0), [0x8F, 127, 0]);
    // Out-of-range values cannot leak into the status byte.
    assert_eq!(channel_message(EventKind::On, 0x13, 0xBC, 0xC0), [0x93, 0x3C, 0x40]);
}

#[test]
fn test_unknown_letter_still_advances() {
    let timeline = build_default("4h5 4c5");
    assert_eq!(timeline.events(), &[on(60, 10), off(60, 20)]);
}

#[test]
fn test_invalid_sibling_does_not_affect_chord() {
    let timeline = build_default("4c5+4c12+4e5");
    assert_eq!(timeline.events(), &[on(60, 0), on(64, 0), off(60, 10), off(64, 10)]);
}

#[test]
fn test_last_token_rule_uses_invalid_last_note() {
    // The trailing 1h5 is silent but still sets a whole-note advance.
    let timeline = build_default("8c5+1h5 4d5");
    assert_eq!(timeline.events(), &[on(60, 0), off(60, 5), on(62, 40), off(62, 50)]);
}

#[test]
fn test_last_token_rule_overlaps_long_notes() {
    let timeline = build_default("1c5+8e5 4g5");
    assert_eq!(
        timeline.events(),
        &[on(60, 0), on(64, 0), off(64, 5), on(67, 5), off(67, 15), off(60, 40)]
    );
}

#[test]
fn test_longest_rule_waits_for_whole_chord() {
    let timeline = build(&parse("1c5+8e5 4g5"), R, &ChannelState::default(), ChordTiming::Longest);
    assert_eq!(
        timeline.events(),
        &[on(60, 0), on(64, 0), off(64, 5), off(60, 40), on(67, 40), off(67, 50)]
    );
}

#[test]
fn test_longest_rule_silent_chord_falls_back() {
    let timeline = build(&parse("2h5 4c5"), R, &ChannelState::default(), ChordTiming::Longest);
    assert_eq!(timeline.events(), &[on(60, 20), off(60, 30)]);
}

#[test]
fn test_zero_divisor_does_not_advance() {
    let timeline = build_default("0c5 4d5");
    assert_eq!(timeline.events(), &[on(62, 0), off(62, 10)]);
}

#[test]
fn test_repeated_pitch_releases_before_restrike() {
    let timeline = build_default("4c5 4c5");
    assert_eq!(timeline.events(), &[on(60, 0), off(60, 10), on(60, 10), off(60, 20)]);
}

#[test]
fn test_zero_length_note_keeps_pair_order() {
    // 40 / 128 rounds down to 0 ticks.
    let timeline = build_default("128c5");
    assert_eq!(timeline.events(), &[on(60, 0), off(60, 0)]);
}

#[test]
fn test_bare_plus_word_takes_no_time() {
    let timeline = build_default("4c5 + 2d5");
    assert_eq!(timeline.events(), &[on(60, 0), off(60, 10), on(62, 10), off(62, 30)]);
}

#[test]
fn test_empty_notation() {
    let timeline = build_default("");
    assert!(timeline.is_empty());
    assert_eq!(timeline.end_tick(), 0);
}

// Property tests

type Written = (u32, usize, bool, i32);

const LETTERS: [(char, i32); 7] = [
    ('c', 0),
    ('d', 2),
    ('e', 4),
    ('f', 5),
    ('g', 7),
    ('a', 9),
    ('b', 11),
];

fn written_note() -> impl Strategy<Value = Written> {
    (1u32..=128, 0usize..7, any::<bool>(), 0i32..=9)
}

fn any_note() -> impl Strategy<Value = Written> {
    (0u32..=300, 0usize..8, any::<bool>(), -2i32..=12)
}

fn write((divisor, letter, sharp, octave): Written) -> String {
    let name = LETTERS.get(letter).map_or('h', |(c, _)| *c);
    format!("{}{}{}{}", divisor, name, if sharp { "#" } else { "" }, octave)
}

fn ticks(divisor: u32) -> u64 {
    (u64::from(R) * 4).checked_div(u64::from(divisor)).unwrap_or(0)
}

fn playable((divisor, letter, sharp, octave): Written) -> Option<u8> {
    let (_, class) = LETTERS.get(letter)?;
    let pitch = class + i32::from(sharp) + octave * 12;
    let ok = (1..=128).contains(&divisor)
        && (0..=9).contains(&octave)
        && (0..=127).contains(&pitch);
    ok.then_some(pitch as u8)
}

/// Reference model of chord timing: the start tick of every chord.
fn chord_starts(chords: &[Vec<Written>], timing: ChordTiming) -> Vec<u64> {
    let mut starts = Vec::new();
    let mut tick = 0;
    for chord in chords {
        starts.push(tick);
        let last = ticks(chord[chord.len() - 1].0);
        tick += match timing {
            ChordTiming::LastToken => last,
            ChordTiming::Longest => chord
                .iter()
                .filter(|n| playable(**n).is_some())
                .map(|n| ticks(n.0))
                .max()
                .unwrap_or(last),
        };
    }
    starts
}

fn expected_events(chords: &[Vec<Written>], timing: ChordTiming) -> Vec<TimedEvent> {
    let mut events = Vec::new();
    for (chord, start) in chords.iter().zip(chord_starts(chords, timing)) {
        for note in chord {
            if let Some(pitch) = playable(*note) {
                events.push(on(pitch, start));
                events.push(off(pitch, start + ticks(note.0)));
            }
        }
    }
    events.sort_by_key(|e| e.tick);
    events
}

fn notation(chords: &[Vec<Written>]) -> String {
    chords
        .iter()
        .map(|chord| chord.iter().copied().map(write).collect::<Vec<_>>().join("+"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn chords(count: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Vec<Written>>> {
    prop::collection::vec(prop::collection::vec(any_note(), 1..4), count)
}

fn build_with(chords: &[Vec<Written>], timing: ChordTiming) -> Timeline {
    build(&parse(&notation(chords)), R, &ChannelState::default(), timing)
}

proptest! {
    #[test]
    fn prop_valid_note_yields_one_pair(note in written_note()) {
        let timeline = build_default(&write(note));
        let (divisor, letter, sharp, octave) = note;
        let pitch = LETTERS[letter].1 + i32::from(sharp) + octave * 12;

        prop_assert_eq!(timeline.len(), 2);
        let (first, second) = (timeline.events()[0], timeline.events()[1]);
        prop_assert_eq!(first.kind, EventKind::On);
        prop_assert_eq!(second.kind, EventKind::Off);
        prop_assert_eq!(i32::from(first.pitch), pitch);
        prop_assert_eq!(second.pitch, first.pitch);
        prop_assert_eq!(second.tick - first.tick, u64::from(R) * 4 / u64::from(divisor));
    }

    #[test]
    fn prop_out_of_range_note_is_silent(note in any_note()) {
        prop_assume!(playable(note).is_none());
        prop_assert!(build_default(&write(note)).is_empty());
    }

    #[test]
    fn prop_last_token_timing(chords in chords(1..6)) {
        let timeline = build_with(&chords, ChordTiming::LastToken);
        let expected = expected_events(&chords, ChordTiming::LastToken);
        prop_assert_eq!(timeline.events(), expected.as_slice());
    }

    #[test]
    fn prop_longest_timing(chords in chords(1..6)) {
        let timeline = build_with(&chords, ChordTiming::Longest);
        let expected = expected_events(&chords, ChordTiming::Longest);
        prop_assert_eq!(timeline.events(), expected.as_slice());
    }

    #[test]
    fn prop_events_are_ordered(chords in chords(0..6)) {
        let timeline = build_default(&notation(&chords));
        prop_assert!(timeline.events().windows(2).all(|w| w[0].tick <= w[1].tick));
        let ons = timeline.events().iter().filter(|e| e.kind == EventKind::On).count();
        prop_assert_eq!(ons * 2, timeline.len());
    }
}
