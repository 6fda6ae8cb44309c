//! Key geometry

use serde::Deserialize;

use crate::notation::MAX_NAMED_PITCH;

/// Semitones of the white keys within an octave.
const WHITE_KEY_NOTES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Black keys: semitone, and the white key whose right edge it straddles.
const BLACK_KEY_NOTES: [(u8, i32); 5] = [(1, 1), (3, 2), (6, 4), (8, 5), (10, 6)];

/// How far left of the white-key boundary a black key starts.
const BLACK_KEY_OFFSET: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Contains its top-left edge but not its bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Index of a key inside its controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId(pub(crate) usize);

/// One piano key: a hit region, a fixed pitch and whether it is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub(crate) bounds: Rect,
    pub(crate) pitch: u8,
    pub(crate) black: bool,
    pub(crate) on: bool,
}

impl Key {
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    pub fn is_black(&self) -> bool {
        self.black
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// Size and span of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeyboardLayout {
    pub octaves: u8,
    /// Pitch of the leftmost white key. Should be a C.
    pub lowest_pitch: u8,
    pub key_width: i32,
    pub key_height: i32,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self {
            octaves: 6,
            lowest_pitch: 24,
            key_width: 16,
            key_height: 80,
        }
    }
}

impl KeyboardLayout {
    /// Total width of the white keys.
    pub fn width(&self) -> i32 {
        i32::from(self.octaves) * 7 * self.key_width
    }

    /// All keys, black keys first (hit-test order).
    ///
    /// Keys above `B9` are left out: their names would not parse back to a pitch.
    pub(crate) fn keys(&self) -> Vec<Key> {
        let octave_width = 7 * self.key_width;
        let mut black = Vec::new();
        let mut white = Vec::new();

        for octave in 0..i32::from(self.octaves) {
            let left = octave * octave_width;
            let base = i32::from(self.lowest_pitch) + octave * 12;

            for (slot, semitone) in (0i32..).zip(WHITE_KEY_NOTES) {
                white.push((
                    Rect::new(left + slot * self.key_width, 0, self.key_width, self.key_height),
                    base + i32::from(semitone),
                    false,
                ));
            }
            for (semitone, boundary) in BLACK_KEY_NOTES {
                black.push((
                    Rect::new(
                        left + boundary * self.key_width - BLACK_KEY_OFFSET,
                        0,
                        self.key_width / 2,
                        self.key_height / 2,
                    ),
                    base + i32::from(semitone),
                    true,
                ));
            }
        }

        black
            .into_iter()
            .chain(white)
            .filter_map(|(bounds, pitch, black)| {
                let pitch = u8::try_from(pitch).ok().filter(|p| *p <= MAX_NAMED_PITCH)?;
                Some(Key {
                    bounds,
                    pitch,
                    black,
                    on: false,
                })
            })
            .collect()
    }
}
