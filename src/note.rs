//! Note names and equal-tempered pitch resolution

use std::{fmt, str::FromStr};

/// The frequency of A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Recognized pitch-class spellings and their semitone offset from A
///
/// `Cb` and `B#` keep the written octave, so `Cb4` sounds as B4 and `B#4` as C5.
const SPELLINGS: [(&str, i8); 21] = [
    ("C", -9),
    ("C#", -8),
    ("Db", -8),
    ("D", -7),
    ("D#", -6),
    ("Eb", -6),
    ("E", -5),
    ("Fb", -5),
    ("E#", -4),
    ("F", -4),
    ("F#", -3),
    ("Gb", -3),
    ("G", -2),
    ("G#", -1),
    ("Ab", -1),
    ("A", 0),
    ("A#", 1),
    ("Bb", 1),
    ("B", 2),
    ("Cb", 2),
    ("B#", 3),
];

/// An error encountered when resolving a note name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The pitch-class part of the name is not a recognized spelling
    #[error("unknown pitch class {0:?}")]
    UnknownPitchClass(String),
    /// The octave part of the name is missing or not an integer
    #[error("invalid octave {0:?}")]
    InvalidOctave(String),
}

/// The twelve sounding classes of the western chromatic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Letter {
    C,
    Db,
    D,
    Eb,
    E,
    F,
    Gb,
    G,
    Ab,
    A,
    Bb,
    B,
}

impl Letter {
    /// Get the letter sounding at some semitone offset from A
    pub fn from_offset(offset: i8) -> Self {
        match (offset as i16 + 9).rem_euclid(12) {
            0 => Letter::C,
            1 => Letter::Db,
            2 => Letter::D,
            3 => Letter::Eb,
            4 => Letter::E,
            5 => Letter::F,
            6 => Letter::Gb,
            7 => Letter::G,
            8 => Letter::Ab,
            9 => Letter::A,
            10 => Letter::Bb,
            11 => Letter::B,
            _ => unreachable!(),
        }
    }
}

/// A parsed note name such as `"E4"` or `"Db-1"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    spelling: &'static str,
    offset: i8,
    /// The written octave
    pub octave: i32,
}

impl NoteName {
    /// Get the pitch-class spelling as written, e.g. `"Db"`
    pub fn spelling(&self) -> &'static str {
        self.spelling
    }
    /// Get the sounding letter of this note
    pub fn letter(&self) -> Letter {
        Letter::from_offset(self.offset)
    }
    /// Get the signed number of semitones between A4 and this note
    pub fn semitones_from_a4(&self) -> i64 {
        (self.octave as i64 - 4) * 12 + self.offset as i64
    }
    /// Get the equal-tempered frequency of this note, rounded to 2 decimal places
    pub fn frequency(&self) -> f64 {
        let frequency = A4_FREQUENCY * 2f64.powf(self.semitones_from_a4() as f64 / 12.0);
        (frequency * 100.0).round() / 100.0
    }
}

impl FromStr for NoteName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
            .unwrap_or(s.len());
        let (class, octave) = s.split_at(split);
        let (spelling, offset) = SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == class)
            .copied()
            .ok_or_else(|| Error::UnknownPitchClass(class.into()))?;
        let octave = octave
            .parse()
            .map_err(|_| Error::InvalidOctave(octave.into()))?;
        Ok(NoteName {
            spelling,
            offset,
            octave,
        })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.spelling, self.octave)
    }
}

/// Resolve a note name to its frequency in Hz
///
/// ```
/// assert_eq!(sound_of_you::resolve("A4"), Ok(440.0));
/// assert_eq!(sound_of_you::resolve("Eb4"), sound_of_you::resolve("D#4"));
/// ```
pub fn resolve(name: &str) -> Result<f64, Error> {
    name.parse::<NoteName>().map(|note| note.frequency())
}
