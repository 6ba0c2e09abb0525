//! Note names, MIDI numbers and equal-tempered frequency conversion
//!
//! All conversions use the 440 Hz reference: MIDI 69 = A4 = 440 Hz, and
//! `midi = (octave + 1) * 12 + pitch_class`.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference frequency of A4 in Hz
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI number of A4
pub const A4_MIDI: i32 = 69;

/// One of the 12 chromatic pitch classes, always stored in sharp spelling
///
/// Flat spellings are display-only (see [`NoteName::flat_name`]); parsing
/// accepts them and folds to the canonical sharp form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteName {
    /// C
    #[serde(rename = "C")]
    C,
    /// C sharp / D flat
    #[serde(rename = "C#")]
    CSharp,
    /// D
    #[serde(rename = "D")]
    D,
    /// D sharp / E flat
    #[serde(rename = "D#")]
    DSharp,
    /// E
    #[serde(rename = "E")]
    E,
    /// F
    #[serde(rename = "F")]
    F,
    /// F sharp / G flat
    #[serde(rename = "F#")]
    FSharp,
    /// G
    #[serde(rename = "G")]
    G,
    /// G sharp / A flat
    #[serde(rename = "G#")]
    GSharp,
    /// A
    #[serde(rename = "A")]
    A,
    /// A sharp / B flat
    #[serde(rename = "A#")]
    ASharp,
    /// B
    #[serde(rename = "B")]
    B,
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

impl NoteName {
    /// All pitch classes in chromatic order starting at C
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::CSharp,
        NoteName::D,
        NoteName::DSharp,
        NoteName::E,
        NoteName::F,
        NoteName::FSharp,
        NoteName::G,
        NoteName::GSharp,
        NoteName::A,
        NoteName::ASharp,
        NoteName::B,
    ];

    /// Pitch class index (C = 0, ..., B = 11)
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Note for any integer pitch class (wrapped modulo 12)
    pub fn from_pitch_class(pc: i32) -> Self {
        Self::ALL[pc.rem_euclid(12) as usize]
    }

    /// Canonical sharp spelling (e.g. "C#")
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self as usize]
    }

    /// Flat spelling for display (e.g. "Db"); naturals are unchanged
    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self as usize]
    }

    /// Whether this pitch class is a black key (has an accidental)
    pub fn is_accidental(self) -> bool {
        SHARP_NAMES[self as usize].len() > 1
    }

    /// Transpose by a number of semitones (wrapping)
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_pitch_class(self.pitch_class() as i32 + semitones)
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteName {
    type Err = AnalysisError;

    /// Parse "C", "c#", "Db", "E♭" etc. into a canonical pitch class
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| AnalysisError::InvalidInput("Empty note name".to_string()))?;

        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => {
                return Err(AnalysisError::InvalidInput(format!(
                    "Invalid note name '{}'",
                    trimmed
                )))
            }
        };

        let mut accidental = 0i32;
        for c in chars {
            match c {
                '#' | '♯' => accidental += 1,
                'b' | '♭' => accidental -= 1,
                _ => {
                    return Err(AnalysisError::InvalidInput(format!(
                        "Invalid note name '{}'",
                        trimmed
                    )))
                }
            }
        }

        Ok(NoteName::from_pitch_class(base + accidental))
    }
}

/// Pitch class index of a note name
pub fn note_to_pitch_class(name: NoteName) -> u8 {
    name.pitch_class()
}

/// Note name for a pitch class (wrapped modulo 12)
pub fn pitch_class_to_note(pc: i32) -> NoteName {
    NoteName::from_pitch_class(pc)
}

/// Split a MIDI number into (note name, octave)
///
/// # Example
///
/// ```
/// use cadence_dsp::theory::{midi_to_note, NoteName};
///
/// assert_eq!(midi_to_note(69), (NoteName::A, 4));
/// assert_eq!(midi_to_note(60), (NoteName::C, 4));
/// ```
pub fn midi_to_note(midi: i32) -> (NoteName, i32) {
    (NoteName::from_pitch_class(midi), midi.div_euclid(12) - 1)
}

/// MIDI number for a (note name, octave) pair
pub fn note_to_midi(name: NoteName, octave: i32) -> i32 {
    (octave + 1) * 12 + name.pitch_class() as i32
}

/// Equal-tempered frequency in Hz of a (possibly fractional) MIDI number
pub fn midi_to_frequency(midi: f32) -> f32 {
    A4_FREQUENCY * 2.0f32.powf((midi - A4_MIDI as f32) / 12.0)
}

/// Fractional MIDI number of a frequency
///
/// Non-positive frequencies have no pitch and return `f32::NEG_INFINITY`.
pub fn frequency_to_midi_exact(frequency: f32) -> f32 {
    if frequency <= 0.0 {
        return f32::NEG_INFINITY;
    }
    A4_MIDI as f32 + 12.0 * (frequency / A4_FREQUENCY).log2()
}

/// Nearest MIDI number of a frequency (rounded to the nearest semitone)
///
/// The frequency must be positive; callers reject silent frames before
/// converting.
pub fn frequency_to_midi(frequency: f32) -> i32 {
    frequency_to_midi_exact(frequency).round() as i32
}

/// A pitched note positioned in beats
///
/// The MIDI number is the single source of truth: name, octave and frequency
/// are derived from it at construction and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NoteData")]
pub struct Note {
    name: NoteName,
    octave: i32,
    midi_number: i32,
    frequency: f32,
    duration: f32,
    start_beat: f32,
}

/// Serialized form used to rebuild a [`Note`] with consistent derived fields
#[derive(Deserialize)]
struct NoteData {
    midi_number: i32,
    duration: f32,
    start_beat: f32,
}

impl From<NoteData> for Note {
    fn from(data: NoteData) -> Self {
        Note::from_midi(data.midi_number, data.start_beat, data.duration)
    }
}

impl Note {
    /// Build a note from a MIDI number
    pub fn from_midi(midi_number: i32, start_beat: f32, duration: f32) -> Self {
        let (name, octave) = midi_to_note(midi_number);
        Self {
            name,
            octave,
            midi_number,
            frequency: midi_to_frequency(midi_number as f32),
            duration,
            start_beat,
        }
    }

    /// Build a note from a name and octave
    pub fn new(name: NoteName, octave: i32, start_beat: f32, duration: f32) -> Self {
        Self::from_midi(note_to_midi(name, octave), start_beat, duration)
    }

    /// Pitch class name
    pub fn name(&self) -> NoteName {
        self.name
    }

    /// Octave number (C4 = middle C)
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// MIDI number
    pub fn midi_number(&self) -> i32 {
        self.midi_number
    }

    /// Equal-tempered frequency in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Duration in beats
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Onset in beats from the start of the piece
    pub fn start_beat(&self) -> f32 {
        self.start_beat
    }

    /// Beat at which the note ends
    pub fn end_beat(&self) -> f32 {
        self.start_beat + self.duration
    }

    /// Copy of this note at a new position
    pub fn with_timing(&self, start_beat: f32, duration: f32) -> Self {
        Self::from_midi(self.midi_number, start_beat, duration)
    }

    /// Scientific pitch notation, e.g. "A4"
    pub fn label(&self) -> String {
        format!("{}{}", self.name, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midi_to_frequency_reference() {
        assert_eq!(midi_to_frequency(69.0), 440.0);
        assert_relative_eq!(midi_to_frequency(60.0), 261.6256, epsilon = 1e-3);
        assert_relative_eq!(midi_to_frequency(81.0), 880.0, epsilon = 1e-3);
    }

    #[test]
    fn test_frequency_to_midi() {
        assert_eq!(frequency_to_midi(440.0), 69);
        assert_eq!(frequency_to_midi(261.63), 60);
        // A quarter tone sharp of A4 still rounds to A4
        assert_eq!(frequency_to_midi(445.0), 69);
        assert_eq!(frequency_to_midi_exact(0.0), f32::NEG_INFINITY);
    }

    #[test]
    fn test_midi_note_roundtrip() {
        for m in -24..=151 {
            let (name, octave) = midi_to_note(m);
            assert_eq!(note_to_midi(name, octave), m, "roundtrip failed for MIDI {}", m);
        }
    }

    #[test]
    fn test_midi_to_note_octaves() {
        assert_eq!(midi_to_note(0), (NoteName::C, -1));
        assert_eq!(midi_to_note(59), (NoteName::B, 3));
        assert_eq!(midi_to_note(-1), (NoteName::B, -2));
    }

    #[test]
    fn test_pitch_class_conversion() {
        for (i, name) in NoteName::ALL.iter().enumerate() {
            assert_eq!(note_to_pitch_class(*name) as usize, i);
            assert_eq!(pitch_class_to_note(i as i32), *name);
        }
        assert_eq!(pitch_class_to_note(-1), NoteName::B);
        assert_eq!(pitch_class_to_note(14), NoteName::D);
    }

    #[test]
    fn test_parse_note_names() {
        assert_eq!("C".parse::<NoteName>().unwrap(), NoteName::C);
        assert_eq!("f#".parse::<NoteName>().unwrap(), NoteName::FSharp);
        assert_eq!("Bb".parse::<NoteName>().unwrap(), NoteName::ASharp);
        assert_eq!("Cb".parse::<NoteName>().unwrap(), NoteName::B);
        assert!("H".parse::<NoteName>().is_err());
        assert!("".parse::<NoteName>().is_err());
        assert!("C4".parse::<NoteName>().is_err());
    }

    #[test]
    fn test_flat_display() {
        assert_eq!(NoteName::ASharp.flat_name(), "Bb");
        assert_eq!(NoteName::ASharp.name(), "A#");
        assert_eq!(NoteName::E.flat_name(), "E");
        assert!(NoteName::DSharp.is_accidental());
        assert!(!NoteName::F.is_accidental());
    }

    #[test]
    fn test_note_derived_fields() {
        let note = Note::new(NoteName::A, 4, 1.0, 0.5);
        assert_eq!(note.midi_number(), 69);
        assert_eq!(note.frequency(), 440.0);
        assert_eq!(note.label(), "A4");
        assert_eq!(note.end_beat(), 1.5);

        let moved = note.with_timing(2.0, 1.0);
        assert_eq!(moved.midi_number(), 69);
        assert_eq!(moved.start_beat(), 2.0);
    }

    #[test]
    fn test_note_deserialize_recomputes_fields() {
        let json = r#"{"name":"C","octave":9,"midi_number":60,"frequency":1.0,"duration":1.0,"start_beat":0.0}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.name(), NoteName::C);
        assert_eq!(note.octave(), 4);
        assert_relative_eq!(note.frequency(), 261.6256, epsilon = 1e-3);
    }
}
