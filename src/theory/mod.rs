//! Music theory tables
//!
//! Static reference data shared by every stage of the pipeline:
//! - Note name ↔ pitch class ↔ MIDI ↔ frequency conversion
//! - Chord quality interval and symbol tables, chroma templates
//! - Scale interval tables
//! - Krumhansl-Kessler key profiles

pub mod chords;
pub mod notes;
pub mod profiles;
pub mod scales;

pub use chords::{
    chord_chroma_template, chord_symbol, get_chord_notes, parse_chord_symbol, ChordQuality,
};
pub use notes::{
    frequency_to_midi, frequency_to_midi_exact, midi_to_frequency, midi_to_note,
    note_to_midi, note_to_pitch_class, pitch_class_to_note, Note, NoteName,
};
pub use profiles::{key_profile, rotate_array, MAJOR_KEY_PROFILE, MINOR_KEY_PROFILE};
pub use scales::{get_scale_notes, Mode, ScaleType};
