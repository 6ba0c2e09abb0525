//! Analysis and result aggregation modules
//!
//! Combines all feature extraction results into final analysis:
//! - Result types
//! - Metadata
//! - Roman-numeral chord labels
//! - Chord-tone roles of melody notes

pub mod chord_tones;
pub mod metadata;
pub mod result;
pub mod roman;

pub use chord_tones::{assign_chord_tones, chord_at_beat};
pub use roman::{label_chord, label_chords};
