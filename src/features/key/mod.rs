//! Key detection modules
//!
//! Detect musical key using:
//! - Krumhansl-Kessler templates (24 keys)
//! - Pearson correlation against a pitch-class histogram
//! - Key clarity scoring

pub mod detector;
pub mod key_clarity;
pub mod templates;

pub use detector::{
    detect_key, detect_key_from_histogram, detect_key_from_notes, note_histogram,
    pearson_correlation, pitch_class_histogram,
};
pub use key_clarity::compute_key_clarity;
pub use templates::KeyTemplates;

use crate::analysis::result::Key;
use serde::{Deserialize, Serialize};

/// Number of alternatives kept in [`KeyDetectionResult::top_keys`]
pub const TOP_KEYS: usize = 3;

/// Key detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: Key,

    /// Correlation of the detected key (-1.0-1.0)
    pub confidence: f32,

    /// All 24 key scores (ranked, highest first; ties keep iteration order)
    pub all_scores: Vec<(Key, f32)>,

    /// Top 3 keys with scores
    /// Useful for ambiguous cases such as relative major/minor
    pub top_keys: Vec<(Key, f32)>,
}
