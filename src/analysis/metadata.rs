//! Analysis metadata structures

use super::result::AnalysisFlag;
use serde::{Deserialize, Serialize};

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds (0.0 for symbolic input without timing)
    pub duration_seconds: f32,

    /// Sample rate in Hz (0 for symbolic input)
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Number of pitch frames analyzed
    pub pitch_frame_count: usize,

    /// Fraction of pitch frames carrying a note (0.0-1.0)
    pub voiced_ratio: f32,

    /// Number of chord segments found by the audio recognizer
    pub chord_segment_count: usize,

    /// Key clarity (0.0-1.0): separation of the best key from the runner-up
    pub key_clarity: f32,

    /// Analysis flags
    pub flags: Vec<AnalysisFlag>,

    /// Confidence warnings (low confidence, fallbacks taken, etc.)
    pub confidence_warnings: Vec<String>,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            pitch_frame_count: 0,
            voiced_ratio: 0.0,
            chord_segment_count: 0,
            key_clarity: 0.0,
            flags: vec![],
            confidence_warnings: vec![],
        }
    }
}

impl AnalysisMetadata {
    /// Record a flag together with a human-readable warning
    ///
    /// Each flag is recorded once; repeat calls for a flag already present
    /// add neither the flag nor its warning.
    pub fn flag(&mut self, flag: AnalysisFlag, warning: impl Into<String>) {
        if self.flags.contains(&flag) {
            return;
        }
        self.flags.push(flag);
        self.confidence_warnings.push(warning.into());
    }
}
