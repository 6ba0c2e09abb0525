//! Chord recognition modules
//!
//! Recognize chords from audio by chroma template matching:
//! - 84-template bank (12 roots x 7 qualities)
//! - Cosine-similarity matching
//! - Run merging of frame-level detections
//! - Conversion from seconds to beat-relative chords

pub mod matcher;
pub mod smoothing;
pub mod templates;

pub use matcher::{best_match, cosine_similarity};
pub use smoothing::smooth_detections;
pub use templates::{ChordTemplate, ChordTemplates};

use crate::analysis::result::Chord;
use crate::config::ChordConfig;
use crate::error::AnalysisError;
use crate::features::chroma::extract_chroma;
use crate::theory::{chord_symbol, ChordQuality, NoteName};
use serde::{Deserialize, Serialize};

/// A chord found in audio, timed in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordDetection {
    /// Chord root
    pub root: NoteName,
    /// Chord quality
    pub quality: ChordQuality,
    /// Chord symbol, e.g. "Am"
    pub symbol: String,
    /// Template similarity (0.0-1.0)
    pub confidence: f32,
    /// Start time in seconds
    pub start_time: f32,
    /// End time in seconds
    pub end_time: f32,
}

impl ChordDetection {
    /// Build a detection; the symbol is derived from root and quality
    pub fn new(
        root: NoteName,
        quality: ChordQuality,
        confidence: f32,
        start_time: f32,
        end_time: f32,
    ) -> Self {
        Self {
            root,
            quality,
            symbol: chord_symbol(root, quality),
            confidence,
            start_time,
            end_time,
        }
    }
}

/// Recognize chords in a mono buffer
///
/// Frame `i` covers `[i * hop / sr, (i * hop + frame) / sr)` seconds. Frame
/// results are merged with [`smooth_detections`].
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a zero sample rate or an invalid
/// configuration
pub fn recognize_chords(
    samples: &[f32],
    sample_rate: u32,
    config: &ChordConfig,
) -> Result<Vec<ChordDetection>, AnalysisError> {
    config.validate()?;
    let chroma = extract_chroma(samples, sample_rate, config.frame_size, config.hop_size)?;
    let templates = ChordTemplates::new();
    let sr = sample_rate as f32;

    let frames: Vec<ChordDetection> = chroma
        .iter()
        .enumerate()
        .filter_map(|(i, vector)| {
            let (template, score) = best_match(vector, &templates)?;
            let start = (i * config.hop_size) as f32;
            Some(ChordDetection::new(
                template.root,
                template.quality,
                score,
                start / sr,
                (start + config.frame_size as f32) / sr,
            ))
        })
        .collect();

    let segments = smooth_detections(&frames, config.min_confidence);
    log::debug!(
        "Chord recognition: {} frames -> {} segments",
        frames.len(),
        segments.len()
    );
    Ok(segments)
}

/// Convert second-timed detections to beat-relative chords
///
/// `start_beat = start_time * tempo / 60`, `duration = (end - start) * tempo / 60`.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `tempo` is not positive
pub fn detections_to_chords(
    detections: &[ChordDetection],
    tempo: f32,
) -> Result<Vec<Chord>, AnalysisError> {
    if !(tempo > 0.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "Tempo must be > 0, got {}",
            tempo
        )));
    }
    let beats_per_second = tempo / 60.0;
    Ok(detections
        .iter()
        .map(|d| {
            Chord::new(
                d.root,
                d.quality,
                d.start_time * beats_per_second,
                (d.end_time - d.start_time) * beats_per_second,
            )
        })
        .collect())
}
