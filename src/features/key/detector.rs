//! Key detection algorithm
//!
//! Krumhansl-Schmuckler key finding: builds a pitch-class histogram from the
//! melody and correlates it against the Krumhansl-Kessler profile of each of
//! the 24 keys. The key with the highest Pearson correlation wins.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::{templates::KeyTemplates, KeyDetectionResult, TOP_KEYS};
use crate::analysis::result::Key;
use crate::features::pitch::PitchFrame;
use crate::theory::Note;

/// Clarity-weighted pitch-class histogram of a pitch track
///
/// Each voiced frame adds its clarity to its pitch class; the result is
/// normalized to sum to 1.0. A track with no voiced frames gives all zeros.
pub fn pitch_class_histogram(frames: &[PitchFrame]) -> [f32; 12] {
    let mut histogram = [0.0f32; 12];
    for frame in frames {
        if let Some(note) = frame.note {
            histogram[note.pitch_class() as usize] += frame.clarity;
        }
    }
    normalize_sum(&mut histogram);
    histogram
}

/// Duration-weighted pitch-class histogram of a note list
pub fn note_histogram(notes: &[Note]) -> [f32; 12] {
    let mut histogram = [0.0f32; 12];
    for note in notes {
        histogram[note.name().pitch_class() as usize] += note.duration().max(0.0);
    }
    normalize_sum(&mut histogram);
    histogram
}

fn normalize_sum(histogram: &mut [f32; 12]) {
    let total: f32 = histogram.iter().sum();
    if total > 0.0 {
        for value in histogram.iter_mut() {
            *value /= total;
        }
    }
}

/// Pearson correlation coefficient
///
/// Returns 0.0 when either input has zero variance.
pub fn pearson_correlation(x: &[f32], y: &[f32]) -> f32 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let mean_x = x[..n].iter().sum::<f32>() / n as f32;
    let mean_y = y[..n].iter().sum::<f32>() / n as f32;

    let mut numerator = 0.0f32;
    let mut sum_sq_x = 0.0f32;
    let mut sum_sq_y = 0.0f32;
    for (a, b) in x[..n].iter().zip(y[..n].iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Detect musical key from a pitch track
///
/// # Arguments
///
/// * `frames` - Pitch frames; only voiced frames contribute
///
/// # Returns
///
/// Key detection result. With no voiced frames every correlation is 0.0 and
/// the first key in iteration order (C major) is reported with confidence 0.0.
///
/// # Example
///
/// ```
/// use cadence_dsp::features::key::detect_key;
/// use cadence_dsp::features::pitch::PitchFrame;
///
/// let frames: Vec<PitchFrame> = [261.63f32, 329.63, 392.0, 261.63]
///     .iter()
///     .enumerate()
///     .map(|(i, &f)| PitchFrame::voiced(f, 0.9, i as f32 * 10.0))
///     .collect();
/// let result = detect_key(&frames);
/// println!("Detected key: {}, confidence: {:.2}", result.key.label(), result.confidence);
/// ```
pub fn detect_key(frames: &[PitchFrame]) -> KeyDetectionResult {
    log::debug!("Detecting key from {} pitch frames", frames.len());
    detect_key_from_histogram(&pitch_class_histogram(frames))
}

/// Detect musical key from a symbolic note list (duration-weighted)
pub fn detect_key_from_notes(notes: &[Note]) -> KeyDetectionResult {
    log::debug!("Detecting key from {} notes", notes.len());
    detect_key_from_histogram(&note_histogram(notes))
}

/// Correlate a pitch-class histogram against all 24 key profiles
///
/// Scores are sorted descending with a stable sort, so equal correlations
/// keep iteration order (chromatic tonic, major before minor).
pub fn detect_key_from_histogram(histogram: &[f32; 12]) -> KeyDetectionResult {
    let templates = KeyTemplates::new();

    let mut scores: Vec<(Key, f32)> = templates
        .iter()
        .map(|(key, profile)| (*key, pearson_correlation(histogram, profile)))
        .collect();

    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (key, confidence) = scores[0];
    let top_keys = scores.iter().take(TOP_KEYS).copied().collect();

    log::debug!(
        "Detected key: {} (r={:.3}), runner-up: {} (r={:.3})",
        key.label(),
        confidence,
        scores[1].0.label(),
        scores[1].1
    );

    KeyDetectionResult {
        key,
        confidence,
        all_scores: scores,
        top_keys,
    }
}
