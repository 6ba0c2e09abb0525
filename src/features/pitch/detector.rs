//! Offline pitch tracking over a whole buffer
//!
//! Slices the signal into overlapping frames, runs the MPM estimator on each
//! frame in parallel and applies the acceptance rule. The output has exactly
//! one [`PitchFrame`] per analysis frame, in timestamp order.

use super::mpm::McLeodPitchDetector;
use super::{accept_estimate, PitchFrame};
use crate::config::PitchConfig;
use crate::error::AnalysisError;
use crate::preprocessing::framing::{frame_at, frame_starts};
use rayon::prelude::*;

/// Frame and hop sizes in samples for a sample rate
///
/// The frame length is `frame_duration_ms` rounded up to the next power of
/// two; the hop is `hop_duration_ms` rounded to the nearest sample (at least 1).
pub fn pitch_frame_layout(sample_rate: u32, config: &PitchConfig) -> (usize, usize) {
    let sr = sample_rate as f32;
    let frame = ((config.frame_duration_ms / 1000.0 * sr).ceil() as usize)
        .max(1)
        .next_power_of_two();
    let hop = ((config.hop_duration_ms / 1000.0 * sr).round() as usize).max(1);
    (frame, hop)
}

/// Detect pitch frames in a mono buffer
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Pitch detection parameters
///
/// # Returns
///
/// One frame per hop; rejected frames are silence markers. An empty buffer
/// yields an empty track.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a zero sample rate or an invalid
/// configuration
pub fn detect_pitches(
    samples: &[f32],
    sample_rate: u32,
    config: &PitchConfig,
) -> Result<Vec<PitchFrame>, AnalysisError> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    config.validate()?;

    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let (frame_size, hop_size) = pitch_frame_layout(sample_rate, config);
    let starts = frame_starts(samples.len(), frame_size, hop_size)?;

    log::debug!(
        "Detecting pitch: {} samples at {} Hz, frame={}, hop={}, {} frames",
        samples.len(),
        sample_rate,
        frame_size,
        hop_size,
        starts.len()
    );

    let frames: Vec<PitchFrame> = starts
        .par_iter()
        .map_init(
            || McLeodPitchDetector::new(frame_size),
            |detector, &start| {
                let frame = frame_at(samples, start, frame_size);
                let timestamp_ms = start as f32 / sample_rate as f32 * 1000.0;
                accept_estimate(detector.get_pitch(&frame, sample_rate), timestamp_ms, config)
            },
        )
        .collect();

    let voiced = frames.iter().filter(|f| f.is_voiced()).count();
    log::debug!("Pitch track: {}/{} frames voiced", voiced, frames.len());

    Ok(frames)
}
