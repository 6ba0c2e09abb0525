//! Frame slicing and windowing
//!
//! Splits a signal into overlapping fixed-size frames. Frames start at
//! `i * hop_size` and are emitted while they fit entirely in the signal; a
//! non-empty signal shorter than one frame yields a single zero-padded frame.

use crate::error::AnalysisError;
use std::f32::consts::PI;

/// Start offsets (in samples) of every frame
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `frame_size` or `hop_size` is 0
pub fn frame_starts(
    len: usize,
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<usize>, AnalysisError> {
    if frame_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }
    if hop_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }
    if len == 0 {
        return Ok(Vec::new());
    }
    if len < frame_size {
        return Ok(vec![0]);
    }
    Ok((0..=(len - frame_size)).step_by(hop_size).collect())
}

/// Copy the frame starting at `start`, zero-padding past the end of the signal
pub fn frame_at(samples: &[f32], start: usize, frame_size: usize) -> Vec<f32> {
    let end = (start + frame_size).min(samples.len());
    let mut frame = Vec::with_capacity(frame_size);
    if start < end {
        frame.extend_from_slice(&samples[start..end]);
    }
    frame.resize(frame_size, 0.0);
    frame
}

/// Symmetric Hann window coefficients of length `n`
pub fn hann_window(n: usize) -> Vec<f32> {
    if n <= 1 {
        return vec![1.0; n];
    }
    let denom = (n - 1) as f32;
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos()))
        .collect()
}

/// Multiply a frame by a window in place
pub fn apply_window(frame: &mut [f32], window: &[f32]) {
    for (x, w) in frame.iter_mut().zip(window.iter()) {
        *x *= w;
    }
}
