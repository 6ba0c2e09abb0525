//! Chroma vector extraction
//!
//! For each pitch class and each octave 2-7, the magnitude of the single DFT
//! bin nearest the note frequency is accumulated into that pitch class. Only
//! 72 bins per frame are evaluated, so no full transform is needed.
//!
//! Frames are independent and computed in parallel; the output keeps frame
//! order.

use super::normalization::normalize_max;
use crate::error::AnalysisError;
use crate::preprocessing::framing::{apply_window, frame_at, frame_starts, hann_window};
use crate::theory::midi_to_frequency;
use rayon::prelude::*;
use std::f32::consts::PI;

/// 12-element pitch-class energy vector (index 0 = C)
pub type ChromaVector = [f32; 12];

/// Lowest octave folded into the chroma
const MIN_OCTAVE: i32 = 2;

/// Highest octave folded into the chroma
const MAX_OCTAVE: i32 = 7;

/// Magnitude of DFT bin `k` of `frame`
fn dft_bin_magnitude(frame: &[f32], k: usize) -> f32 {
    let n = frame.len();
    let mut re = 0.0f32;
    let mut im = 0.0f32;
    for (i, &x) in frame.iter().enumerate() {
        // Reduce k*i modulo n so the phase stays small and precise
        let phase = 2.0 * PI * ((k * i) % n) as f32 / n as f32;
        re += x * phase.cos();
        im -= x * phase.sin();
    }
    (re * re + im * im).sqrt()
}

/// Chroma of one (already windowed) frame, max-normalized
pub fn chroma_from_frame(frame: &[f32], sample_rate: u32) -> ChromaVector {
    let mut chroma = [0.0f32; 12];
    let n = frame.len();
    if n == 0 || sample_rate == 0 {
        return chroma;
    }

    for (pc, bin) in chroma.iter_mut().enumerate() {
        for octave in MIN_OCTAVE..=MAX_OCTAVE {
            let midi = (octave + 1) * 12 + pc as i32;
            let frequency = midi_to_frequency(midi as f32);
            let k = (frequency * n as f32 / sample_rate as f32).round() as usize;
            if k > 0 && k < n / 2 {
                *bin += dft_bin_magnitude(frame, k);
            }
        }
    }

    normalize_max(&mut chroma);
    chroma
}

/// Extract chroma vectors from audio samples
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - Frame size in samples (default: 8192)
/// * `hop_size` - Hop size in samples (default: 4096)
///
/// # Returns
///
/// One chroma vector per frame. A signal shorter than one frame is
/// zero-padded into a single frame; an empty signal gives no frames.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a zero sample rate, frame size
/// or hop size
pub fn extract_chroma(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<Vec<ChromaVector>, AnalysisError> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    let starts = frame_starts(samples.len(), frame_size, hop_size)?;
    log::debug!(
        "Extracting chroma: {} samples at {} Hz, {} frames",
        samples.len(),
        sample_rate,
        starts.len()
    );

    let window = hann_window(frame_size);
    let chroma = starts
        .par_iter()
        .map(|&start| {
            let mut frame = frame_at(samples, start, frame_size);
            apply_window(&mut frame, &window);
            chroma_from_frame(&frame, sample_rate)
        })
        .collect();

    Ok(chroma)
}
