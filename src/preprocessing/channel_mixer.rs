//! Channel mixing utilities (multi-channel to mono conversion)
//!
//! The analysis core only consumes mono PCM; decoders hand their output
//! through here first.

use crate::error::AnalysisError;

/// Channel mixing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMixMode {
    /// Simple average of all channels
    #[default]
    Average,
    /// Keep the louder channel per frame
    Dominant,
    /// First channel only
    First,
}

/// Convert stereo to mono
///
/// # Arguments
///
/// * `left` - Left channel samples
/// * `right` - Right channel samples
/// * `mode` - Mixing mode
///
/// # Returns
///
/// Mono samples
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the channels differ in length
pub fn stereo_to_mono(
    left: &[f32],
    right: &[f32],
    mode: ChannelMixMode,
) -> Result<Vec<f32>, AnalysisError> {
    if left.len() != right.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "Channel length mismatch: left={}, right={}",
            left.len(),
            right.len()
        )));
    }

    log::debug!("Converting {} stereo frames to mono using {:?}", left.len(), mode);

    let mono = left
        .iter()
        .zip(right.iter())
        .map(|(&l, &r)| mix_frame(&[l, r], mode))
        .collect();
    Ok(mono)
}

/// Downmix interleaved multi-channel samples to mono
///
/// # Arguments
///
/// * `samples` - Interleaved samples (`[L0, R0, L1, R1, ...]` for stereo)
/// * `channels` - Number of interleaved channels
/// * `mode` - Mixing mode
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `channels` is 0 or the sample
/// count is not a multiple of `channels`
pub fn downmix_interleaved(
    samples: &[f32],
    channels: usize,
    mode: ChannelMixMode,
) -> Result<Vec<f32>, AnalysisError> {
    if channels == 0 {
        return Err(AnalysisError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    if samples.len() % channels != 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "{} samples is not a whole number of {}-channel frames",
            samples.len(),
            channels
        )));
    }
    if channels == 1 {
        return Ok(samples.to_vec());
    }

    Ok(samples
        .chunks_exact(channels)
        .map(|frame| mix_frame(frame, mode))
        .collect())
}

fn mix_frame(frame: &[f32], mode: ChannelMixMode) -> f32 {
    match mode {
        ChannelMixMode::Average => frame.iter().sum::<f32>() / frame.len() as f32,
        ChannelMixMode::Dominant => frame
            .iter()
            .copied()
            .fold(0.0f32, |acc, x| if x.abs() > acc.abs() { x } else { acc }),
        ChannelMixMode::First => frame[0],
    }
}
