//! Melody extraction modules
//!
//! Turn a pitch track into a beat-positioned melody:
//! - Segmentation of voiced frames into note events
//! - Quantization to a rhythmic grid
//! - Tempo estimation from inter-onset intervals
//! - Conversion of symbolic notes back into a pitch track

pub mod extractor;
pub mod quantize;
pub mod symbolic;
pub mod tempo;

pub use extractor::{extract_melody, frame_spacing_ms, segment_frames, PitchSegment};
pub use quantize::{quantize_beat, quantize_melody};
pub use symbolic::notes_to_pitch_frames;
pub use tempo::{detect_tempo, estimate_tempo, DEFAULT_TEMPO};

use crate::error::AnalysisError;

/// Milliseconds per beat for a tempo
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `tempo` is not a positive BPM
pub(crate) fn ms_per_beat(tempo: f32) -> Result<f32, AnalysisError> {
    if !(tempo > 0.0 && tempo.is_finite()) {
        return Err(AnalysisError::InvalidInput(format!(
            "Tempo must be a positive BPM, got {}",
            tempo
        )));
    }
    Ok(60_000.0 / tempo)
}
