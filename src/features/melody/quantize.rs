//! Rhythmic quantization
//!
//! Snaps note onsets and durations to a grid of `1 / subdivision` beats.
//! Onset and duration are snapped independently, and no note is shorter than
//! one grid unit.

use crate::analysis::result::MelodyNote;
use crate::error::AnalysisError;

/// Snap a beat position to the nearest multiple of `1 / subdivision`
pub fn quantize_beat(beat: f32, subdivision: u32) -> f32 {
    let grid = subdivision.max(1) as f32;
    (beat * grid).round() / grid
}

/// Quantize melody timing to a rhythmic grid
///
/// # Arguments
///
/// * `notes` - Melody notes
/// * `subdivision` - Grid divisions per beat (4 = sixteenth notes in 4/4)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `subdivision` is 0
pub fn quantize_melody(
    notes: &[MelodyNote],
    subdivision: u32,
) -> Result<Vec<MelodyNote>, AnalysisError> {
    if subdivision == 0 {
        return Err(AnalysisError::InvalidInput(
            "Quantization subdivision must be > 0".to_string(),
        ));
    }
    let unit = 1.0 / subdivision as f32;

    Ok(notes
        .iter()
        .map(|n| {
            let start = quantize_beat(n.note.start_beat(), subdivision);
            let duration = quantize_beat(n.note.duration(), subdivision).max(unit);
            MelodyNote {
                note: n.note.with_timing(start, duration),
                chord_tone: n.chord_tone,
                confidence: n.confidence,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Note;

    fn melody_note(start: f32, duration: f32) -> MelodyNote {
        MelodyNote::new(Note::from_midi(67, start, duration), 0.8)
    }

    #[test]
    fn test_snaps_to_sixteenths() {
        let notes = vec![melody_note(0.26, 0.48), melody_note(1.1, 0.9)];
        let quantized = quantize_melody(&notes, 4).unwrap();
        assert_eq!(quantized[0].note.start_beat(), 0.25);
        assert_eq!(quantized[0].note.duration(), 0.5);
        assert_eq!(quantized[1].note.start_beat(), 1.0);
        assert_eq!(quantized[1].note.duration(), 1.0);
        assert_eq!(quantized[1].note.midi_number(), 67);
        assert_eq!(quantized[1].confidence, 0.8);
    }

    #[test]
    fn test_minimum_one_grid_unit() {
        let quantized = quantize_melody(&[melody_note(2.0, 0.05)], 4).unwrap();
        assert_eq!(quantized[0].note.duration(), 0.25);
    }

    #[test]
    fn test_zero_subdivision_rejected() {
        assert!(matches!(
            quantize_melody(&[melody_note(0.0, 1.0)], 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
