//! Symbolic note lists as pitch tracks
//!
//! A note list from a score reader is sampled on a fixed hop grid into
//! clarity-1.0 pitch frames, so symbolic input goes through the same
//! melody, key and tempo stages as audio.

use super::ms_per_beat;
use crate::error::AnalysisError;
use crate::features::pitch::PitchFrame;
use crate::theory::Note;

/// Convert notes to a pitch track
///
/// A grid point is voiced by the latest-starting note that covers it, and
/// silent where no note sounds. Back-to-back notes of the same pitch are
/// separated by one silent frame so they stay distinct notes.
///
/// # Arguments
///
/// * `notes` - Notes positioned in beats
/// * `tempo` - Tempo in BPM
/// * `hop_ms` - Frame spacing in milliseconds
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a non-positive tempo or hop
pub fn notes_to_pitch_frames(
    notes: &[Note],
    tempo: f32,
    hop_ms: f32,
) -> Result<Vec<PitchFrame>, AnalysisError> {
    let ms_per_beat = ms_per_beat(tempo)?;
    if !(hop_ms > 0.0 && hop_ms.is_finite()) {
        return Err(AnalysisError::InvalidInput(format!(
            "Hop must be > 0 ms, got {}",
            hop_ms
        )));
    }

    let mut ordered: Vec<&Note> = notes.iter().filter(|n| n.duration() > 0.0).collect();
    ordered.sort_by(|a, b| {
        a.start_beat()
            .partial_cmp(&b.start_beat())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let end_ms = ordered
        .iter()
        .map(|n| n.end_beat() * ms_per_beat)
        .fold(0.0f32, f32::max);
    let frame_count = (end_ms / hop_ms).ceil() as usize;

    // Index into `ordered` of the note sounding at each grid point
    let owners: Vec<Option<usize>> = (0..frame_count)
        .map(|i| {
            let t = i as f32 * hop_ms;
            ordered.iter().rposition(|n| {
                n.start_beat() * ms_per_beat <= t && t < n.end_beat() * ms_per_beat
            })
        })
        .collect();

    let frames = owners
        .iter()
        .enumerate()
        .map(|(i, owner)| {
            let t = i as f32 * hop_ms;
            let next = owners.get(i + 1).copied().flatten();
            match *owner {
                Some(idx)
                    if next.map_or(true, |n| {
                        n == idx || ordered[n].midi_number() != ordered[idx].midi_number()
                    }) =>
                {
                    PitchFrame::voiced(ordered[idx].frequency(), 1.0, t)
                }
                _ => PitchFrame::silent(t),
            }
        })
        .collect();

    Ok(frames)
}
