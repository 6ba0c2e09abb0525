//! Pitch-track segmentation and melody extraction
//!
//! Consecutive voiced frames with the same note and octave form a segment.
//! A silence marker or a pitch change closes the open segment. A segment of
//! N frames lasts N frame spacings, where the spacing is the median gap
//! between frame timestamps.

use super::ms_per_beat;
use crate::analysis::result::MelodyNote;
use crate::config::MelodyConfig;
use crate::error::AnalysisError;
use crate::features::pitch::PitchFrame;
use crate::theory::{frequency_to_midi, Note, NoteName};

/// Frame spacing used when the track has fewer than two frames
const FALLBACK_SPACING_MS: f32 = 10.0;

/// A run of frames on one pitch
#[derive(Debug, Clone, PartialEq)]
pub struct PitchSegment {
    /// Note of every frame in the run
    pub note: NoteName,
    /// Octave of every frame in the run
    pub octave: i32,
    /// Timestamp of the first frame (ms)
    pub start_ms: f32,
    /// Timestamp of the last frame (ms)
    pub end_ms: f32,
    /// Mean detected frequency (Hz)
    pub mean_frequency: f32,
    /// Mean clarity
    pub mean_clarity: f32,
    /// Number of frames in the run
    pub frame_count: usize,
}

impl PitchSegment {
    fn open(frame: &PitchFrame, note: NoteName, octave: i32) -> Self {
        Self {
            note,
            octave,
            start_ms: frame.timestamp_ms,
            end_ms: frame.timestamp_ms,
            mean_frequency: frame.frequency,
            mean_clarity: frame.clarity,
            frame_count: 1,
        }
    }

    fn extend(&mut self, frame: &PitchFrame) {
        let n = self.frame_count as f32;
        self.mean_frequency = (self.mean_frequency * n + frame.frequency) / (n + 1.0);
        self.mean_clarity = (self.mean_clarity * n + frame.clarity) / (n + 1.0);
        self.end_ms = frame.timestamp_ms;
        self.frame_count += 1;
    }

    /// Duration including the final frame's own span
    pub fn duration_ms(&self, spacing_ms: f32) -> f32 {
        self.end_ms - self.start_ms + spacing_ms
    }
}

/// Median gap between consecutive frame timestamps
///
/// Falls back to 10 ms for fewer than two frames or a non-positive median.
pub fn frame_spacing_ms(frames: &[PitchFrame]) -> f32 {
    let mut deltas: Vec<f32> = frames
        .windows(2)
        .map(|pair| pair[1].timestamp_ms - pair[0].timestamp_ms)
        .collect();
    if deltas.is_empty() {
        return FALLBACK_SPACING_MS;
    }
    deltas.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = deltas[deltas.len() / 2];
    if median > 0.0 {
        median
    } else {
        FALLBACK_SPACING_MS
    }
}

/// Group a pitch track into same-pitch runs
pub fn segment_frames(frames: &[PitchFrame]) -> Vec<PitchSegment> {
    let mut segments = Vec::new();
    let mut current: Option<PitchSegment> = None;

    for frame in frames {
        match (frame.note, frame.octave) {
            (Some(note), Some(octave)) => match current.as_mut() {
                Some(seg) if seg.note == note && seg.octave == octave => seg.extend(frame),
                _ => {
                    if let Some(done) = current.take() {
                        segments.push(done);
                    }
                    current = Some(PitchSegment::open(frame, note, octave));
                }
            },
            _ => {
                if let Some(done) = current.take() {
                    segments.push(done);
                }
            }
        }
    }
    if let Some(done) = current {
        segments.push(done);
    }

    segments
}

/// Extract beat-positioned melody notes from a pitch track
///
/// Segments shorter than `min_duration_ms` are discarded as artifacts. Each
/// remaining segment becomes one note at the MIDI number nearest its mean
/// frequency, with confidence equal to its mean clarity.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for a non-positive tempo or an
/// invalid configuration
pub fn extract_melody(
    frames: &[PitchFrame],
    tempo: f32,
    config: &MelodyConfig,
) -> Result<Vec<MelodyNote>, AnalysisError> {
    config.validate()?;
    let ms_per_beat = ms_per_beat(tempo)?;
    let spacing = frame_spacing_ms(frames);
    let segments = segment_frames(frames);

    let melody: Vec<MelodyNote> = segments
        .iter()
        .filter(|seg| seg.duration_ms(spacing) >= config.min_duration_ms)
        .map(|seg| {
            let note = Note::from_midi(
                frequency_to_midi(seg.mean_frequency),
                seg.start_ms / ms_per_beat,
                seg.duration_ms(spacing) / ms_per_beat,
            );
            MelodyNote::new(note, seg.mean_clarity)
        })
        .collect();

    log::debug!(
        "Melody: {} segments -> {} notes (spacing {:.1} ms, {:.0} BPM)",
        segments.len(),
        melody.len(),
        spacing,
        tempo
    );

    Ok(melody)
}
