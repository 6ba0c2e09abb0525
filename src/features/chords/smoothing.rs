//! Temporal merging of frame-level chord detections
//!
//! Frames below the confidence floor are dropped and close the open run. An
//! accepted frame extends the open run when the symbols match; otherwise it
//! starts a new segment. Dropped frames never bridge runs, so two equal
//! chords separated by a low-confidence frame stay two segments.

use super::ChordDetection;

/// Merge consecutive identical detections
///
/// # Arguments
///
/// * `frames` - Frame-level detections in time order
/// * `min_confidence` - Frames with lower confidence are discarded and end
///   the current run
///
/// # Returns
///
/// Segments with `end_time` extended to the last merged frame and
/// `confidence` the maximum over merged frames
pub fn smooth_detections(frames: &[ChordDetection], min_confidence: f32) -> Vec<ChordDetection> {
    let mut segments: Vec<ChordDetection> = Vec::new();
    let mut run_open = false;

    for frame in frames {
        if frame.confidence < min_confidence {
            run_open = false;
            continue;
        }
        match segments.last_mut() {
            Some(last) if run_open && last.symbol == frame.symbol => {
                last.end_time = frame.end_time;
                last.confidence = last.confidence.max(frame.confidence);
            }
            _ => segments.push(frame.clone()),
        }
        run_open = true;
    }

    segments
}
