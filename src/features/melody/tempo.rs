//! Tempo estimation from note onsets
//!
//! The pitch track is re-segmented without a duration filter; the
//! inter-onset intervals (IOIs) between consecutive segments within
//! 150-2000 ms vote through their median. The resulting BPM is folded by
//! octaves into 60-180.

use super::extractor::segment_frames;
use crate::features::pitch::PitchFrame;

/// Tempo used when there is too little rhythmic evidence (BPM)
pub const DEFAULT_TEMPO: f32 = 120.0;

/// Shortest IOI considered (ms, exclusive)
const MIN_IOI_MS: f32 = 150.0;

/// Longest IOI considered (ms, exclusive)
const MAX_IOI_MS: f32 = 2000.0;

const MIN_BPM: f32 = 60.0;
const MAX_BPM: f32 = 180.0;

/// Estimate tempo, or `None` when the track has fewer than 3 segments or no
/// usable IOIs
pub fn detect_tempo(frames: &[PitchFrame]) -> Option<f32> {
    let segments = segment_frames(frames);
    if segments.len() < 3 {
        log::debug!("Tempo: only {} segments", segments.len());
        return None;
    }

    let mut iois: Vec<f32> = segments
        .windows(2)
        .map(|pair| pair[1].start_ms - pair[0].start_ms)
        .filter(|&ioi| ioi > MIN_IOI_MS && ioi < MAX_IOI_MS)
        .collect();
    if iois.is_empty() {
        log::debug!("Tempo: no IOIs in range");
        return None;
    }

    iois.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = iois.len() / 2;
    let median = if iois.len() % 2 == 0 {
        (iois[mid - 1] + iois[mid]) / 2.0
    } else {
        iois[mid]
    };

    let mut bpm = 60_000.0 / median;
    while bpm < MIN_BPM {
        bpm *= 2.0;
    }
    while bpm > MAX_BPM {
        bpm /= 2.0;
    }

    log::debug!(
        "Tempo: {} IOIs, median {:.1} ms -> {:.1} BPM",
        iois.len(),
        median,
        bpm
    );
    Some(bpm)
}

/// Estimate tempo in BPM, falling back to 120
pub fn estimate_tempo(frames: &[PitchFrame]) -> f32 {
    detect_tempo(frames).unwrap_or(DEFAULT_TEMPO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Alternating notes with onsets every `ioi_ms`, 10 ms frames
    fn pulse_track(ioi_ms: f32, notes: usize) -> Vec<PitchFrame> {
        let frames_per_note = (ioi_ms / 10.0) as usize;
        let mut frames = Vec::new();
        for n in 0..notes {
            let freq = if n % 2 == 0 { 440.0 } else { 523.25 };
            for i in 0..frames_per_note {
                let ts = (n * frames_per_note + i) as f32 * 10.0;
                frames.push(PitchFrame::voiced(freq, 0.9, ts));
            }
        }
        frames
    }

    #[test]
    fn test_half_second_onsets_give_120() {
        let frames = pulse_track(500.0, 8);
        assert_relative_eq!(estimate_tempo(&frames), 120.0, epsilon = 1e-3);
    }

    #[test]
    fn test_slow_onsets_fold_up() {
        // 1600 ms IOI = 37.5 BPM -> 75 BPM
        let frames = pulse_track(1600.0, 4);
        assert_relative_eq!(estimate_tempo(&frames), 75.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fast_onsets_fold_down() {
        // 200 ms IOI = 300 BPM -> 150 BPM
        let frames = pulse_track(200.0, 8);
        assert_relative_eq!(estimate_tempo(&frames), 150.0, epsilon = 1e-3);
    }

    #[test]
    fn test_too_few_segments_defaults() {
        let frames = pulse_track(500.0, 2);
        assert_eq!(detect_tempo(&frames), None);
        assert_eq!(estimate_tempo(&frames), DEFAULT_TEMPO);
        assert_eq!(estimate_tempo(&[]), DEFAULT_TEMPO);
    }

    #[test]
    fn test_out_of_range_iois_default() {
        // 100 ms onsets are all below the IOI floor
        let frames = pulse_track(100.0, 10);
        assert_eq!(detect_tempo(&frames), None);
    }
}
