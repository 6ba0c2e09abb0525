//! Pitch detection modules
//!
//! Monophonic fundamental-frequency tracking:
//! - McLeod Pitch Method estimator
//! - Offline framing over a whole buffer
//! - Realtime tracker over a rolling live buffer
//!
//! Both front ends share the same acceptance rule: a frame is voiced only if
//! its clarity reaches the threshold and its frequency lies in the configured
//! range. Rejected frames are kept as explicit silence markers.

pub mod detector;
pub mod mpm;
pub mod realtime;

pub use detector::{detect_pitches, pitch_frame_layout};
pub use mpm::{McLeodPitchDetector, PitchEstimate};
pub use realtime::RealtimePitchTracker;

use crate::config::PitchConfig;
use crate::theory::{frequency_to_midi_exact, midi_to_note, NoteName};
use serde::{Deserialize, Serialize};

/// One analysis frame of the pitch track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Detected fundamental in Hz (0.0 when unvoiced)
    pub frequency: f32,

    /// Periodicity confidence (0.0-1.0)
    pub clarity: f32,

    /// Nearest note, `None` for silence/unvoiced/low-confidence frames
    pub note: Option<NoteName>,

    /// Octave of the nearest note
    pub octave: Option<i32>,

    /// Deviation from the nearest note in cents (-50..=50, positive = sharp)
    pub cents_off: i32,

    /// Frame start in milliseconds from the beginning of the buffer
    pub timestamp_ms: f32,
}

impl PitchFrame {
    /// Explicit silence marker at `timestamp_ms`
    pub fn silent(timestamp_ms: f32) -> Self {
        Self {
            frequency: 0.0,
            clarity: 0.0,
            note: None,
            octave: None,
            cents_off: 0,
            timestamp_ms,
        }
    }

    /// Voiced frame for a frequency, with note, octave and cents derived
    pub fn voiced(frequency: f32, clarity: f32, timestamp_ms: f32) -> Self {
        let exact = frequency_to_midi_exact(frequency);
        let nearest = exact.round();
        let (note, octave) = midi_to_note(nearest as i32);
        let cents = (100.0 * (exact - nearest)).round() as i32;
        Self {
            frequency,
            clarity,
            note: Some(note),
            octave: Some(octave),
            cents_off: cents.clamp(-50, 50),
            timestamp_ms,
        }
    }

    /// Whether the frame carries a note
    pub fn is_voiced(&self) -> bool {
        self.note.is_some()
    }

    /// MIDI number of the nearest note, if voiced
    pub fn midi_number(&self) -> Option<i32> {
        match (self.note, self.octave) {
            (Some(note), Some(octave)) => Some(crate::theory::note_to_midi(note, octave)),
            _ => None,
        }
    }
}

/// Apply the acceptance rule to an estimator result
///
/// Accepted when `clarity >= clarity_threshold` and
/// `min_frequency <= frequency <= max_frequency`; anything else becomes a
/// silence marker at the same timestamp.
pub fn accept_estimate(
    estimate: Option<PitchEstimate>,
    timestamp_ms: f32,
    config: &PitchConfig,
) -> PitchFrame {
    match estimate {
        Some(e)
            if e.clarity >= config.clarity_threshold
                && e.frequency >= config.min_frequency
                && e.frequency <= config.max_frequency =>
        {
            PitchFrame::voiced(e.frequency, e.clarity, timestamp_ms)
        }
        _ => PitchFrame::silent(timestamp_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voiced_frame_fields() {
        let frame = PitchFrame::voiced(440.0, 0.95, 10.0);
        assert_eq!(frame.note, Some(NoteName::A));
        assert_eq!(frame.octave, Some(4));
        assert_eq!(frame.cents_off, 0);
        assert_eq!(frame.midi_number(), Some(69));
    }

    #[test]
    fn test_cents_sign() {
        // 10 cents sharp of A4
        let sharp = PitchFrame::voiced(440.0 * 2f32.powf(10.0 / 1200.0), 0.9, 0.0);
        assert_eq!(sharp.note, Some(NoteName::A));
        assert_eq!(sharp.cents_off, 10);

        // 20 cents flat of A4
        let flat = PitchFrame::voiced(440.0 * 2f32.powf(-20.0 / 1200.0), 0.9, 0.0);
        assert_eq!(flat.cents_off, -20);
    }

    #[test]
    fn test_acceptance_rule() {
        let config = PitchConfig::default();
        let ok = accept_estimate(
            Some(PitchEstimate { frequency: 440.0, clarity: 0.9 }),
            5.0,
            &config,
        );
        assert!(ok.is_voiced());

        let unclear = accept_estimate(
            Some(PitchEstimate { frequency: 440.0, clarity: 0.5 }),
            5.0,
            &config,
        );
        assert!(!unclear.is_voiced());
        assert_eq!(unclear.frequency, 0.0);
        assert_eq!(unclear.timestamp_ms, 5.0);

        let too_low = accept_estimate(
            Some(PitchEstimate { frequency: 50.0, clarity: 0.99 }),
            0.0,
            &config,
        );
        assert!(!too_low.is_voiced());

        // DC and Nyquist are outside the default range
        let dc = accept_estimate(Some(PitchEstimate { frequency: 0.0, clarity: 1.0 }), 0.0, &config);
        assert!(!dc.is_voiced());
        let nyquist = accept_estimate(
            Some(PitchEstimate { frequency: 22050.0, clarity: 1.0 }),
            0.0,
            &config,
        );
        assert!(!nyquist.is_voiced());
    }
}
