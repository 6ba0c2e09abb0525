//! Realtime pitch tracking over a live input stream
//!
//! The caller feeds captured audio with [`RealtimePitchTracker::push_samples`]
//! and polls at its own rate (e.g. once per display refresh). Each poll runs
//! the estimator on the newest window only.

use super::detector::pitch_frame_layout;
use super::mpm::McLeodPitchDetector;
use super::{accept_estimate, PitchFrame};
use crate::config::PitchConfig;
use crate::error::AnalysisError;
use crate::io::SampleBuffer;

/// Live pitch tracker
///
/// State is limited to the rolling sample window and the last computed frame.
#[derive(Debug)]
pub struct RealtimePitchTracker {
    sample_rate: u32,
    config: PitchConfig,
    buffer: SampleBuffer,
    detector: McLeodPitchDetector,
    last_frame: Option<PitchFrame>,
}

impl RealtimePitchTracker {
    /// Create a tracker for a live stream
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for a zero sample rate or an
    /// invalid configuration
    pub fn new(sample_rate: u32, config: PitchConfig) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        config.validate()?;

        let (window_size, _) = pitch_frame_layout(sample_rate, &config);
        log::debug!(
            "Realtime pitch tracker: {} Hz, window={} samples, clarity>={:.2}",
            sample_rate,
            window_size,
            config.clarity_threshold
        );

        Ok(Self {
            sample_rate,
            config,
            buffer: SampleBuffer::new(window_size),
            detector: McLeodPitchDetector::new(window_size),
            last_frame: None,
        })
    }

    /// Tracker with the realtime preset (clarity threshold 0.75)
    pub fn with_defaults(sample_rate: u32) -> Result<Self, AnalysisError> {
        Self::new(sample_rate, PitchConfig::realtime())
    }

    /// Feed newly captured samples
    pub fn push_samples(&mut self, samples: &[f32]) {
        self.buffer.push(samples);
    }

    /// Analyze the newest window and store the result
    ///
    /// Returns a silence marker until a full window has been buffered.
    pub fn poll(&mut self, timestamp_ms: f32) -> PitchFrame {
        let window_size = self.buffer.capacity();
        let estimate = self
            .buffer
            .latest_window(window_size)
            .and_then(|window| self.detector.get_pitch(window, self.sample_rate));

        let frame = accept_estimate(estimate, timestamp_ms, &self.config);
        self.last_frame = Some(frame.clone());
        frame
    }

    /// Most recent frame returned by [`poll`](Self::poll)
    pub fn last_frame(&self) -> Option<&PitchFrame> {
        self.last_frame.as_ref()
    }

    /// Window length in samples
    pub fn window_size(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drop buffered audio and the last frame
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::NoteName;
    use std::f32::consts::PI;

    #[test]
    fn test_silence_until_window_full() {
        let mut tracker = RealtimePitchTracker::with_defaults(44100).unwrap();
        assert!(tracker.last_frame().is_none());

        tracker.push_samples(&[0.1; 100]);
        let frame = tracker.poll(16.0);
        assert!(!frame.is_voiced());
        assert_eq!(tracker.last_frame().map(|f| f.timestamp_ms), Some(16.0));
    }

    #[test]
    fn test_tracks_live_sine() {
        let sr = 44100;
        let mut tracker = RealtimePitchTracker::with_defaults(sr).unwrap();

        // Feed in small chunks like an audio callback would
        let signal: Vec<f32> = (0..8192)
            .map(|i| (2.0 * PI * 330.0 * i as f32 / sr as f32).sin() * 0.4)
            .collect();
        for chunk in signal.chunks(512) {
            tracker.push_samples(chunk);
        }

        let frame = tracker.poll(100.0);
        assert_eq!(frame.note, Some(NoteName::E));
        assert_eq!(frame.octave, Some(4));
        assert!(frame.clarity >= 0.75);

        tracker.reset();
        assert!(tracker.last_frame().is_none());
        assert!(!tracker.poll(200.0).is_voiced());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(RealtimePitchTracker::with_defaults(0).is_err());
    }
}
