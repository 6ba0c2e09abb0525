//! Configuration parameters for music analysis
//!
//! Every recognized option is an explicit field with a documented default.
//! [`AnalysisConfig::validate`] rejects misconfiguration before any work is
//! done.

use crate::error::AnalysisError;
use crate::harmony::HarmonyMode;
use serde::{Deserialize, Serialize};

/// Pitch detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Minimum clarity for a frame to be voiced (default: 0.8 offline, 0.75 realtime)
    pub clarity_threshold: f32,

    /// Lowest accepted fundamental in Hz (default: 80.0)
    pub min_frequency: f32,

    /// Highest accepted fundamental in Hz (default: 1200.0)
    pub max_frequency: f32,

    /// Analysis window length in milliseconds, rounded up to a power of two
    /// in samples (default: 30.0)
    pub frame_duration_ms: f32,

    /// Hop between frames in milliseconds (default: 10.0)
    pub hop_duration_ms: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            clarity_threshold: 0.8,
            min_frequency: 80.0,
            max_frequency: 1200.0,
            frame_duration_ms: 30.0,
            hop_duration_ms: 10.0,
        }
    }
}

impl PitchConfig {
    /// Preset for live microphone tracking (lower clarity threshold)
    pub fn realtime() -> Self {
        Self {
            clarity_threshold: 0.75,
            ..Self::default()
        }
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=1.0).contains(&self.clarity_threshold) {
            return Err(AnalysisError::InvalidInput(format!(
                "Clarity threshold must be in [0, 1], got {}",
                self.clarity_threshold
            )));
        }
        if self.min_frequency <= 0.0 || self.min_frequency >= self.max_frequency {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid frequency range: [{:.1}, {:.1}] Hz",
                self.min_frequency, self.max_frequency
            )));
        }
        if self.frame_duration_ms <= 0.0 || self.hop_duration_ms <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Frame and hop durations must be > 0, got {} / {} ms",
                self.frame_duration_ms, self.hop_duration_ms
            )));
        }
        Ok(())
    }
}

/// Chord recognition parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordConfig {
    /// Frame size in samples (default: 8192)
    pub frame_size: usize,

    /// Hop size in samples (default: 4096)
    pub hop_size: usize,

    /// Minimum template similarity for a frame to count (default: 0.5)
    pub min_confidence: f32,

    /// Smoothing window in frames (default: 3)
    ///
    /// Accepted for compatibility with stored settings; run-merging smoothing
    /// does not use a window.
    pub smoothing_window: usize,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            frame_size: 8192,
            hop_size: 4096,
            min_confidence: 0.5,
            smoothing_window: 3,
        }
    }
}

impl ChordConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.frame_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Chord frame size must be > 0".to_string(),
            ));
        }
        if self.hop_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Chord hop size must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AnalysisError::InvalidInput(format!(
                "Minimum chord confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// Melody extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodyConfig {
    /// Segments shorter than this are discarded as artifacts (default: 80.0 ms)
    pub min_duration_ms: f32,

    /// Quantization grid divisions per beat (default: 4 = sixteenth notes)
    pub subdivision: u32,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 80.0,
            subdivision: 4,
        }
    }
}

impl MelodyConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.min_duration_ms < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Minimum note duration must be >= 0, got {} ms",
                self.min_duration_ms
            )));
        }
        if self.subdivision == 0 {
            return Err(AnalysisError::InvalidInput(
                "Quantization subdivision must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Song title carried into the result (default: "Untitled")
    pub song_title: String,

    /// Pitch detection
    pub pitch: PitchConfig,

    /// Chord recognition
    pub chords: ChordConfig,

    /// Melody extraction and quantization
    pub melody: MelodyConfig,

    /// Use this tempo instead of estimating one (default: None)
    pub tempo_override: Option<f32>,

    /// Generate harmony parts (default: true)
    pub generate_harmony: bool,

    /// Harmony mode for generated parts (default: Choir)
    pub harmony_mode: HarmonyMode,

    /// Minimum key clarity before the result is flagged as weakly tonal
    /// (default: 0.05)
    pub weak_tonality_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            song_title: "Untitled".to_string(),
            pitch: PitchConfig::default(),
            chords: ChordConfig::default(),
            melody: MelodyConfig::default(),
            tempo_override: None,
            generate_harmony: true,
            harmony_mode: HarmonyMode::Choir,
            weak_tonality_threshold: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Validate every section of the configuration
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.pitch.validate()?;
        self.chords.validate()?;
        self.melody.validate()?;
        if let Some(tempo) = self.tempo_override {
            if !(tempo > 0.0 && tempo.is_finite()) {
                return Err(AnalysisError::InvalidInput(format!(
                    "Tempo override must be a positive BPM, got {}",
                    tempo
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pitch.clarity_threshold, 0.8);
        assert_eq!(config.chords.frame_size, 8192);
        assert_eq!(config.chords.hop_size, 4096);
        assert_eq!(config.melody.subdivision, 4);
        assert_eq!(PitchConfig::realtime().clarity_threshold, 0.75);
    }

    #[test]
    fn test_rejects_zero_hop() {
        let mut config = AnalysisConfig::default();
        config.chords.hop_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_frequency_range() {
        let config = PitchConfig {
            min_frequency: 1000.0,
            max_frequency: 100.0,
            ..PitchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tempo_override() {
        let config = AnalysisConfig {
            tempo_override: Some(0.0),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_with_defaults() {
        let json = r#"{
            "song_title": "Amazing Grace",
            "pitch": {"clarity_threshold": 0.9, "min_frequency": 80.0, "max_frequency": 1000.0,
                      "frame_duration_ms": 30.0, "hop_duration_ms": 10.0},
            "chords": {"frame_size": 4096, "hop_size": 2048, "min_confidence": 0.6, "smoothing_window": 3},
            "melody": {"min_duration_ms": 100.0, "subdivision": 2},
            "tempo_override": 90.0,
            "generate_harmony": false,
            "harmony_mode": "classical",
            "weak_tonality_threshold": 0.05
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.tempo_override, Some(90.0));
        assert_eq!(config.harmony_mode, HarmonyMode::Classical);
    }
}
