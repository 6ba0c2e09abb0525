//! Harmony generation modules
//!
//! Writes a singable harmony part against a melody:
//! - Candidate pitches from the active chord inside a voice range
//! - Interval, voice-leading and range scoring
//! - A left-to-right greedy fold that carries the previous choice forward

pub mod generator;
pub mod scoring;
pub mod voices;

pub use generator::{
    active_chord, generate_harmony, generate_harmony_lines, generate_harmony_lines_with_mode,
};
pub use scoring::{score_candidate, VoiceLeadingContext};
pub use voices::{candidate_pitches, fallback_pitch};

use crate::analysis::result::VoiceType;
use serde::{Deserialize, Serialize};

/// Harmony style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyMode {
    /// Close thirds and sixths for group singing
    Choir,
    /// Choir scoring plus a penalty on parallel fifths and octaves
    Classical,
}

/// Options for one generated part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonyOptions {
    /// Harmony style (default: Choir)
    pub mode: HarmonyMode,

    /// Voice range to write for (default: Alto)
    pub voice_type: VoiceType,

    /// Prefer pitches above the melody (default: false)
    pub prefer_above: bool,
}

impl Default for HarmonyOptions {
    fn default() -> Self {
        Self {
            mode: HarmonyMode::Choir,
            voice_type: VoiceType::Alto,
            prefer_above: false,
        }
    }
}
