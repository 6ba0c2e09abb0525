//! Candidate scoring
//!
//! Higher is better. Thirds and sixths against the melody are rewarded,
//! stepwise motion from the previous harmony note is rewarded, leaps are
//! penalized by their size, and pitches far from the middle of the voice
//! range are penalized slightly. Classical mode also penalizes parallel
//! fifths and octaves.

use super::{HarmonyMode, HarmonyOptions};

const THIRD_BONUS: f32 = 10.0;
const SIXTH_BONUS: f32 = 8.0;
const SIDE_BONUS: f32 = 3.0;
const STEP_BONUS: f32 = 6.0;
const SKIP_BONUS: f32 = 3.0;
const PARALLEL_PENALTY: f32 = 20.0;
const CENTER_WEIGHT: f32 = 0.2;

/// Pitches chosen at the previous melody note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceLeadingContext {
    /// Previous harmony pitch
    pub previous_harmony: Option<i32>,
    /// Previous melody pitch
    pub previous_melody: Option<i32>,
}

/// Score one candidate pitch against the melody pitch
pub fn score_candidate(
    candidate: i32,
    melody_midi: i32,
    context: &VoiceLeadingContext,
    options: &HarmonyOptions,
) -> f32 {
    let mut score = 0.0;

    let interval = (candidate - melody_midi).abs() % 12;
    match interval {
        3 | 4 => score += THIRD_BONUS,
        8 | 9 => score += SIXTH_BONUS,
        _ => {}
    }

    if (options.prefer_above && candidate > melody_midi)
        || (!options.prefer_above && candidate < melody_midi)
    {
        score += SIDE_BONUS;
    }

    if let Some(previous) = context.previous_harmony {
        let motion = (candidate - previous).abs();
        if motion <= 2 {
            score += STEP_BONUS;
        } else if motion <= 4 {
            score += SKIP_BONUS;
        } else {
            score -= motion as f32;
        }

        if options.mode == HarmonyMode::Classical {
            if let Some(previous_melody) = context.previous_melody {
                let previous_interval = (previous - previous_melody).abs() % 12;
                let parallel = (previous_interval == 7 && interval == 7)
                    || (previous_interval == 0 && interval == 0);
                if parallel && candidate != previous && melody_midi != previous_melody {
                    score -= PARALLEL_PENALTY;
                }
            }
        }
    }

    score -= CENTER_WEIGHT * (candidate as f32 - options.voice_type.center()).abs();
    score
}
