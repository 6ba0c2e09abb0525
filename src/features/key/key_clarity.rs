//! Key clarity scoring
//!
//! Estimates how "tonal" vs "atonal" a passage is from the gap between the
//! two best key correlations.

use crate::analysis::result::Key;

/// Compute key clarity from key scores
///
/// # Arguments
///
/// * `scores` - All 24 key scores (ranked, highest first)
///
/// # Returns
///
/// `(best - second) / |best|` clamped to 0.0-1.0; 0.0 when the best score is
/// not positive or fewer than two scores are given. Higher = more tonal.
pub fn compute_key_clarity(scores: &[(Key, f32)]) -> f32 {
    if scores.len() < 2 {
        return 0.0;
    }
    let best = scores[0].1;
    let second = scores[1].1;
    if best <= 0.0 {
        return 0.0;
    }
    ((best - second) / best.abs()).clamp(0.0, 1.0)
}
