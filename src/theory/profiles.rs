//! Krumhansl-Kessler key profiles
//!
//! Probe-tone ratings for C major and C minor. Profiles for other tonics are
//! obtained by rotating these canonical vectors.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::notes::NoteName;
use super::scales::Mode;

/// C major profile
pub const MAJOR_KEY_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// C minor profile
pub const MINOR_KEY_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Rotate a slice to the right by `n` positions (modulo its length)
///
/// Element `i` of the input lands at index `(i + n) % len`, so rotating a
/// C-based profile by a tonic's pitch class aligns it with that tonic.
///
/// # Example
///
/// ```
/// use cadence_dsp::theory::rotate_array;
///
/// assert_eq!(rotate_array(&[1, 2, 3, 4], 1), vec![4, 1, 2, 3]);
/// assert_eq!(rotate_array(&[1, 2, 3, 4], 4), vec![1, 2, 3, 4]);
/// ```
pub fn rotate_array<T: Clone>(arr: &[T], n: usize) -> Vec<T> {
    if arr.is_empty() {
        return Vec::new();
    }
    let shift = n % arr.len();
    let mut rotated = arr.to_vec();
    rotated.rotate_right(shift);
    rotated
}

/// Key profile for a specific tonic and mode
pub fn key_profile(tonic: NoteName, mode: Mode) -> Vec<f32> {
    let canonical = match mode {
        Mode::Major => &MAJOR_KEY_PROFILE,
        Mode::Minor => &MINOR_KEY_PROFILE,
    };
    rotate_array(canonical, tonic.pitch_class() as usize)
}
