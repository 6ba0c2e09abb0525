//! Candidate pitches for a harmony voice

use crate::analysis::result::{Chord, VoiceType};

/// Lowest octave searched for candidates
const MIN_OCTAVE: i32 = 1;

/// Highest octave searched for candidates
const MAX_OCTAVE: i32 = 8;

/// Interval above the melody used when no chord tone fits (semitones)
const FALLBACK_ABOVE: i32 = 4;

/// Interval below the melody used when no chord tone fits (semitones)
const FALLBACK_BELOW: i32 = -3;

/// Chord tones inside the voice range, excluding the melody pitch
///
/// Ordered by chord member first, then octave ascending. This order decides
/// ties during scoring.
pub fn candidate_pitches(chord: &Chord, melody_midi: i32, voice: VoiceType) -> Vec<i32> {
    let mut candidates = Vec::new();
    for note in chord.notes() {
        let pc = note.pitch_class() as i32;
        for octave in MIN_OCTAVE..=MAX_OCTAVE {
            let midi = (octave + 1) * 12 + pc;
            if voice.contains(midi) && midi != melody_midi {
                candidates.push(midi);
            }
        }
    }
    candidates
}

/// Fixed-interval harmony pitch: a major third above or a minor third below
pub fn fallback_pitch(melody_midi: i32, prefer_above: bool) -> i32 {
    if prefer_above {
        melody_midi + FALLBACK_ABOVE
    } else {
        melody_midi + FALLBACK_BELOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ChordQuality, NoteName};

    #[test]
    fn test_alto_candidates_for_c_major() {
        let chord = Chord::new(NoteName::C, ChordQuality::Major, 0.0, 4.0);
        // Alto range is 55-76; melody E4 (64) is excluded
        let candidates = candidate_pitches(&chord, 64, VoiceType::Alto);
        assert_eq!(candidates, vec![60, 72, 76, 55, 67]);
        assert!(candidates.iter().all(|&m| VoiceType::Alto.contains(m)));
    }

    #[test]
    fn test_fallback_intervals() {
        assert_eq!(fallback_pitch(60, true), 64);
        assert_eq!(fallback_pitch(60, false), 57);
    }
}
