//! Chord-tone assignment
//!
//! Tags each melody note with its role in the chord sounding at its onset.

use super::result::{Chord, ChordTone, MelodyNote};

/// First chord whose span `[start, start + duration)` contains `beat`
pub fn chord_at_beat(chords: &[Chord], beat: f32) -> Option<&Chord> {
    chords.iter().find(|c| c.contains_beat(beat))
}

/// Role of a pitch class within a chord
pub fn chord_tone_of(note: &MelodyNote, chord: &Chord) -> ChordTone {
    let name = note.note.name();
    match chord.notes().iter().position(|&n| n == name) {
        Some(0) => ChordTone::Root,
        Some(1) => ChordTone::Third,
        Some(2) => ChordTone::Fifth,
        Some(3) => ChordTone::Seventh,
        _ => ChordTone::NonChord,
    }
}

/// Attach chord-tone roles to a melody
///
/// Notes whose onset falls outside every chord are left without a role.
pub fn assign_chord_tones(melody: &[MelodyNote], chords: &[Chord]) -> Vec<MelodyNote> {
    melody
        .iter()
        .map(|note| {
            let role = chord_at_beat(chords, note.note.start_beat())
                .map(|chord| chord_tone_of(note, chord));
            note.with_chord_tone(role)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ChordQuality, Note, NoteName};

    fn note(midi: i32, start: f32) -> MelodyNote {
        MelodyNote::new(Note::from_midi(midi, start, 1.0), 0.9)
    }

    #[test]
    fn test_roles_in_dominant_seventh() {
        let chords = vec![Chord::new(NoteName::G, ChordQuality::Dominant7, 0.0, 4.0)];
        let melody = vec![note(67, 0.0), note(71, 1.0), note(74, 2.0), note(65, 3.0), note(69, 3.5)];
        let tagged = assign_chord_tones(&melody, &chords);
        let roles: Vec<_> = tagged.iter().map(|n| n.chord_tone).collect();
        assert_eq!(
            roles,
            vec![
                Some(ChordTone::Root),
                Some(ChordTone::Third),
                Some(ChordTone::Fifth),
                Some(ChordTone::Seventh),
                Some(ChordTone::NonChord),
            ]
        );
    }

    #[test]
    fn test_outside_chords_is_unset() {
        let chords = vec![Chord::new(NoteName::C, ChordQuality::Major, 0.0, 2.0)];
        let tagged = assign_chord_tones(&[note(60, 2.0), note(64, 5.0)], &chords);
        assert!(tagged.iter().all(|n| n.chord_tone.is_none()));
        assert!(assign_chord_tones(&[note(60, 0.0)], &[])[0].chord_tone.is_none());
    }

    #[test]
    fn test_first_matching_chord_wins() {
        let chords = vec![
            Chord::new(NoteName::C, ChordQuality::Major, 0.0, 4.0),
            Chord::new(NoteName::A, ChordQuality::Minor, 0.0, 4.0),
        ];
        let tagged = assign_chord_tones(&[note(69, 1.0)], &chords);
        assert_eq!(tagged[0].chord_tone, Some(ChordTone::NonChord));
    }
}
