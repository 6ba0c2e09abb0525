//! Roman-numeral chord labeling
//!
//! Labels a chord by the scale degree of its root in the key's diatonic scale
//! (major or natural minor). Roots outside the scale are named by their
//! semitone distance from the tonic with an accidental prefix.

use super::result::{Chord, ChordWithFunction, Key};
use crate::theory::{get_scale_notes, ChordQuality};

/// Numerals for diatonic degrees 1-7
const DEGREE_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Numerals by semitone distance from the tonic, for non-diatonic roots
const CHROMATIC_NUMERALS: [&str; 12] = [
    "I", "bII", "II", "bIII", "III", "IV", "#IV", "V", "bVI", "VI", "bVII", "VII",
];

/// Whether a quality is written with an uppercase numeral
fn is_uppercase(quality: ChordQuality) -> bool {
    matches!(
        quality,
        ChordQuality::Major | ChordQuality::Augmented | ChordQuality::Dominant7 | ChordQuality::Major7
    )
}

/// Suffix appended to the numeral
fn numeral_suffix(quality: ChordQuality) -> &'static str {
    match quality {
        ChordQuality::Major | ChordQuality::Minor => "",
        ChordQuality::Diminished => "°",
        ChordQuality::Augmented => "+",
        ChordQuality::Dominant7 | ChordQuality::Minor7 => "7",
        ChordQuality::Major7 => "maj7",
        ChordQuality::Diminished7 => "°7",
        ChordQuality::HalfDiminished7 => "ø7",
        ChordQuality::Sus2 => "sus2",
        ChordQuality::Sus4 => "sus4",
    }
}

/// Roman numeral of a chord in a key
///
/// # Example
///
/// ```
/// use cadence_dsp::analysis::{label_chord, result::{Chord, Key}};
/// use cadence_dsp::theory::{ChordQuality, Mode, NoteName};
///
/// let key = Key::new(NoteName::C, Mode::Major);
/// let chord = Chord::new(NoteName::G, ChordQuality::Dominant7, 0.0, 4.0);
/// assert_eq!(label_chord(&chord, &key), "V7");
/// ```
pub fn label_chord(chord: &Chord, key: &Key) -> String {
    let scale = get_scale_notes(key.tonic, key.mode.scale_type());
    let base = match scale.iter().position(|&n| n == chord.root()) {
        Some(degree) => DEGREE_NUMERALS[degree],
        None => {
            let distance = (chord.root().pitch_class() as i32 - key.tonic.pitch_class() as i32)
                .rem_euclid(12) as usize;
            CHROMATIC_NUMERALS[distance]
        }
    };

    let numeral = if is_uppercase(chord.quality()) {
        base.to_string()
    } else {
        base.to_lowercase()
    };
    format!("{}{}", numeral, numeral_suffix(chord.quality()))
}

/// Label every chord relative to a key
pub fn label_chords(chords: &[Chord], key: &Key) -> Vec<ChordWithFunction> {
    chords
        .iter()
        .map(|chord| ChordWithFunction {
            chord: chord.clone(),
            roman_numeral: label_chord(chord, key),
        })
        .collect()
}
