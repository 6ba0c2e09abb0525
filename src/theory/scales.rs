//! Scale interval tables

use super::notes::NoteName;
use serde::{Deserialize, Serialize};

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major (Ionian)
    Major,
    /// Minor (natural minor / Aeolian)
    Minor,
}

impl Mode {
    /// Diatonic scale used for this mode
    pub fn scale_type(self) -> ScaleType {
        match self {
            Mode::Major => ScaleType::Major,
            Mode::Minor => ScaleType::NaturalMinor,
        }
    }

    /// Lowercase name ("major" / "minor")
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Scale type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleType {
    /// Major (Ionian)
    Major,
    /// Natural minor (Aeolian)
    NaturalMinor,
    /// Harmonic minor
    HarmonicMinor,
    /// Melodic minor (ascending)
    MelodicMinor,
    /// Dorian mode
    Dorian,
    /// Mixolydian mode
    Mixolydian,
    /// Major pentatonic
    MajorPentatonic,
    /// Minor pentatonic
    MinorPentatonic,
    /// Six-note blues scale
    Blues,
}

impl ScaleType {
    /// Semitone intervals above the tonic
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleType::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleType::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleType::MinorPentatonic => &[0, 3, 5, 7, 10],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }
}

/// Pitch classes of a scale starting on `root`
pub fn get_scale_notes(root: NoteName, scale_type: ScaleType) -> Vec<NoteName> {
    scale_type
        .intervals()
        .iter()
        .map(|&interval| root.transpose(interval as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_scale() {
        use NoteName::*;
        assert_eq!(get_scale_notes(C, ScaleType::Major), vec![C, D, E, F, G, A, B]);
    }

    #[test]
    fn test_a_natural_minor_is_relative_of_c_major() {
        let mut minor: Vec<u8> = get_scale_notes(NoteName::A, ScaleType::NaturalMinor)
            .iter()
            .map(|n| n.pitch_class())
            .collect();
        let mut major: Vec<u8> = get_scale_notes(NoteName::C, ScaleType::Major)
            .iter()
            .map(|n| n.pitch_class())
            .collect();
        minor.sort_unstable();
        major.sort_unstable();
        assert_eq!(minor, major);
    }

    #[test]
    fn test_scale_sizes() {
        assert_eq!(ScaleType::MajorPentatonic.intervals().len(), 5);
        assert_eq!(ScaleType::Blues.intervals().len(), 6);
        assert_eq!(ScaleType::Dorian.intervals().len(), 7);
    }

    #[test]
    fn test_mode_scale_type() {
        assert_eq!(Mode::Major.scale_type(), ScaleType::Major);
        assert_eq!(Mode::Minor.scale_type(), ScaleType::NaturalMinor);
    }
}
