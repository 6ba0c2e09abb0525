//! Chord quality tables
//!
//! Interval and symbol tables for the closed set of chord qualities, plus the
//! binary chroma templates used for template matching.

use super::notes::NoteName;
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    /// Major triad
    Major,
    /// Minor triad
    Minor,
    /// Diminished triad
    Diminished,
    /// Augmented triad
    Augmented,
    /// Dominant seventh
    #[serde(rename = "dominant7")]
    Dominant7,
    /// Major seventh
    #[serde(rename = "major7")]
    Major7,
    /// Minor seventh
    #[serde(rename = "minor7")]
    Minor7,
    /// Fully diminished seventh
    #[serde(rename = "diminished7")]
    Diminished7,
    /// Half-diminished seventh (m7b5)
    #[serde(rename = "half-diminished7")]
    HalfDiminished7,
    /// Suspended second
    Sus2,
    /// Suspended fourth
    Sus4,
}

impl ChordQuality {
    /// Every quality, in table order
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Diminished7,
        ChordQuality::HalfDiminished7,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
    ];

    /// Qualities the audio chord recognizer matches against (inner loop order)
    pub const DETECTABLE: [ChordQuality; 7] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
    ];

    /// Semitone intervals above the root
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
        }
    }

    /// Suffix appended to the root in a chord symbol (e.g. "m7")
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
        }
    }

    /// Parse a chord-symbol suffix back into a quality
    ///
    /// Accepts the canonical suffixes plus common aliases ("°", "+", "ø7", "min").
    pub fn from_suffix(suffix: &str) -> Result<Self, AnalysisError> {
        let quality = match suffix.trim() {
            "" | "M" | "maj" => ChordQuality::Major,
            "m" | "min" | "-" => ChordQuality::Minor,
            "dim" | "°" | "o" => ChordQuality::Diminished,
            "aug" | "+" => ChordQuality::Augmented,
            "7" | "dom7" => ChordQuality::Dominant7,
            "maj7" | "M7" | "Δ7" => ChordQuality::Major7,
            "m7" | "min7" | "-7" => ChordQuality::Minor7,
            "dim7" | "°7" | "o7" => ChordQuality::Diminished7,
            "m7b5" | "ø7" | "ø" => ChordQuality::HalfDiminished7,
            "sus2" => ChordQuality::Sus2,
            "sus4" | "sus" => ChordQuality::Sus4,
            other => {
                return Err(AnalysisError::InvalidInput(format!(
                    "Unknown chord suffix '{}'",
                    other
                )))
            }
        };
        Ok(quality)
    }

    /// Whether this quality contains a seventh
    pub fn is_seventh(self) -> bool {
        self.intervals().len() == 4
    }
}

/// Pitch classes of a chord, root first, in interval-table order
///
/// # Example
///
/// ```
/// use cadence_dsp::theory::{get_chord_notes, ChordQuality, NoteName};
///
/// assert_eq!(
///     get_chord_notes(NoteName::A, ChordQuality::Minor7),
///     vec![NoteName::A, NoteName::C, NoteName::E, NoteName::G]
/// );
/// ```
pub fn get_chord_notes(root: NoteName, quality: ChordQuality) -> Vec<NoteName> {
    quality
        .intervals()
        .iter()
        .map(|&interval| root.transpose(interval as i32))
        .collect()
}

/// Chord symbol, e.g. "C", "F#m7", "Bdim"
pub fn chord_symbol(root: NoteName, quality: ChordQuality) -> String {
    format!("{}{}", root.name(), quality.suffix())
}

/// Parse a chord symbol such as "Ebmaj7" or "F#m" into (root, quality)
pub fn parse_chord_symbol(symbol: &str) -> Result<(NoteName, ChordQuality), AnalysisError> {
    let trimmed = symbol.trim();
    let mut split = trimmed
        .char_indices()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    if let Some(c) = trimmed[split..].chars().next() {
        if matches!(c, '#' | 'b' | '♯' | '♭') {
            split += c.len_utf8();
        }
    }
    let (root_str, suffix) = trimmed.split_at(split);
    let root: NoteName = root_str.parse()?;
    let quality = ChordQuality::from_suffix(suffix)?;
    Ok((root, quality))
}

/// Binary 12-bin presence vector for a chord (1.0 at each chord pitch class)
pub fn chord_chroma_template(root: NoteName, quality: ChordQuality) -> [f32; 12] {
    let mut template = [0.0f32; 12];
    for note in get_chord_notes(root, quality) {
        template[note.pitch_class() as usize] = 1.0;
    }
    template
}
