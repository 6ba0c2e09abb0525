//! Analysis result types

use crate::theory::{chord_symbol, get_chord_notes, ChordQuality, Mode, Note, NoteName};
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::metadata::AnalysisMetadata;
use crate::error::AnalysisError;

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class
    pub tonic: NoteName,
    /// Major or minor
    pub mode: Mode,
}

impl Key {
    /// Create a key
    pub fn new(tonic: NoteName, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    /// Human-readable label (e.g., "C major", "F# minor")
    ///
    /// # Example
    ///
    /// ```
    /// use cadence_dsp::analysis::result::Key;
    /// use cadence_dsp::theory::{Mode, NoteName};
    ///
    /// assert_eq!(Key::new(NoteName::C, Mode::Major).label(), "C major");
    /// assert_eq!(Key::new(NoteName::A, Mode::Minor).label(), "A minor");
    /// ```
    pub fn label(&self) -> String {
        format!("{} {}", self.tonic.name(), self.mode.name())
    }

    /// Short chord-style name (e.g., "C", "Am", "F#m")
    pub fn short_name(&self) -> String {
        match self.mode {
            Mode::Major => self.tonic.name().to_string(),
            Mode::Minor => format!("{}m", self.tonic.name()),
        }
    }

    /// All 24 keys in detector iteration order: tonics chromatically from C,
    /// major before minor for each tonic
    pub fn all() -> Vec<Key> {
        NoteName::ALL
            .iter()
            .flat_map(|&tonic| [Key::new(tonic, Mode::Major), Key::new(tonic, Mode::Minor)])
            .collect()
    }
}

/// A chord positioned in beats
///
/// Only `(root, quality)` is stored; the symbol and member notes are derived
/// from the theory tables whenever they are requested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chord {
    root: NoteName,
    quality: ChordQuality,
    start_beat: f32,
    duration: f32,
}

impl Chord {
    /// Create a chord
    pub fn new(root: NoteName, quality: ChordQuality, start_beat: f32, duration: f32) -> Self {
        Self {
            root,
            quality,
            start_beat,
            duration,
        }
    }

    /// Root pitch class
    pub fn root(&self) -> NoteName {
        self.root
    }

    /// Chord quality
    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Onset in beats
    pub fn start_beat(&self) -> f32 {
        self.start_beat
    }

    /// Duration in beats
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Chord symbol (e.g., "Am7")
    pub fn symbol(&self) -> String {
        chord_symbol(self.root, self.quality)
    }

    /// Member pitch classes, root first
    pub fn notes(&self) -> Vec<NoteName> {
        get_chord_notes(self.root, self.quality)
    }

    /// Whether `beat` falls in `[start_beat, start_beat + duration)`
    pub fn contains_beat(&self, beat: f32) -> bool {
        beat >= self.start_beat && beat < self.start_beat + self.duration
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Chord", 6)?;
        state.serialize_field("root", &self.root)?;
        state.serialize_field("quality", &self.quality)?;
        state.serialize_field("symbol", &self.symbol())?;
        state.serialize_field("notes", &self.notes())?;
        state.serialize_field("start_beat", &self.start_beat)?;
        state.serialize_field("duration", &self.duration)?;
        state.end()
    }
}

/// A chord with its Roman-numeral function relative to a specific key
///
/// The label is not intrinsic to the chord and must be recomputed when the
/// key changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordWithFunction {
    /// The labeled chord
    #[serde(flatten)]
    pub chord: Chord,
    /// Roman numeral (e.g., "V7", "bVII", "ii°")
    pub roman_numeral: String,
}

/// Role of a melody note within the chord sounding under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordTone {
    /// Chord root
    Root,
    /// Chord third (second member)
    Third,
    /// Chord fifth (third member)
    Fifth,
    /// Chord seventh (fourth member)
    Seventh,
    /// Not a member of the chord
    NonChord,
}

/// A melody note with detection confidence and optional chord-tone role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodyNote {
    /// The pitched note
    #[serde(flatten)]
    pub note: Note,
    /// Role relative to the active chord (assigned after chord labeling)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chord_tone: Option<ChordTone>,
    /// Confidence (average clarity of the source frames, 0.0-1.0)
    pub confidence: f32,
}

impl MelodyNote {
    /// Create a melody note without a chord-tone role
    pub fn new(note: Note, confidence: f32) -> Self {
        Self {
            note,
            chord_tone: None,
            confidence,
        }
    }

    /// Copy of this note with a chord-tone role attached
    pub fn with_chord_tone(&self, chord_tone: Option<ChordTone>) -> Self {
        Self {
            note: self.note.clone(),
            chord_tone,
            confidence: self.confidence,
        }
    }
}

/// Vocal part type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    /// Soprano
    Soprano,
    /// Alto
    Alto,
    /// Tenor
    Tenor,
    /// Bass
    Bass,
}

impl VoiceType {
    /// Inclusive MIDI range (low, high) of the voice
    pub fn range(self) -> (i32, i32) {
        match self {
            VoiceType::Soprano => (60, 81),
            VoiceType::Alto => (55, 76),
            VoiceType::Tenor => (48, 69),
            VoiceType::Bass => (40, 62),
        }
    }

    /// Midpoint of the voice range in MIDI
    pub fn center(self) -> f32 {
        let (low, high) = self.range();
        (low + high) as f32 / 2.0
    }

    /// Whether a MIDI pitch is singable by this voice
    pub fn contains(self, midi: i32) -> bool {
        let (low, high) = self.range();
        midi >= low && midi <= high
    }

    /// Lowercase name ("soprano", "alto", ...)
    pub fn name(self) -> &'static str {
        match self {
            VoiceType::Soprano => "soprano",
            VoiceType::Alto => "alto",
            VoiceType::Tenor => "tenor",
            VoiceType::Bass => "bass",
        }
    }
}

/// A generated vocal harmony part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyLine {
    /// Stable identifier for the part (e.g., "harmony-above")
    pub id: String,
    /// Display name (e.g., "Harmony Above")
    pub part_name: String,
    /// Voice range the part was written for
    pub voice_type: VoiceType,
    /// Generated notes, one per melody note
    pub notes: Vec<Note>,
}

/// Where the analyzed music came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Recorded or uploaded audio
    Audio,
    /// Symbolic score (MIDI, MusicXML)
    Symbolic,
}

/// Time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// Beat unit
    pub denominator: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

/// Analysis flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisFlag {
    /// Low key clarity (atonal/ambiguous)
    WeakTonality,
    /// No voiced pitch frames were found
    NoVoicedFrames,
    /// Tempo estimation fell back to the default
    TempoDefaulted,
    /// The audio chord recognizer found no confident chords
    NoChordsDetected,
}

/// Complete analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier of this analysis run
    pub id: Uuid,

    /// Song title supplied by the caller
    pub song_title: String,

    /// Input source
    pub source_type: SourceType,

    /// Detected key
    pub key: Key,

    /// Key correlation of the detected key (-1.0-1.0, 0.0 when undetermined)
    pub key_confidence: f32,

    /// Tempo in BPM
    pub tempo: f32,

    /// Time signature (not detected; always 4/4)
    pub time_signature: TimeSignature,

    /// Quantized melody with chord-tone roles
    pub melody: Vec<MelodyNote>,

    /// Chords with Roman-numeral labels
    pub chords: Vec<ChordWithFunction>,

    /// Generated harmony parts
    pub harmony_lines: Vec<HarmonyLine>,

    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Pretty-printed JSON for collaborators (UI, persistence)
    pub fn to_json(&self) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::ProcessingError(format!("Failed to serialize result: {}", e)))
    }

    /// Parse a result previously written with [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::InvalidInput(format!("Invalid analysis JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_labels() {
        assert_eq!(Key::new(NoteName::FSharp, Mode::Minor).label(), "F# minor");
        assert_eq!(Key::new(NoteName::C, Mode::Major).short_name(), "C");
        assert_eq!(Key::new(NoteName::A, Mode::Minor).short_name(), "Am");
    }

    #[test]
    fn test_key_all_order() {
        let keys = Key::all();
        assert_eq!(keys.len(), 24);
        assert_eq!(keys[0], Key::new(NoteName::C, Mode::Major));
        assert_eq!(keys[1], Key::new(NoteName::C, Mode::Minor));
        assert_eq!(keys[2], Key::new(NoteName::CSharp, Mode::Major));
        assert_eq!(keys[23], Key::new(NoteName::B, Mode::Minor));
    }

    #[test]
    fn test_chord_derived_fields() {
        let chord = Chord::new(NoteName::G, ChordQuality::Dominant7, 4.0, 2.0);
        assert_eq!(chord.symbol(), "G7");
        assert_eq!(
            chord.notes(),
            vec![NoteName::G, NoteName::B, NoteName::D, NoteName::F]
        );
        assert!(chord.contains_beat(4.0));
        assert!(chord.contains_beat(5.99));
        assert!(!chord.contains_beat(6.0));
        assert!(!chord.contains_beat(3.99));
    }

    #[test]
    fn test_chord_serializes_derived_fields() {
        let chord = Chord::new(NoteName::A, ChordQuality::Minor, 0.0, 4.0);
        let json = serde_json::to_value(&chord).unwrap();
        assert_eq!(json["symbol"], "Am");
        assert_eq!(json["notes"], serde_json::json!(["A", "C", "E"]));

        let back: Chord = serde_json::from_value(json).unwrap();
        assert_eq!(back, chord);
    }

    #[test]
    fn test_labeled_chord_flattens() {
        let labeled = ChordWithFunction {
            chord: Chord::new(NoteName::G, ChordQuality::Major, 0.0, 1.0),
            roman_numeral: "V".to_string(),
        };
        let json = serde_json::to_value(&labeled).unwrap();
        assert_eq!(json["symbol"], "G");
        assert_eq!(json["roman_numeral"], "V");
    }

    #[test]
    fn test_voice_ranges() {
        assert_eq!(VoiceType::Soprano.range(), (60, 81));
        assert_eq!(VoiceType::Alto.range(), (55, 76));
        assert_eq!(VoiceType::Tenor.range(), (48, 69));
        assert_eq!(VoiceType::Bass.range(), (40, 62));
        assert_eq!(VoiceType::Bass.center(), 51.0);
        assert!(VoiceType::Alto.contains(55));
        assert!(!VoiceType::Alto.contains(77));
    }

    #[test]
    fn test_melody_note_with_chord_tone() {
        let note = MelodyNote::new(Note::from_midi(64, 0.0, 1.0), 0.9);
        let tagged = note.with_chord_tone(Some(ChordTone::Third));
        assert_eq!(note.chord_tone, None);
        assert_eq!(tagged.chord_tone, Some(ChordTone::Third));
        assert_eq!(tagged.note, note.note);
    }
}
