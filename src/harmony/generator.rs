//! Harmony line generation
//!
//! A strict left-to-right fold over the melody. Each step picks the
//! best-scoring chord tone for the current melody note, given the pitch
//! chosen at the previous step.

use super::scoring::{score_candidate, VoiceLeadingContext};
use super::voices::{candidate_pitches, fallback_pitch};
use super::{HarmonyMode, HarmonyOptions};
use crate::analysis::result::{Chord, HarmonyLine, MelodyNote, VoiceType};
use crate::theory::Note;

/// Chord sounding at `beat`
///
/// The first chord whose span contains the beat; otherwise the latest chord
/// that started at or before it.
pub fn active_chord(chords: &[Chord], beat: f32) -> Option<&Chord> {
    if let Some(chord) = chords.iter().find(|c| c.contains_beat(beat)) {
        return Some(chord);
    }
    chords
        .iter()
        .filter(|c| c.start_beat() <= beat)
        .fold(None, |latest: Option<&Chord>, c| match latest {
            Some(l) if l.start_beat() > c.start_beat() => Some(l),
            _ => Some(c),
        })
}

/// Pick the harmony pitch for one melody note
fn choose_pitch(
    melody_midi: i32,
    chord: Option<&Chord>,
    context: &VoiceLeadingContext,
    options: &HarmonyOptions,
) -> i32 {
    let candidates = match chord {
        Some(chord) => candidate_pitches(chord, melody_midi, options.voice_type),
        None => Vec::new(),
    };

    let mut best: Option<(i32, f32)> = None;
    for candidate in candidates {
        let score = score_candidate(candidate, melody_midi, context, options);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(pitch, _)| pitch)
        .unwrap_or_else(|| fallback_pitch(melody_midi, options.prefer_above))
}

/// Generate one harmony part
///
/// Each harmony note copies the start and duration of its melody note.
///
/// # Arguments
///
/// * `melody` - Melody notes in time order
/// * `chords` - Beat-positioned chords
/// * `options` - Voice, side and style
pub fn generate_harmony(
    melody: &[MelodyNote],
    chords: &[Chord],
    options: &HarmonyOptions,
) -> HarmonyLine {
    let (notes, _) = melody.iter().fold(
        (Vec::with_capacity(melody.len()), VoiceLeadingContext::default()),
        |(mut notes, context), melody_note| {
            let note = &melody_note.note;
            let melody_midi = note.midi_number();
            let chord = active_chord(chords, note.start_beat());
            let pitch = choose_pitch(melody_midi, chord, &context, options);

            notes.push(Note::from_midi(pitch, note.start_beat(), note.duration()));
            let next = VoiceLeadingContext {
                previous_harmony: Some(pitch),
                previous_melody: Some(melody_midi),
            };
            (notes, next)
        },
    );

    let side = if options.prefer_above { "above" } else { "below" };
    HarmonyLine {
        id: format!("harmony-{}-{}", options.voice_type.name(), side),
        part_name: format!("Harmony {} ({})", capitalize(side), options.voice_type.name()),
        voice_type: options.voice_type,
        notes,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generate the standard three parts in choir mode
///
/// "Harmony Above" (soprano, above), "Harmony Below" (alto, below) and
/// "Bass Line" (bass, below).
pub fn generate_harmony_lines(melody: &[MelodyNote], chords: &[Chord]) -> Vec<HarmonyLine> {
    generate_harmony_lines_with_mode(melody, chords, HarmonyMode::Choir)
}

/// Generate the standard three parts in a given style
pub fn generate_harmony_lines_with_mode(
    melody: &[MelodyNote],
    chords: &[Chord],
    mode: HarmonyMode,
) -> Vec<HarmonyLine> {
    let parts = [
        ("harmony-above", "Harmony Above", VoiceType::Soprano, true),
        ("harmony-below", "Harmony Below", VoiceType::Alto, false),
        ("bass-line", "Bass Line", VoiceType::Bass, false),
    ];

    let lines: Vec<HarmonyLine> = parts
        .iter()
        .map(|&(id, part_name, voice_type, prefer_above)| {
            let options = HarmonyOptions {
                mode,
                voice_type,
                prefer_above,
            };
            HarmonyLine {
                id: id.to_string(),
                part_name: part_name.to_string(),
                ..generate_harmony(melody, chords, &options)
            }
        })
        .collect();

    log::debug!(
        "Generated {} harmony lines for {} melody notes ({:?})",
        lines.len(),
        melody.len(),
        mode
    );
    lines
}
