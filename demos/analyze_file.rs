//! Example: Analyze a single audio file
//!
//! Usage:
//!   cargo run --release --example analyze_file -- [--json] [--tempo BPM] [--classical] <file>
//!
//! Prints the key, tempo, melody, labeled chords and harmony parts.

use cadence_dsp::{analyze_audio, decode_audio, AnalysisConfig, HarmonyMode};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut json = false;
    let mut config = AnalysisConfig::default();
    let mut path: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--classical" => config.harmony_mode = HarmonyMode::Classical,
            "--tempo" => {
                let bpm: f32 = args.next().ok_or("--tempo needs a value")?.parse()?;
                config.tempo_override = Some(bpm);
            }
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or("Usage: analyze_file [--json] [--tempo BPM] [--classical] <file>")?;

    if let Some(stem) = Path::new(&path).file_stem().and_then(|s| s.to_str()) {
        config.song_title = stem.to_string();
    }

    // Decode and analyze
    let audio = decode_audio(&path)?;
    let result = analyze_audio(&audio.samples, audio.sample_rate, &config)?;

    if json {
        println!("{}", result.to_json()?);
        return Ok(());
    }

    // Print results
    println!("Analysis Results: {}", result.song_title);
    println!("  Duration: {:.2} s at {} Hz", result.metadata.duration_seconds, audio.sample_rate);
    println!("  Key: {} (confidence: {:.2}, clarity: {:.2})",
        result.key.label(), result.key_confidence, result.metadata.key_clarity);
    println!("  Tempo: {:.1} BPM", result.tempo);

    println!("  Melody ({} notes):", result.melody.len());
    for note in result.melody.iter().take(16) {
        println!("    beat {:6.2}  {:4}  {:.2} beats  (conf {:.2})",
            note.note.start_beat(), note.note.label(), note.note.duration(), note.confidence);
    }

    println!("  Chords ({}):", result.chords.len());
    for chord in &result.chords {
        println!("    beat {:6.2}  {:6} {}",
            chord.chord.start_beat(), chord.chord.symbol(), chord.roman_numeral);
    }

    for line in &result.harmony_lines {
        let notes: Vec<String> = line.notes.iter().take(16).map(|n| n.label()).collect();
        println!("  {} ({}): {}", line.part_name, line.voice_type.name(), notes.join(" "));
    }

    for warning in &result.metadata.confidence_warnings {
        println!("  Warning: {}", warning);
    }
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);

    Ok(())
}
