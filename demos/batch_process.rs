//! Example: Batch process multiple audio files
//!
//! Usage:
//!   cargo run --release --example batch_process -- [--jobs N] <file1> <file2> ...
//!
//! Parallelism is across files; prints one JSON summary line per file.

use cadence_dsp::{analyze_audio, decode_audio, AnalysisConfig, AnalysisError};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct Summary {
    path: String,
    ok: bool,
    key: Option<String>,
    key_confidence: f32,
    tempo: f32,
    melody_notes: usize,
    chords: Vec<String>,
    processing_ms: f32,
    error: Option<String>,
}

fn analyze_path(path: &str, config: &AnalysisConfig) -> Result<Summary, AnalysisError> {
    let audio = decode_audio(path)?;
    let result = analyze_audio(&audio.samples, audio.sample_rate, config)?;
    Ok(Summary {
        path: path.to_string(),
        ok: true,
        key: Some(result.key.label()),
        key_confidence: result.key_confidence,
        tempo: result.tempo,
        melody_notes: result.melody.len(),
        chords: result
            .chords
            .iter()
            .map(|c| format!("{} ({})", c.chord.symbol(), c.roman_numeral))
            .collect(),
        processing_ms: result.metadata.processing_time_ms,
        error: None,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--jobs" => jobs = Some(args.next().ok_or("--jobs needs a value")?.parse()?),
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1).max(1))
            .unwrap_or(1)
    });
    eprintln!("Processing {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();
    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let summaries: Vec<Summary> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                analyze_path(path, &config).unwrap_or_else(|e| Summary {
                    path: path.clone(),
                    ok: false,
                    key: None,
                    key_confidence: 0.0,
                    tempo: 0.0,
                    melody_notes: 0,
                    chords: Vec::new(),
                    processing_ms: 0.0,
                    error: Some(e.to_string()),
                })
            })
            .collect()
    });

    for summary in &summaries {
        println!("{}", serde_json::to_string(summary)?);
    }

    let failed = summaries.iter().filter(|s| !s.ok).count();
    eprintln!(
        "Done: {} ok, {} failed in {:.2} s",
        summaries.len() - failed,
        failed,
        t0.elapsed().as_secs_f32()
    );

    Ok(())
}
