//! # Cadence DSP
//!
//! Music structure analysis for vocal harmony coaching: recovers the melody,
//! key, tempo and chords of a song and writes singable harmony parts against
//! the melody.
//!
//! ## Features
//!
//! - **Pitch Detection**: McLeod Pitch Method, offline and realtime
//! - **Chord Recognition**: Chroma template matching over 84 chord templates
//! - **Key Detection**: Krumhansl-Schmuckler correlation against Krumhansl-Kessler profiles
//! - **Melody Extraction**: Pitch-track segmentation, quantization and tempo estimation
//! - **Roman Numerals**: Functional chord labels relative to the detected key
//! - **Harmony Generation**: Voice-leading-aware harmony parts for choir voices
//!
//! ## Quick Start
//!
//! ```no_run
//! use cadence_dsp::{analyze_audio, AnalysisConfig};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100;
//!
//! // Analyze
//! let result = analyze_audio(&samples, sample_rate, &AnalysisConfig::default())?;
//!
//! println!("Key: {} (confidence: {:.2})", result.key.label(), result.key_confidence);
//! println!("Tempo: {:.1} BPM, {} melody notes", result.tempo, result.melody.len());
//! # Ok::<(), cadence_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The analysis pipeline follows this flow:
//!
//! ```text
//! Audio → Pitch Track → Tempo → Key → Melody → Chords → Roman Numerals → Chord Tones → Harmony
//! ```
//!
//! Symbolic input (a note list) is converted into a pitch track and joins the
//! same pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod harmony;
pub mod io;
pub mod preprocessing;
pub mod theory;

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{
    AnalysisFlag, AnalysisResult, Chord, ChordTone, ChordWithFunction, HarmonyLine, Key,
    MelodyNote, SourceType, TimeSignature, VoiceType,
};
pub use config::{AnalysisConfig, ChordConfig, MelodyConfig, PitchConfig};
pub use error::AnalysisError;
pub use features::pitch::{PitchFrame, RealtimePitchTracker};
pub use harmony::{HarmonyMode, HarmonyOptions};
pub use io::{decode_audio, DecodedAudio};
pub use theory::{ChordQuality, Mode, Note, NoteName};

use analysis::{assign_chord_tones, label_chords};
use chrono::Utc;
use features::chords::{detections_to_chords, recognize_chords};
use features::key::{compute_key_clarity, detect_key, detect_key_from_notes, KeyDetectionResult};
use features::melody::{
    detect_tempo, extract_melody, frame_spacing_ms, notes_to_pitch_frames, quantize_melody,
    DEFAULT_TEMPO,
};
use features::pitch::detect_pitches;
use harmony::generate_harmony_lines_with_mode;
use std::time::Instant;
use uuid::Uuid;

/// Main analysis function
///
/// Analyzes audio samples and returns the song structure: key, tempo,
/// quantized melody, labeled chords and harmony parts.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// `AnalysisResult` with a fresh id and timestamp. Silent audio still
/// completes, with warnings in the metadata.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for empty samples, a zero sample rate
/// or an invalid configuration
///
/// # Example
///
/// ```no_run
/// use cadence_dsp::{analyze_audio, AnalysisConfig};
///
/// let samples = vec![0.0f32; 44100 * 30]; // 30 seconds of silence
/// let result = analyze_audio(&samples, 44100, &AnalysisConfig::default())?;
/// # Ok::<(), cadence_dsp::AnalysisError>(())
/// ```
pub fn analyze_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting audio analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Invalid sample rate".to_string(),
        ));
    }
    config.validate()?;

    let mut metadata = AnalysisMetadata {
        duration_seconds: samples.len() as f32 / sample_rate as f32,
        sample_rate,
        ..AnalysisMetadata::default()
    };

    // Stage 1: Pitch track
    let frames = detect_pitches(samples, sample_rate, &config.pitch)?;

    // Stage 2: Tempo
    let tempo = resolve_tempo(&frames, config, &mut metadata);

    // Stage 3: Key
    let key_result = detect_key(&frames);

    // Stage 4: Chords from the audio itself
    let detections = recognize_chords(samples, sample_rate, &config.chords)?;
    metadata.chord_segment_count = detections.len();
    if detections.is_empty() {
        log::warn!("No chords above confidence {:.2}", config.chords.min_confidence);
        metadata.flag(
            AnalysisFlag::NoChordsDetected,
            "No confident chords detected",
        );
    }
    let chords = detections_to_chords(&detections, tempo)?;

    finish_analysis(
        &frames,
        chords,
        tempo,
        key_result,
        SourceType::Audio,
        config,
        metadata,
        start_time,
    )
}

/// Analyze a precomputed pitch track
///
/// Runs the pipeline without audio chord recognition, so the result has no
/// chords and harmony falls back to fixed intervals.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty track or an invalid
/// configuration
pub fn analyze_pitch_frames(
    frames: &[PitchFrame],
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();
    log::debug!("Starting pitch-track analysis: {} frames", frames.len());

    if frames.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty pitch track".to_string(),
        ));
    }
    config.validate()?;

    let last_ms = frames.last().map(|f| f.timestamp_ms).unwrap_or(0.0);
    let mut metadata = AnalysisMetadata {
        duration_seconds: (last_ms + frame_spacing_ms(frames)) / 1000.0,
        ..AnalysisMetadata::default()
    };

    let tempo = resolve_tempo(frames, config, &mut metadata);
    let key_result = detect_key(frames);

    finish_analysis(
        frames,
        Vec::new(),
        tempo,
        key_result,
        SourceType::Audio,
        config,
        metadata,
        start_time,
    )
}

/// Analyze a symbolic note list
///
/// Notes are sampled into a pitch track at the configured hop so they share
/// the melody stage with audio input. The key is found from the
/// duration-weighted notes. Chords come from the caller (e.g. a score
/// reader); without them harmony falls back to fixed intervals.
///
/// # Arguments
///
/// * `notes` - Notes positioned in beats
/// * `chords` - Optional beat-positioned chords
/// * `config` - Analysis configuration; `tempo_override` sets the tempo
///   (default 120 BPM)
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` for an empty note list or an invalid
/// configuration
pub fn analyze_notes(
    notes: &[Note],
    chords: Option<&[Chord]>,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();
    log::debug!(
        "Starting symbolic analysis: {} notes, {} chords",
        notes.len(),
        chords.map_or(0, |c| c.len())
    );

    if notes.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty note list".to_string()));
    }
    config.validate()?;

    let tempo = config.tempo_override.unwrap_or(DEFAULT_TEMPO);
    let frames = notes_to_pitch_frames(notes, tempo, config.pitch.hop_duration_ms)?;

    let metadata = AnalysisMetadata {
        duration_seconds: frames.len() as f32 * config.pitch.hop_duration_ms / 1000.0,
        ..AnalysisMetadata::default()
    };

    let key_result = detect_key_from_notes(notes);
    let chords = chords.map(|c| c.to_vec()).unwrap_or_default();

    finish_analysis(
        &frames,
        chords,
        tempo,
        key_result,
        SourceType::Symbolic,
        config,
        metadata,
        start_time,
    )
}

/// Tempo override, else estimated tempo, else the default (flagged)
fn resolve_tempo(
    frames: &[PitchFrame],
    config: &AnalysisConfig,
    metadata: &mut AnalysisMetadata,
) -> f32 {
    if let Some(tempo) = config.tempo_override {
        log::debug!("Using tempo override: {:.1} BPM", tempo);
        return tempo;
    }
    match detect_tempo(frames) {
        Some(tempo) => tempo,
        None => {
            log::warn!("Tempo estimation failed, using {} BPM", DEFAULT_TEMPO);
            metadata.flag(
                AnalysisFlag::TempoDefaulted,
                format!("Tempo defaulted to {} BPM", DEFAULT_TEMPO),
            );
            DEFAULT_TEMPO
        }
    }
}

/// Shared tail of every pipeline: melody, labels, chord tones, harmony
#[allow(clippy::too_many_arguments)]
fn finish_analysis(
    frames: &[PitchFrame],
    chords: Vec<Chord>,
    tempo: f32,
    key_result: KeyDetectionResult,
    source_type: SourceType,
    config: &AnalysisConfig,
    mut metadata: AnalysisMetadata,
    start_time: Instant,
) -> Result<AnalysisResult, AnalysisError> {
    let voiced = frames.iter().filter(|f| f.is_voiced()).count();
    metadata.pitch_frame_count = frames.len();
    metadata.voiced_ratio = if frames.is_empty() {
        0.0
    } else {
        voiced as f32 / frames.len() as f32
    };
    if voiced == 0 {
        log::warn!("No voiced pitch frames");
        metadata.flag(AnalysisFlag::NoVoicedFrames, "No voiced frames detected");
    }

    let key = key_result.key;
    metadata.key_clarity = compute_key_clarity(&key_result.all_scores);
    if metadata.key_clarity < config.weak_tonality_threshold {
        metadata.flag(
            AnalysisFlag::WeakTonality,
            format!("Weak tonality (key clarity {:.3})", metadata.key_clarity),
        );
    }

    let melody = extract_melody(frames, tempo, &config.melody)?;
    let melody = quantize_melody(&melody, config.melody.subdivision)?;
    let melody = assign_chord_tones(&melody, &chords);
    let labeled = label_chords(&chords, &key);

    let harmony_lines = if config.generate_harmony {
        generate_harmony_lines_with_mode(&melody, &chords, config.harmony_mode)
    } else {
        Vec::new()
    };

    metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Analysis complete: key={} (r={:.3}), tempo={:.1} BPM, {} notes, {} chords, {:.1} ms",
        key.label(),
        key_result.confidence,
        tempo,
        melody.len(),
        labeled.len(),
        metadata.processing_time_ms
    );

    Ok(AnalysisResult {
        id: Uuid::new_v4(),
        song_title: config.song_title.clone(),
        source_type,
        key,
        key_confidence: key_result.confidence,
        tempo,
        time_signature: TimeSignature::default(),
        melody,
        chords: labeled,
        harmony_lines,
        created_at: Utc::now(),
        metadata,
    })
}
