//! Integration tests for the music analysis pipeline
//!
//! All audio is synthesized in the test, so no fixture files are needed.

use cadence_dsp::features::pitch::PitchFrame;
use cadence_dsp::{
    analyze_audio, analyze_notes, analyze_pitch_frames, decode_audio, AnalysisConfig,
    AnalysisError, AnalysisFlag, AnalysisResult, Chord, ChordQuality, ChordTone, Key, Mode, Note,
    NoteName, SourceType, VoiceType,
};
use std::f32::consts::PI;

const SAMPLE_RATE: u32 = 44100;

/// Melody of sine tones: each MIDI note sounds for 400 ms followed by 100 ms of silence
fn synth_melody(midis: &[i32], sample_rate: u32) -> Vec<f32> {
    let tone_len = (0.4 * sample_rate as f32) as usize;
    let gap_len = (0.1 * sample_rate as f32) as usize;
    let mut samples = Vec::with_capacity(midis.len() * (tone_len + gap_len));
    for &midi in midis {
        let freq = 440.0 * 2f32.powf((midi - 69) as f32 / 12.0);
        samples.extend((0..tone_len).map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin()));
        samples.extend(std::iter::repeat(0.0).take(gap_len));
    }
    samples
}

/// C major tune with tonic emphasis
const TUNE: [i32; 11] = [60, 62, 64, 65, 67, 69, 71, 72, 64, 67, 60];

fn config_at_120() -> AnalysisConfig {
    AnalysisConfig {
        song_title: "Scale Study".to_string(),
        tempo_override: Some(120.0),
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_analyze_synthetic_melody() {
    let _ = env_logger::builder().is_test(true).try_init();
    let samples = synth_melody(&TUNE, SAMPLE_RATE);
    let result = analyze_audio(&samples, SAMPLE_RATE, &config_at_120())
        .expect("Analysis should succeed");

    assert_eq!(result.song_title, "Scale Study");
    assert_eq!(result.source_type, SourceType::Audio);
    assert_eq!(result.tempo, 120.0);
    assert_eq!(result.key, Key::new(NoteName::C, Mode::Major), "key {}", result.key.label());
    assert!(result.key_confidence > 0.5);

    let pitches: Vec<i32> = result.melody.iter().map(|n| n.note.midi_number()).collect();
    assert_eq!(pitches, TUNE.to_vec(), "melody pitches");
    for (i, note) in result.melody.iter().enumerate() {
        // One note per half second = one per beat at 120 BPM
        assert_eq!(note.note.start_beat(), i as f32, "note {} start", i);
        assert!(note.note.duration() >= 0.25);
        assert!(note.confidence >= 0.8);
    }

    assert!(!result.chords.is_empty(), "audio chords should be recognized");
    assert_eq!(result.harmony_lines.len(), 3);
    for line in &result.harmony_lines {
        assert_eq!(line.notes.len(), result.melody.len(), "line {}", line.id);
    }

    assert!((result.metadata.duration_seconds - 5.5).abs() < 0.01);
    assert_eq!(result.metadata.sample_rate, SAMPLE_RATE);
    assert!(result.metadata.voiced_ratio > 0.5);
    assert!(!result.metadata.flags.contains(&AnalysisFlag::NoVoicedFrames));
}

#[test]
fn test_silent_audio_completes_with_warnings() {
    let samples = vec![0.0f32; SAMPLE_RATE as usize * 2];
    let result = analyze_audio(&samples, SAMPLE_RATE, &AnalysisConfig::default())
        .expect("Silent audio should still be analyzed");

    assert!(result.melody.is_empty());
    assert!(result.chords.is_empty());
    assert_eq!(result.tempo, 120.0);
    assert_eq!(result.key_confidence, 0.0);
    assert!(result.harmony_lines.iter().all(|l| l.notes.is_empty()));
    for flag in [
        AnalysisFlag::NoVoicedFrames,
        AnalysisFlag::TempoDefaulted,
        AnalysisFlag::NoChordsDetected,
        AnalysisFlag::WeakTonality,
    ] {
        assert!(result.metadata.flags.contains(&flag), "missing {:?}", flag);
    }
    assert!(!result.metadata.confidence_warnings.is_empty());
}

#[test]
fn test_invalid_input_rejected() {
    let config = AnalysisConfig::default();
    assert!(matches!(
        analyze_audio(&[], SAMPLE_RATE, &config),
        Err(AnalysisError::InvalidInput(_))
    ));
    assert!(matches!(
        analyze_audio(&[0.1; 1000], 0, &config),
        Err(AnalysisError::InvalidInput(_))
    ));

    let bad = AnalysisConfig {
        tempo_override: Some(-10.0),
        ..AnalysisConfig::default()
    };
    assert!(analyze_audio(&[0.1; 1000], SAMPLE_RATE, &bad).is_err());
    assert!(analyze_pitch_frames(&[], &config).is_err());
    assert!(analyze_notes(&[], None, &config).is_err());
}

#[test]
fn test_analysis_is_idempotent() {
    let samples = synth_melody(&TUNE[..6], SAMPLE_RATE);
    let config = config_at_120();
    let first = analyze_audio(&samples, SAMPLE_RATE, &config).unwrap();
    let second = analyze_audio(&samples, SAMPLE_RATE, &config).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.key, second.key);
    assert_eq!(first.key_confidence, second.key_confidence);
    assert_eq!(first.tempo, second.tempo);
    assert_eq!(first.melody, second.melody);
    assert_eq!(first.chords, second.chords);
    assert_eq!(first.harmony_lines, second.harmony_lines);
}

#[test]
fn test_pitch_frames_tempo_estimate() {
    // Alternating A4 / C5 with onsets every 500 ms, 10 ms frames
    let mut frames = Vec::new();
    for n in 0..8 {
        let freq = if n % 2 == 0 { 440.0 } else { 523.25 };
        for i in 0..40 {
            frames.push(PitchFrame::voiced(freq, 0.95, (n * 50 + i) as f32 * 10.0));
        }
        for i in 40..50 {
            frames.push(PitchFrame::silent((n * 50 + i) as f32 * 10.0));
        }
    }

    let result = analyze_pitch_frames(&frames, &AnalysisConfig::default()).unwrap();
    assert!((result.tempo - 120.0).abs() < 1e-3, "tempo {}", result.tempo);
    assert_eq!(result.melody.len(), 8);
    assert!(result.chords.is_empty());
    assert!(!result.metadata.flags.contains(&AnalysisFlag::TempoDefaulted));

    // Without chords every part uses the fixed-interval fallback
    let above = &result.harmony_lines[0];
    assert_eq!(above.notes[0].midi_number(), 69 + 4);
}

#[test]
fn test_symbolic_song_with_chords() {
    let tune = [60, 64, 67, 72, 71, 74, 65, 60];
    let notes: Vec<Note> = tune
        .iter()
        .enumerate()
        .map(|(i, &m)| Note::from_midi(m, i as f32, 1.0))
        .collect();
    let chords = vec![
        Chord::new(NoteName::C, ChordQuality::Major, 0.0, 4.0),
        Chord::new(NoteName::G, ChordQuality::Dominant7, 4.0, 4.0),
    ];

    let result = analyze_notes(&notes, Some(chords.as_slice()), &AnalysisConfig::default()).unwrap();
    assert_eq!(result.source_type, SourceType::Symbolic);
    assert_eq!(result.key, Key::new(NoteName::C, Mode::Major));
    assert_eq!(result.tempo, 120.0);

    let numerals: Vec<&str> = result.chords.iter().map(|c| c.roman_numeral.as_str()).collect();
    assert_eq!(numerals, vec!["I", "V7"]);

    let melody: Vec<(i32, f32)> = result
        .melody
        .iter()
        .map(|n| (n.note.midi_number(), n.note.start_beat()))
        .collect();
    let expected: Vec<(i32, f32)> = tune.iter().enumerate().map(|(i, &m)| (m, i as f32)).collect();
    assert_eq!(melody, expected);

    let roles: Vec<Option<ChordTone>> = result.melody.iter().map(|n| n.chord_tone).collect();
    assert_eq!(roles[1], Some(ChordTone::Third));
    assert_eq!(roles[4], Some(ChordTone::Third));
    assert_eq!(roles[5], Some(ChordTone::Fifth));
    assert_eq!(roles[6], Some(ChordTone::Seventh));
    assert_eq!(roles[7], Some(ChordTone::NonChord));

    let below = result
        .harmony_lines
        .iter()
        .find(|l| l.id == "harmony-below")
        .expect("harmony below");
    assert_eq!(below.voice_type, VoiceType::Alto);
    for (h, m) in below.notes.iter().zip(result.melody.iter()) {
        assert!(VoiceType::Alto.contains(h.midi_number()));
        assert_eq!(h.start_beat(), m.note.start_beat());
    }
}

#[test]
fn test_decode_wav_and_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("melody.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let samples = synth_melody(&[67, 69, 71, 72], SAMPLE_RATE);
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for &s in &samples {
        writer.write_sample((s * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();

    let decoded = decode_audio(&path).expect("WAV should decode");
    assert_eq!(decoded.sample_rate, SAMPLE_RATE);
    assert_eq!(decoded.samples.len(), samples.len());

    let result = analyze_audio(&decoded.samples, decoded.sample_rate, &config_at_120()).unwrap();
    let pitches: Vec<i32> = result.melody.iter().map(|n| n.note.midi_number()).collect();
    assert_eq!(pitches, vec![67, 69, 71, 72]);
}

#[test]
fn test_result_json_round_trip() {
    let samples = synth_melody(&[64, 62, 60], SAMPLE_RATE);
    let result = analyze_audio(&samples, SAMPLE_RATE, &config_at_120()).unwrap();

    let json = result.to_json().unwrap();
    assert!(json.contains("\"roman_numeral\""));
    assert!(json.contains("\"harmony-above\""));

    let back = AnalysisResult::from_json(&json).unwrap();
    assert_eq!(back.id, result.id);
    assert_eq!(back.melody, result.melody);
    assert_eq!(back.chords, result.chords);
    assert!(AnalysisResult::from_json("{").is_err());
}
