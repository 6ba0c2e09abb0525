//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia supports into mono `f32` PCM, the
//! only input shape the analysis core accepts.

use crate::error::AnalysisError;
use crate::preprocessing::channel_mixer::{downmix_interleaved, ChannelMixMode};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer as DecodeBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded mono audio
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source before downmixing
    pub source_channels: usize,
}

impl DecodedAudio {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file (WAV, FLAC, MP3, OGG, AAC, ...)
///
/// # Returns
///
/// Decoded mono audio with its sample rate
///
/// # Errors
///
/// Returns `AnalysisError::DecodingError` if the file cannot be opened, has no
/// audio track, or a packet fails to decode fatally
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, AnalysisError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported format: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
        AnalysisError::DecodingError("Audio track has no sample rate".to_string())
    })?;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::DecodingError(format!("Unsupported codec: {}", e)))?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut channels = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Failed to read packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels = spec.channels.count();
                let mut buffer = DecodeBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping undecodable packet: {}", e);
            }
            Err(e) => {
                return Err(AnalysisError::DecodingError(format!(
                    "Failed to decode packet: {}",
                    e
                )))
            }
        }
    }

    if channels == 0 {
        return Err(AnalysisError::DecodingError(
            "No audio frames decoded".to_string(),
        ));
    }

    let samples = downmix_interleaved(&interleaved, channels, ChannelMixMode::Average)?;

    log::debug!(
        "Decoded {} mono samples at {} Hz from {} channel(s)",
        samples.len(),
        sample_rate,
        channels
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        source_channels: channels,
    })
}
