//! Audio I/O modules
//!
//! File decoding using Symphonia and the rolling sample buffer used for live
//! pitch tracking.

pub mod decoder;
pub mod sample_buffer;

pub use decoder::{decode_audio, DecodedAudio};
pub use sample_buffer::SampleBuffer;
