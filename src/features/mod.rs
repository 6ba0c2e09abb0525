//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Pitch detection (McLeod Pitch Method, offline and realtime)
//! - Chroma extraction
//! - Chord recognition (template matching)
//! - Key detection (Krumhansl-Schmuckler)
//! - Melody extraction, quantization and tempo estimation

pub mod chords;
pub mod chroma;
pub mod key;
pub mod melody;
pub mod pitch;
