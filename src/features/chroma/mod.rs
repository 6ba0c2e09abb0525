//! Chroma extraction modules
//!
//! Extract pitch-class distribution (12 semitones) from audio:
//! - Per-frame chroma from single-bin DFT sums (no full FFT)
//! - Max normalization

pub mod extractor;
pub mod normalization;

pub use extractor::{chroma_from_frame, extract_chroma, ChromaVector};
pub use normalization::normalize_max;
