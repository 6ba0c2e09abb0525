//! Audio preprocessing modules
//!
//! This module contains utilities for preparing audio for analysis:
//! - Channel mixing (multi-channel to mono)
//! - Frame slicing and Hann windowing

pub mod channel_mixer;
pub mod framing;
