//! Announcer Studio Audio
//!
//! Audio file decoding, WAV encoding and file-level normalization.
//!
//! This crate provides:
//! - Audio decoding via Symphonia (WAV, MP3, FLAC, OGG), keeping the source
//!   sample rate and channel layout
//! - 32-bit float WAV encoding via hound
//! - `normalize_file`: decode → normalize → encode into a new temp file
//! - `normalize_or_original`: the same, falling back to the source on error
//!
//! # Example
//!
//! ```rust,no_run
//! use announcer_audio::normalize_or_original;
//! use announcer_core::CompressionLevel;
//! use std::path::Path;
//!
//! let path = normalize_or_original(Path::new("sounds/AgentDie.wav"), CompressionLevel::new(50));
//! println!("Use {}", path.display());
//! ```

mod decoder;
mod encoder;
mod error;
mod file;

pub use decoder::SymphoniaDecoder;
pub use encoder::WavEncoder;
pub use error::{AudioError, Result};
pub use file::{
    normalize_file, normalize_file_to, normalize_or_original, normalize_or_original_to,
    normalized_destination, NormalizedFile,
};
