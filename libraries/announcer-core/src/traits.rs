//! Collaborator traits for Announcer Studio

use crate::error::Result;
use crate::types::Waveform;
use std::path::Path;

/// Audio decoder trait
///
/// Implementers decode audio files into a [`Waveform`] of interleaved `f32`
/// samples, keeping the source sample rate and channel count.
pub trait WaveformDecoder: Send {
    /// Decode an audio file from the given path (loads entire file)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or decoded
    fn decode(&mut self, path: &Path) -> Result<Waveform>;

    /// Check if the decoder supports the given file format
    fn supports_format(&self, path: &Path) -> bool;
}

/// Audio encoder trait
///
/// Implementers write a [`Waveform`] to a playable file. The destination does
/// not need to exist beforehand.
pub trait WaveformEncoder: Send {
    /// Encode the waveform to `destination`
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn encode(&mut self, waveform: &Waveform, destination: &Path) -> Result<()>;
}
