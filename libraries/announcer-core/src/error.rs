//! Core error types for Announcer Studio

use thiserror::Error;

/// Result type alias using `AnnouncerError`
pub type Result<T> = std::result::Result<T, AnnouncerError>;

/// Core error type for Announcer Studio
#[derive(Error, Debug)]
pub enum AnnouncerError {
    /// Source file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File extension or container is not handled by the decoder
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Source could not be parsed as audio
    #[error("Decode error: {0}")]
    Decode(String),

    /// Destination could not be written
    #[error("Encode error: {0}")]
    Encode(String),

    /// Waveform format violates its invariants (zero rate or channels)
    #[error("Invalid waveform format: {0}")]
    InvalidFormat(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AnnouncerError {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the source could not be read as audio.
    ///
    /// Missing files and unsupported containers count as decode failures.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::Decode(_)
        )
    }

    /// Whether the destination could not be written
    pub fn is_encode_failure(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}
