/// Codec-specific errors
use announcer_core::AnnouncerError;
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio codec error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Symphonia error
    #[error("Symphonia error: {0}")]
    Symphonia(String),

    /// WAV writer error
    #[error("WAV write error: {0}")]
    Hound(String),

    /// I/O error while reading the source
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        Self::Hound(err.to_string())
    }
}

impl From<AudioError> for AnnouncerError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::FileNotFound(path) => AnnouncerError::FileNotFound(path),
            AudioError::UnsupportedFormat(msg) => AnnouncerError::UnsupportedFormat(msg),
            AudioError::DecodeError(msg) | AudioError::Symphonia(msg) => {
                AnnouncerError::Decode(msg)
            }
            AudioError::Hound(msg) => AnnouncerError::Encode(msg),
            AudioError::Io(e) => AnnouncerError::Decode(e.to_string()),
        }
    }
}
