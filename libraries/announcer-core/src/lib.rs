//! Announcer Studio Core
//!
//! Codec-agnostic types, traits, and error handling shared by the
//! Announcer Studio audio crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Waveform`, `WaveFormat`, `SampleRate`, `CompressionLevel`
//! - **Collaborator Traits**: `WaveformDecoder`, `WaveformEncoder`
//! - **Error Handling**: Unified `AnnouncerError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use announcer_core::{CompressionLevel, SampleRate, WaveFormat, Waveform};
//!
//! let format = WaveFormat::new(SampleRate::new(48_000), 2);
//! let waveform = Waveform::new(vec![0.0; 96_000], format).unwrap();
//! assert_eq!(waveform.frames(), 48_000);
//!
//! // Out-of-range levels are clamped
//! assert_eq!(CompressionLevel::new(250).value(), 100);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AnnouncerError, Result};
pub use traits::{WaveformDecoder, WaveformEncoder};
pub use types::{CompressionLevel, SampleRate, WaveFormat, Waveform};
