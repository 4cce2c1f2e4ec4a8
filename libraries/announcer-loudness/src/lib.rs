//! Loudness normalization and dynamic-range compression for Announcer Studio
//!
//! This crate provides:
//! - Windowed RMS envelope analysis (~50 ms windows)
//! - Moving-average envelope smoothing
//! - Overall loudness estimation that ignores near-silent windows
//! - A gain law driven by a single compression level knob
//! - Feed-forward per-sample gain with a soft-knee limiter
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐     ┌───────────────┐
//! │  Waveform   │ ──► │  Envelope    │ ──► │   Smoother    │ ──► │   Estimator   │
//! └─────────────┘     └──────────────┘     └───────────────┘     └───────────────┘
//!                                                  │                     │
//!                                                  ▼                     ▼
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐     ┌───────────────┐
//! │  Waveform   │ ◄── │ Soft Limiter │ ◄── │   Processor   │ ◄── │   Gain Law    │
//! └─────────────┘     └──────────────┘     └───────────────┘     └───────────────┘
//! ```
//!
//! Empty input and clips whose overall loudness is below [`SILENCE_THRESHOLD`]
//! pass through untouched.
//!
//! # Example
//!
//! ```ignore
//! use announcer_core::{CompressionLevel, WaveFormat, Waveform};
//! use announcer_loudness::{normalize, Normalization};
//!
//! let waveform = Waveform::new(samples, WaveFormat::mono(48_000))?;
//!
//! match normalize(&waveform, CompressionLevel::new(50)) {
//!     Normalization::Processed(output) => println!("{} samples normalized", output.len()),
//!     Normalization::PassThrough { reason, .. } => println!("left as is: {reason}"),
//! }
//! ```

#![deny(unsafe_code)]

mod envelope;
mod estimator;
mod gain_law;
mod limiter;
mod normalizer;
mod pipeline;
mod processor;

pub use envelope::{analyze, smooth, window_size, Envelope, SmoothedEnvelope};
pub use estimator::{estimate, is_silent};
pub use gain_law::{compute_law, GainLawParameters};
pub use limiter::{soft_limit, SoftLimiter};
pub use normalizer::{
    analyze_waveform, normalize, LoudnessNormalizer, LoudnessReport, Normalization,
    PassThroughReason,
};
pub use pipeline::{NormalizationPipeline, PipelineOutcome};
pub use processor::{dynamic_gain, process};

/// Analysis windows per second of sample count (50 ms windows for mono)
pub const WINDOWS_PER_SECOND: u32 = 20;

/// Neighbouring windows averaged on each side when smoothing the envelope
pub const SMOOTHING_RADIUS: usize = 7;

/// Smoothed window RMS at or below this level is left out of the loudness estimate
pub const NOISE_FLOOR: f32 = 0.01;

/// Overall RMS below this level is treated as silence and passed through
pub const SILENCE_THRESHOLD: f32 = 0.005;

/// Overall RMS the base gain aims for
pub const TARGET_RMS: f32 = 0.22;

/// Lower clamp for the base gain (-12 dB)
pub const MIN_BASE_GAIN: f32 = 0.25;

/// Upper clamp for the base gain (+12 dB)
pub const MAX_BASE_GAIN: f32 = 4.0;

/// Limiter passes samples through unchanged up to this magnitude
pub const KNEE_START: f32 = 0.8;

/// Limiter output never exceeds this magnitude
pub const CEILING: f32 = 0.95;
