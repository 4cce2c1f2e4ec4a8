//! Waveform-related types

use crate::error::{AnnouncerError, Result};
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// CD audio, 44.1 kHz
    pub const CD_QUALITY: Self = Self(44_100);
    /// DVD and video audio, 48 kHz
    pub const DVD_QUALITY: Self = Self(48_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

impl From<u32> for SampleRate {
    fn from(hz: u32) -> Self {
        Self(hz)
    }
}

/// Waveform format information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveFormat {
    /// Sample rate
    pub sample_rate: SampleRate,

    /// Number of channels (1 = mono, 2 = stereo, etc.)
    pub channels: u16,
}

impl WaveFormat {
    /// Create a new waveform format
    pub fn new(sample_rate: SampleRate, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Mono format at the given rate
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(SampleRate::new(sample_rate), 1)
    }

    /// Stereo format at the given rate
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(SampleRate::new(sample_rate), 2)
    }

    /// Check that rate and channel count are both positive
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate.as_hz() == 0 {
            return Err(AnnouncerError::invalid_format("sample rate must be positive"));
        }
        if self.channels == 0 {
            return Err(AnnouncerError::invalid_format("channel count must be positive"));
        }
        Ok(())
    }
}

/// Decoded audio held entirely in memory
///
/// Samples are stored as f32 in the range of roughly [-1.0, 1.0].
/// Interleaved format: [L, R, L, R, ...] for stereo.
///
/// A waveform is never modified in place; processing produces a new one
/// with the same format.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    format: WaveFormat,
}

impl Waveform {
    /// Create a new waveform
    ///
    /// # Errors
    /// Returns `InvalidFormat` if the sample rate or channel count is zero
    pub fn new(samples: Vec<f32>, format: WaveFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self { samples, format })
    }

    /// Create a waveform with no samples
    pub fn empty(format: WaveFormat) -> Result<Self> {
        Self::new(Vec::new(), format)
    }

    /// Build a new waveform with the same format as `self`
    #[must_use]
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            format: self.format,
        }
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the waveform, returning its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Format of the waveform
    pub fn format(&self) -> WaveFormat {
        self.format
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate.as_hz()
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.format.sample_rate.as_hz() as f64
    }

    /// Check if the waveform is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the length in samples (all channels)
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rate_common_values() {
        assert_eq!(SampleRate::CD_QUALITY.as_hz(), 44_100);
        assert_eq!(SampleRate::DVD_QUALITY.as_hz(), 48_000);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let result = Waveform::new(vec![0.0; 4], WaveFormat::mono(0));
        assert!(matches!(result, Err(AnnouncerError::InvalidFormat(_))));
    }

    #[test]
    fn rejects_zero_channels() {
        let format = WaveFormat::new(SampleRate::CD_QUALITY, 0);
        assert!(Waveform::new(vec![0.0; 4], format).is_err());
    }

    #[test]
    fn frames_calculation() {
        // 8 samples with 2 channels = 4 frames
        let waveform = Waveform::new(vec![0.0; 8], WaveFormat::stereo(44_100)).unwrap();
        assert_eq!(waveform.frames(), 4);
        assert_eq!(waveform.len(), 8);
    }

    #[test]
    fn duration_calculation() {
        // 96000 samples with 2 channels = 48000 frames = 1 second
        let waveform = Waveform::new(vec![0.0; 96_000], WaveFormat::stereo(48_000)).unwrap();
        assert!((waveform.duration_secs() - 1.0).abs() < 0.01);
    }

    #[test]
    fn with_samples_keeps_format() {
        let original = Waveform::new(vec![0.1, 0.2], WaveFormat::stereo(22_050)).unwrap();
        let derived = original.with_samples(vec![0.3, 0.4]);
        assert_eq!(derived.format(), original.format());
        assert_eq!(original.samples(), &[0.1, 0.2]);
    }

    #[test]
    fn empty_waveform() {
        let waveform = Waveform::empty(WaveFormat::mono(8_000)).unwrap();
        assert!(waveform.is_empty());
        assert_eq!(waveform.frames(), 0);
    }
}
