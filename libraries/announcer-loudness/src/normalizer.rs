//! Two-pass loudness normalization of a whole waveform
//!
//! Pass one builds and smooths the RMS envelope and estimates overall
//! loudness; pass two applies per-window gain and the soft limiter.

use std::fmt;

use announcer_core::{CompressionLevel, Waveform};
use tracing::debug;

use crate::envelope::{analyze, smooth, window_size, SmoothedEnvelope};
use crate::estimator::{estimate, is_silent};
use crate::gain_law::{compute_law, GainLawParameters};
use crate::limiter::SoftLimiter;
use crate::processor::process;
use crate::{NOISE_FLOOR, SMOOTHING_RADIUS, TARGET_RMS};

/// Why a waveform was returned unmodified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    /// Waveform has no samples
    Empty,
    /// Overall loudness below the silence threshold
    Silent,
}

impl fmt::Display for PassThroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no samples"),
            Self::Silent => write!(f, "too quiet to normalize"),
        }
    }
}

/// Outcome of normalizing a waveform
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization<'a> {
    /// The input, untouched
    PassThrough {
        waveform: &'a Waveform,
        reason: PassThroughReason,
    },
    /// A newly built, normalized waveform with the input's format
    Processed(Waveform),
}

impl Normalization<'_> {
    /// The resulting waveform, whichever the outcome
    pub fn waveform(&self) -> &Waveform {
        match self {
            Self::PassThrough { waveform, .. } => *waveform,
            Self::Processed(waveform) => waveform,
        }
    }

    /// Take ownership of the result (clones on pass-through)
    pub fn into_owned(self) -> Waveform {
        match self {
            Self::PassThrough { waveform, .. } => waveform.clone(),
            Self::Processed(waveform) => waveform,
        }
    }

    /// True when the input was left as is
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough { .. })
    }
}

/// What normalization measured and would apply to a waveform
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessReport {
    /// Window length in samples
    pub window_size: usize,
    /// Number of analysis windows
    pub window_count: usize,
    /// Overall loudness estimate (mean smoothed RMS above the noise floor)
    pub overall_rms: f32,
    /// Largest absolute sample value
    pub peak: f32,
    /// Gain law, or `None` when the waveform would pass through
    pub law: Option<GainLawParameters>,
}

/// First-pass result shared by normalization and reporting
struct Analysis {
    window_size: usize,
    smoothed: SmoothedEnvelope,
    overall_rms: f32,
}

/// Loudness normalizer with configurable target and limiter
///
/// # Example
///
/// ```ignore
/// use announcer_loudness::LoudnessNormalizer;
///
/// let normalizer = LoudnessNormalizer::new().with_target_rms(0.18);
/// let output = normalizer.normalize(&waveform, level).into_owned();
/// ```
#[derive(Debug, Clone)]
pub struct LoudnessNormalizer {
    /// Overall RMS the base gain aims for
    target_rms: f32,
    /// Windows averaged on each side when smoothing
    smoothing_radius: usize,
    /// Windows at or below this RMS do not count toward loudness
    noise_floor: f32,
    /// Final peak stage
    limiter: SoftLimiter,
}

impl LoudnessNormalizer {
    /// Create a normalizer with the default target (0.22 RMS) and limiter
    pub fn new() -> Self {
        Self {
            target_rms: TARGET_RMS,
            smoothing_radius: SMOOTHING_RADIUS,
            noise_floor: NOISE_FLOOR,
            limiter: SoftLimiter::default(),
        }
    }

    /// Set the target overall RMS
    #[must_use]
    pub fn with_target_rms(mut self, target_rms: f32) -> Self {
        self.target_rms = target_rms;
        self
    }

    /// Set the output limiter
    #[must_use]
    pub fn with_limiter(mut self, limiter: SoftLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Target overall RMS
    pub fn target_rms(&self) -> f32 {
        self.target_rms
    }

    /// Output limiter
    pub fn limiter(&self) -> &SoftLimiter {
        &self.limiter
    }

    fn analyze(&self, waveform: &Waveform) -> Analysis {
        let window_size = window_size(waveform.sample_rate());
        let envelope = analyze(waveform.samples(), window_size);
        let smoothed = smooth(&envelope, self.smoothing_radius);
        let overall_rms = estimate(&smoothed, self.noise_floor);

        Analysis {
            window_size,
            smoothed,
            overall_rms,
        }
    }

    /// Normalize and compress a waveform
    ///
    /// Empty and silent waveforms come back untouched; anything else yields a
    /// new waveform with the same format and sample count.
    pub fn normalize<'a>(
        &self,
        waveform: &'a Waveform,
        level: CompressionLevel,
    ) -> Normalization<'a> {
        if waveform.is_empty() {
            return Normalization::PassThrough {
                waveform,
                reason: PassThroughReason::Empty,
            };
        }

        let analysis = self.analyze(waveform);
        if is_silent(analysis.overall_rms) {
            debug!(
                overall_rms = analysis.overall_rms,
                "Waveform too quiet, passing through"
            );
            return Normalization::PassThrough {
                waveform,
                reason: PassThroughReason::Silent,
            };
        }

        let law = compute_law(analysis.overall_rms, level, self.target_rms);
        debug!(
            windows = analysis.smoothed.len(),
            window_size = analysis.window_size,
            overall_rms = analysis.overall_rms,
            base_gain = law.base_gain,
            ratio = law.compression_ratio,
            threshold = law.compression_threshold,
            "Normalizing waveform"
        );

        let samples = process(
            waveform.samples(),
            &analysis.smoothed,
            &law,
            analysis.window_size,
            level.amount(),
            &self.limiter,
        );

        Normalization::Processed(waveform.with_samples(samples))
    }

    /// Measure a waveform without processing it
    pub fn report(&self, waveform: &Waveform, level: CompressionLevel) -> LoudnessReport {
        let analysis = self.analyze(waveform);
        let peak = waveform
            .samples()
            .iter()
            .map(|s| s.abs())
            .fold(0.0_f32, f32::max);

        let law = (!waveform.is_empty() && !is_silent(analysis.overall_rms))
            .then(|| compute_law(analysis.overall_rms, level, self.target_rms));

        LoudnessReport {
            window_size: analysis.window_size,
            window_count: analysis.smoothed.len(),
            overall_rms: analysis.overall_rms,
            peak,
            law,
        }
    }
}

impl Default for LoudnessNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize with the default target and limiter
pub fn normalize(waveform: &Waveform, level: CompressionLevel) -> Normalization<'_> {
    LoudnessNormalizer::new().normalize(waveform, level)
}

/// Report with the default target and limiter
pub fn analyze_waveform(waveform: &Waveform, level: CompressionLevel) -> LoudnessReport {
    LoudnessNormalizer::new().report(waveform, level)
}
