//! Gain law: base gain and compressor settings from loudness and level

use announcer_core::CompressionLevel;

use crate::{MAX_BASE_GAIN, MIN_BASE_GAIN};

/// Extra compression ratio reached at level 100 (ratio goes 1:1 to 6:1)
const RATIO_SPAN: f32 = 5.0;

/// Fraction of the target level the threshold drops by at level 100
const THRESHOLD_DROP: f32 = 0.5;

/// Parameters derived once per clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainLawParameters {
    /// Gain bringing the clip to the target RMS, in [0.25, 4.0]
    pub base_gain: f32,

    /// Compression ratio, in [1.0, 6.0]
    pub compression_ratio: f32,

    /// Level above which windows are compressed (linear)
    pub compression_threshold: f32,
}

/// Derive the gain law for a clip
///
/// - Level 0: pure normalization (ratio 1:1, threshold at `target_rms`)
/// - Level 100: ratio 6:1, threshold at half of `target_rms`
pub fn compute_law(
    overall_rms: f32,
    level: CompressionLevel,
    target_rms: f32,
) -> GainLawParameters {
    let amount = level.amount();

    GainLawParameters {
        base_gain: (target_rms / overall_rms).clamp(MIN_BASE_GAIN, MAX_BASE_GAIN),
        compression_ratio: 1.0 + RATIO_SPAN * amount,
        compression_threshold: target_rms * (1.0 - THRESHOLD_DROP * amount),
    }
}
