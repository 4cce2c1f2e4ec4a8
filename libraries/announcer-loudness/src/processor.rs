//! Per-sample gain application
//!
//! Feed-forward compressor: each sample's gain comes from its window's
//! smoothed RMS and the clip-wide gain law, never from previous output.

use crate::envelope::SmoothedEnvelope;
use crate::gain_law::GainLawParameters;
use crate::limiter::SoftLimiter;

/// Compression amount at or below which the dynamic branch is skipped
const COMPRESSION_ENGAGE: f32 = 0.01;

/// Smoothed RMS at or below which a window is never compressed
const LOCAL_RMS_FLOOR: f32 = 0.01;

/// Gain for a window with the given smoothed RMS
///
/// Starts from the base gain. When compression is engaged and the window's
/// level after base gain exceeds the threshold, the excess is divided by the
/// ratio and the gain reduced to land on the compressed level.
pub fn dynamic_gain(local_rms: f32, law: &GainLawParameters, compression_amount: f32) -> f32 {
    if compression_amount <= COMPRESSION_ENGAGE || local_rms <= LOCAL_RMS_FLOOR {
        return law.base_gain;
    }

    let local_level = local_rms * law.base_gain;
    if local_level <= law.compression_threshold {
        return law.base_gain;
    }

    let excess = local_level - law.compression_threshold;
    let target_level = law.compression_threshold + excess / law.compression_ratio;
    law.base_gain * (target_level / local_level)
}

/// Apply dynamic gain and soft limiting to every sample
///
/// Sample `i` belongs to window `min(i / window_size, windows - 1)`. The output
/// has exactly as many samples as the input.
pub fn process(
    samples: &[f32],
    smoothed: &SmoothedEnvelope,
    law: &GainLawParameters,
    window_size: usize,
    compression_amount: f32,
    limiter: &SoftLimiter,
) -> Vec<f32> {
    let window_size = window_size.max(1);
    let last_window = smoothed.len().saturating_sub(1);

    // Gain is constant within a window
    let gains: Vec<f32> = smoothed
        .values()
        .iter()
        .map(|&local_rms| dynamic_gain(local_rms, law, compression_amount))
        .collect();

    samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let gain = gains
                .get((i / window_size).min(last_window))
                .copied()
                .unwrap_or(law.base_gain);
            limiter.limit(sample * gain)
        })
        .collect()
}
