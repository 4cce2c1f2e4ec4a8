//! Overall loudness estimate from a smoothed envelope

use crate::envelope::SmoothedEnvelope;
use crate::SILENCE_THRESHOLD;

/// Mean of the smoothed window values strictly above `noise_floor`
///
/// Returns 0.0 when no window qualifies, so leading and trailing silence does
/// not drag the estimate down.
pub fn estimate(smoothed: &SmoothedEnvelope, noise_floor: f32) -> f32 {
    let (sum, count) = smoothed
        .values()
        .iter()
        .filter(|&&rms| rms > noise_floor)
        .fold((0.0_f32, 0_usize), |(sum, count), &rms| (sum + rms, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

/// Whether a clip with this overall RMS is too quiet to normalize
///
/// Non-finite estimates are treated as silent.
pub fn is_silent(overall_rms: f32) -> bool {
    !overall_rms.is_finite() || overall_rms < SILENCE_THRESHOLD
}
