//! Windowed RMS envelope analysis and smoothing
//!
//! A waveform is cut into contiguous, non-overlapping windows of
//! `sample_rate / 20` samples. Windows are counted in samples, not frames, so
//! for interleaved multi-channel audio each window spans proportionally less
//! time (25 ms for stereo).

use crate::WINDOWS_PER_SECOND;

/// Window length in samples for the given sample rate (never zero)
pub fn window_size(sample_rate: u32) -> usize {
    ((sample_rate / WINDOWS_PER_SECOND) as usize).max(1)
}

/// Per-window RMS values, one per analysis window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope(Vec<f32>);

impl Envelope {
    /// RMS value of each window, in window order
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no samples were analyzed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for Envelope {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Envelope after a symmetric moving average across windows
///
/// Same length as the [`Envelope`] it was built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmoothedEnvelope(Vec<f32>);

impl SmoothedEnvelope {
    /// Smoothed value of each window, in window order
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Smoothed value for a window index, if in range
    pub fn get(&self, window: usize) -> Option<f32> {
        self.0.get(window).copied()
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no windows
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the RMS of every window of `samples`
///
/// The last window may be shorter than `window_size`. Window count is
/// `ceil(samples.len() / window_size)`.
pub fn analyze(samples: &[f32], window_size: usize) -> Envelope {
    Envelope(samples.chunks(window_size.max(1)).map(window_rms).collect())
}

fn window_rms(window: &[f32]) -> f32 {
    // Squares in f32, accumulation in f64
    let sum: f64 = window.iter().map(|&s| f64::from(s * s)).sum();
    (sum / window.len() as f64).sqrt() as f32
}

/// Average every window with up to `radius` neighbours on each side
///
/// Boundary windows average over fewer neighbours; interior windows over
/// `2 * radius + 1`.
pub fn smooth(envelope: &Envelope, radius: usize) -> SmoothedEnvelope {
    let raw = envelope.values();
    let last = raw.len().saturating_sub(1);

    let values = (0..raw.len())
        .map(|w| {
            let span = &raw[w.saturating_sub(radius)..=(w + radius).min(last)];
            span.iter().sum::<f32>() / span.len() as f32
        })
        .collect();

    SmoothedEnvelope(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_is_twentieth_of_rate() {
        assert_eq!(window_size(48_000), 2_400);
        assert_eq!(window_size(44_100), 2_205);
        assert_eq!(window_size(8_000), 400);
    }

    #[test]
    fn window_size_never_zero() {
        assert_eq!(window_size(19), 1);
        assert_eq!(window_size(0), 1);
    }

    #[test]
    fn window_count_rounds_up() {
        let samples = vec![0.5; 10];
        assert_eq!(analyze(&samples, 4).len(), 3);
        assert_eq!(analyze(&samples, 5).len(), 2);
        assert_eq!(analyze(&samples, 100).len(), 1);
    }

    #[test]
    fn empty_input_has_no_windows() {
        assert!(analyze(&[], 4).is_empty());
        assert!(smooth(&Envelope::default(), 7).is_empty());
    }

    #[test]
    fn constant_signal_rms_is_magnitude() {
        let samples = vec![-0.5, 0.5, -0.5, 0.5, -0.5, 0.5];
        let envelope = analyze(&samples, 3);
        for &rms in envelope.values() {
            assert!((rms - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn short_last_window_uses_its_own_length() {
        // Last window is [0.3] alone
        let samples = vec![0.0, 0.0, 0.3];
        let envelope = analyze(&samples, 2);
        assert_eq!(envelope.values()[0], 0.0);
        assert!((envelope.values()[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn smoothing_uses_variable_width_at_edges() {
        let envelope = Envelope::from(vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        let smoothed = smooth(&envelope, 1);

        // Window 0 averages [0, 1]; window 1 averages [0, 2]; window 4 averages [3, 4]
        assert!((smoothed.values()[0] - 0.5).abs() < 1e-6);
        assert!((smoothed.values()[1] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(smoothed.values()[4], 0.0);
    }

    #[test]
    fn smoothing_interior_is_fifteen_wide() {
        let mut raw = vec![0.0; 31];
        raw[15] = 15.0;
        let smoothed = smooth(&Envelope::from(raw), 7);

        // Every window within 7 of the spike sees it once among 15 values
        for w in 8..=22 {
            assert!((smoothed.values()[w] - 1.0).abs() < 1e-5, "window {w}");
        }
        assert_eq!(smoothed.values()[7], 0.0);
        assert_eq!(smoothed.values()[23], 0.0);
    }

    #[test]
    fn smoothing_preserves_length() {
        let envelope = Envelope::from(vec![0.1; 3]);
        assert_eq!(smooth(&envelope, 7).len(), 3);
        assert_eq!(smooth(&envelope, 0).values(), envelope.values());
    }
}
