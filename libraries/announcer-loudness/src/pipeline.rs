//! Decode → normalize → encode orchestration
//!
//! Decode failures stop the pipeline before any analysis runs. Processed
//! output always goes to a separate destination; the source file is never
//! written.

use std::path::{Path, PathBuf};

use announcer_core::{AnnouncerError, CompressionLevel, Result, WaveformDecoder, WaveformEncoder};
use tracing::{debug, info};

use crate::normalizer::{LoudnessNormalizer, Normalization, PassThroughReason};

/// Result of running the pipeline on one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Normalized audio was written to this path
    Written(PathBuf),
    /// Nothing was written; the source should be used as is
    PassThrough(PassThroughReason),
}

/// Normalization pipeline over pluggable codec collaborators
pub struct NormalizationPipeline<D, E> {
    decoder: D,
    encoder: E,
    normalizer: LoudnessNormalizer,
}

impl<D: WaveformDecoder, E: WaveformEncoder> NormalizationPipeline<D, E> {
    /// Create a pipeline with the default normalizer
    pub fn new(decoder: D, encoder: E) -> Self {
        Self {
            decoder,
            encoder,
            normalizer: LoudnessNormalizer::new(),
        }
    }

    /// Replace the normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: LoudnessNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The decoder collaborator
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// The encoder collaborator
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Normalize `source` into `destination`
    ///
    /// # Errors
    /// - Decode errors from the decoder, before any processing
    /// - Encode errors from the encoder
    /// - `Encode` if `destination` refers to `source`
    pub fn run(
        &mut self,
        source: &Path,
        destination: &Path,
        level: CompressionLevel,
    ) -> Result<PipelineOutcome> {
        if is_same_path(source, destination) {
            return Err(AnnouncerError::encode(format!(
                "destination would overwrite source: {}",
                source.display()
            )));
        }

        let waveform = self.decoder.decode(source)?;
        debug!(
            source = %source.display(),
            samples = waveform.len(),
            sample_rate = waveform.sample_rate(),
            channels = waveform.channels(),
            "Decoded source"
        );

        match self.normalizer.normalize(&waveform, level) {
            Normalization::PassThrough { reason, .. } => {
                debug!(source = %source.display(), %reason, "Source passed through");
                Ok(PipelineOutcome::PassThrough(reason))
            }
            Normalization::Processed(output) => {
                self.encoder.encode(&output, destination)?;
                info!(
                    source = %source.display(),
                    destination = %destination.display(),
                    %level,
                    "Wrote normalized audio"
                );
                Ok(PipelineOutcome::Written(destination.to_path_buf()))
            }
        }
    }
}

fn is_same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    matches!((a.canonicalize(), b.canonicalize()), (Ok(a), Ok(b)) if a == b)
}
