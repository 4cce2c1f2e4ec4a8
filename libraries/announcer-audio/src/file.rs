//! File-level normalization
//!
//! Normalized audio is written to a freshly named `normalized_<uuid>.wav`
//! so the source is never touched. Callers that prefer a usable path over an
//! error use [`normalize_or_original`], which falls back to the source file.

use crate::decoder::SymphoniaDecoder;
use crate::encoder::WavEncoder;
use announcer_core::{CompressionLevel, Result};
use announcer_loudness::{NormalizationPipeline, PassThroughReason, PipelineOutcome};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Result of normalizing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedFile {
    /// Normalized audio written to a new file
    Processed(PathBuf),
    /// Source left as is; use it directly
    PassThrough {
        source: PathBuf,
        reason: PassThroughReason,
    },
}

impl NormalizedFile {
    /// Path to use for playback or packaging
    pub fn path(&self) -> &Path {
        match self {
            Self::Processed(path) => path,
            Self::PassThrough { source, .. } => source,
        }
    }

    /// Take the path to use
    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Processed(path) => path,
            Self::PassThrough { source, .. } => source,
        }
    }

    /// True when a new file was written
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed(_))
    }
}

/// Fresh destination path inside `dir`
pub fn normalized_destination(dir: &Path) -> PathBuf {
    dir.join(format!("normalized_{}.wav", Uuid::new_v4()))
}

/// Normalize `source` into a new file in the system temp directory
pub fn normalize_file(source: &Path, level: CompressionLevel) -> Result<NormalizedFile> {
    normalize_file_to(source, &std::env::temp_dir(), level)
}

/// Normalize `source` into a new file inside `dir`
///
/// # Errors
/// Decode errors for unreadable sources, encode errors for unwritable
/// destinations. Silent and empty sources are not errors.
pub fn normalize_file_to(
    source: &Path,
    dir: &Path,
    level: CompressionLevel,
) -> Result<NormalizedFile> {
    let destination = normalized_destination(dir);
    let mut pipeline = NormalizationPipeline::new(SymphoniaDecoder::new(), WavEncoder::new());

    Ok(match pipeline.run(source, &destination, level)? {
        PipelineOutcome::Written(path) => NormalizedFile::Processed(path),
        PipelineOutcome::PassThrough(reason) => NormalizedFile::PassThrough {
            source: source.to_path_buf(),
            reason,
        },
    })
}

/// Normalize into the temp directory, falling back to `source` on any error
pub fn normalize_or_original(source: &Path, level: CompressionLevel) -> PathBuf {
    normalize_or_original_to(source, &std::env::temp_dir(), level)
}

/// Normalize into `dir`, falling back to `source` on any error
pub fn normalize_or_original_to(source: &Path, dir: &Path, level: CompressionLevel) -> PathBuf {
    match normalize_file_to(source, dir, level) {
        Ok(normalized) => normalized.into_path(),
        Err(e) => {
            warn!(
                source = %source.display(),
                error = %e,
                "Normalization failed, using original file"
            );
            source.to_path_buf()
        }
    }
}
