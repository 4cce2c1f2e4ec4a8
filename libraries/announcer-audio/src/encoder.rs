/// WAV encoder using hound
use crate::error::Result;
use announcer_core::{Waveform, WaveformEncoder};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;
use tracing::debug;

/// Writes waveforms as 32-bit IEEE float WAV files
///
/// Sample rate and channel count are taken from the waveform. The
/// destination is created (or truncated); its parent directory is created
/// when missing. A failed write removes the partial file.
#[derive(Debug, Default, Clone, Copy)]
pub struct WavEncoder;

impl WavEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self
    }

    /// WAV header for a waveform
    pub fn spec_for(waveform: &Waveform) -> WavSpec {
        WavSpec {
            channels: waveform.channels(),
            sample_rate: waveform.sample_rate(),
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }

    fn write_file(waveform: &Waveform, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = WavWriter::create(destination, Self::spec_for(waveform))?;
        for &sample in waveform.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        debug!(
            destination = %destination.display(),
            samples = waveform.len(),
            "Wrote WAV file"
        );
        Ok(())
    }
}

impl WaveformEncoder for WavEncoder {
    fn encode(&mut self, waveform: &Waveform, destination: &Path) -> announcer_core::Result<()> {
        Self::write_file(waveform, destination).map_err(|e| {
            let _ = std::fs::remove_file(destination);
            announcer_core::AnnouncerError::encode(format!("{}: {}", destination.display(), e))
        })
    }
}
