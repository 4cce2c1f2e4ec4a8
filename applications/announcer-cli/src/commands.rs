//! Command implementations
//!
//! Each command returns plain data; printing is left to the binary.

use crate::settings::Settings;
use announcer_audio::{normalize_file_to, NormalizedFile, SymphoniaDecoder};
use announcer_core::{CompressionLevel, Result, WaveFormat, WaveformDecoder};
use announcer_loudness::{analyze_waveform, LoudnessReport, PassThroughReason};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeStatus {
    /// A normalized copy was written
    Normalized,
    /// The source was left as is
    PassThrough(PassThroughReason),
    /// Normalization is turned off in the settings
    Disabled,
    /// Normalization failed; the source is used instead
    Failed(String),
}

impl fmt::Display for NormalizeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normalized => write!(f, "normalized"),
            Self::PassThrough(reason) => write!(f, "unchanged ({reason})"),
            Self::Disabled => write!(f, "unchanged (normalization disabled)"),
            Self::Failed(error) => write!(f, "failed, using original ({error})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    pub input: PathBuf,
    /// Path to use from now on
    pub output: PathBuf,
    pub status: NormalizeStatus,
}

/// Overrides from the command line, applied on top of the settings
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub level: Option<CompressionLevel>,
    pub out_dir: Option<PathBuf>,
}

/// Normalize each input, falling back to the original path per file
pub fn normalize(
    inputs: &[PathBuf],
    settings: &Settings,
    options: &NormalizeOptions,
) -> Vec<NormalizeReport> {
    let level = options.level.unwrap_or(settings.compression_level);
    let out_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir());

    inputs
        .iter()
        .map(|input| {
            if !settings.normalize_audio {
                return NormalizeReport {
                    input: input.clone(),
                    output: input.clone(),
                    status: NormalizeStatus::Disabled,
                };
            }
            normalize_one(input, &out_dir, level)
        })
        .collect()
}

fn normalize_one(input: &Path, out_dir: &Path, level: CompressionLevel) -> NormalizeReport {
    let (output, status) = match normalize_file_to(input, out_dir, level) {
        Ok(NormalizedFile::Processed(path)) => {
            info!(input = %input.display(), output = %path.display(), "Normalized");
            (path, NormalizeStatus::Normalized)
        }
        Ok(NormalizedFile::PassThrough { source, reason }) => {
            info!(input = %input.display(), %reason, "Left unchanged");
            (source, NormalizeStatus::PassThrough(reason))
        }
        Err(e) => {
            warn!(input = %input.display(), error = %e, "Normalization failed, using original file");
            (input.to_path_buf(), NormalizeStatus::Failed(e.to_string()))
        }
    };

    NormalizeReport {
        input: input.to_path_buf(),
        output,
        status,
    }
}

/// Loudness measurements for one file
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub path: PathBuf,
    pub format: WaveFormat,
    pub frames: usize,
    pub duration_secs: f64,
    pub level: CompressionLevel,
    pub report: LoudnessReport,
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File:          {}", self.path.display())?;
        writeln!(
            f,
            "Format:        {} Hz, {} channel(s), {} frames ({:.2} s)",
            self.format.sample_rate.as_hz(),
            self.format.channels,
            self.frames,
            self.duration_secs
        )?;
        writeln!(
            f,
            "Windows:       {} x {} samples",
            self.report.window_count, self.report.window_size
        )?;
        writeln!(f, "Overall RMS:   {:.4}", self.report.overall_rms)?;
        writeln!(f, "Peak:          {:.4}", self.report.peak)?;
        match &self.report.law {
            Some(law) => {
                writeln!(f, "Compression:   {}", self.level)?;
                writeln!(f, "Base gain:     {:.3}", law.base_gain)?;
                writeln!(f, "Ratio:         {:.2}:1", law.compression_ratio)?;
                write!(f, "Threshold:     {:.4}", law.compression_threshold)
            }
            None => write!(f, "Result:        would pass through unchanged"),
        }
    }
}

/// Decode `path` and measure it at `level`
pub fn analyze(path: &Path, level: CompressionLevel) -> Result<AnalysisSummary> {
    let waveform = SymphoniaDecoder::new().decode(path)?;
    let report = analyze_waveform(&waveform, level);

    Ok(AnalysisSummary {
        path: path.to_path_buf(),
        format: waveform.format(),
        frames: waveform.frames(),
        duration_secs: waveform.duration_secs(),
        level,
        report,
    })
}

/// Changes requested by `settings set`
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub level: Option<CompressionLevel>,
    pub normalize: Option<bool>,
    pub out_dir: Option<PathBuf>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.normalize.is_none() && self.out_dir.is_none()
    }

    /// Apply the update to the settings stored in `path` and save them back
    ///
    /// Environment overrides are not part of the stored settings, so they are
    /// left out of the saved file.
    pub fn save_to(&self, path: &Path) -> Result<Settings> {
        let stored = Settings::load_file(path)?;
        self.apply(stored, path)
    }

    /// Apply the update and save to `path`
    pub fn apply(&self, mut settings: Settings, path: &Path) -> Result<Settings> {
        if let Some(level) = self.level {
            settings.compression_level = level;
        }
        if let Some(normalize) = self.normalize {
            settings.normalize_audio = normalize;
        }
        if let Some(out_dir) = &self.out_dir {
            settings.output_dir = Some(out_dir.clone());
        }

        settings.save(path)?;
        info!(path = %path.display(), "Settings saved");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn disabled_normalization_keeps_originals() {
        let settings = Settings {
            normalize_audio: false,
            ..Settings::default()
        };
        let inputs = vec![PathBuf::from("a.wav"), PathBuf::from("b.mp3")];

        let reports = normalize(&inputs, &settings, &NormalizeOptions::default());

        assert_eq!(reports.len(), 2);
        for (report, input) in reports.iter().zip(&inputs) {
            assert_eq!(&report.output, input);
            assert_eq!(report.status, NormalizeStatus::Disabled);
        }
    }

    #[test]
    fn missing_input_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.wav");
        let options = NormalizeOptions {
            level: None,
            out_dir: Some(temp_dir.path().to_path_buf()),
        };

        let reports = normalize(&[input.clone()], &Settings::default(), &options);

        assert_eq!(reports[0].output, input);
        assert!(matches!(reports[0].status, NormalizeStatus::Failed(_)));
    }

    #[test]
    fn analyze_missing_file_is_decode_failure() {
        let err = analyze(Path::new("/nope/missing.wav"), CompressionLevel::default()).unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn settings_update_applies_and_saves() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let update = SettingsUpdate {
            level: Some(CompressionLevel::new(90)),
            normalize: Some(false),
            out_dir: None,
        };
        assert!(!update.is_empty());

        let saved = update.apply(Settings::default(), &path).unwrap();
        assert_eq!(saved.compression_level.value(), 90);
        assert!(!saved.normalize_audio);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["compression_level"], 90);
        assert_eq!(json["normalize_audio"], false);
    }

    #[test]
    fn settings_update_keeps_environment_out_of_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        Settings {
            compression_level: CompressionLevel::new(10),
            ..Settings::default()
        }
        .save(&path)
        .unwrap();

        std::env::set_var("ANNOUNCER_COMPRESSION_LEVEL", "80");
        let effective = Settings::load(&path);
        let update = SettingsUpdate {
            normalize: Some(false),
            ..SettingsUpdate::default()
        };
        let saved = update.save_to(&path);
        std::env::remove_var("ANNOUNCER_COMPRESSION_LEVEL");

        // Override is live for reads
        assert_eq!(effective.unwrap().compression_level.value(), 80);

        let saved = saved.unwrap();
        assert_eq!(saved.compression_level.value(), 10);
        assert!(!saved.normalize_audio);

        let stored = Settings::load_file(&path).unwrap();
        assert_eq!(stored.compression_level.value(), 10);
        assert!(!stored.normalize_audio);
    }

    #[test]
    fn status_messages() {
        assert_eq!(NormalizeStatus::Normalized.to_string(), "normalized");
        assert_eq!(
            NormalizeStatus::PassThrough(PassThroughReason::Silent).to_string(),
            format!("unchanged ({})", PassThroughReason::Silent)
        );
    }
}
