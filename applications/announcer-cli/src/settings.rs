/// Persistent user settings
use announcer_core::{AnnouncerError, CompressionLevel, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file used when `--settings` is not given
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Prefix for environment overrides, e.g. `ANNOUNCER_COMPRESSION_LEVEL=80`
const ENV_PREFIX: &str = "ANNOUNCER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Normalize sounds before they are assigned
    #[serde(default = "default_normalize_audio")]
    pub normalize_audio: bool,

    /// Dynamic compression amount, 0..=100
    #[serde(default)]
    pub compression_level: CompressionLevel,

    /// Where normalized files are written; system temp dir when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            normalize_audio: default_normalize_audio(),
            compression_level: CompressionLevel::default(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load only what is stored in `path`, ignoring environment overrides
    ///
    /// Use this as the base for edits that are saved back to the file.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Some(config::Map::new()))
    }

    /// Load settings with an explicit environment map instead of the process
    /// environment. `None` reads the process environment.
    pub fn load_with_env(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from settings file if it exists
        if path.exists() {
            builder = builder.add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Json)
                    .required(true),
            );
        }

        // Override with environment variables (prefixed with ANNOUNCER_)
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .map_err(|e| AnnouncerError::config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AnnouncerError::config(e.to_string()))
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Directory normalized files go to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

fn default_normalize_audio() -> bool {
    true
}
