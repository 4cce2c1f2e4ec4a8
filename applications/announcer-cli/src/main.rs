/// Announcer Studio - command-line audio normalization
use announcer_cli::{
    commands::{self, NormalizeOptions, SettingsUpdate},
    Settings, DEFAULT_SETTINGS_FILE,
};
use announcer_core::CompressionLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "announcer-cli")]
#[command(about = "Loudness normalization and compression for announcer sounds", long_about = None)]
struct Cli {
    /// Settings file path
    #[arg(long = "settings", global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings_file: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize audio files into new WAV files
    Normalize {
        /// Input audio files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Compression level (0-100), overrides the settings
        #[arg(short, long)]
        level: Option<i64>,
        /// Output directory, overrides the settings
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Print loudness measurements for a file
    Analyze {
        /// Input audio file
        input: PathBuf,
        /// Compression level (0-100), overrides the settings
        #[arg(short, long)]
        level: Option<i64>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Change settings and save them
    Set {
        /// Compression level (0-100)
        #[arg(short, long)]
        level: Option<i64>,
        /// Normalize audio before use
        #[arg(short, long)]
        normalize: Option<bool>,
        /// Output directory for normalized files
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "announcer_cli=debug,announcer_audio=debug,announcer_loudness=debug"
    } else {
        "announcer_cli=info,announcer_audio=info,announcer_loudness=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load(&cli.settings_file)?;
    tracing::debug!(?settings, path = %cli.settings_file.display(), "Settings loaded");

    match cli.command {
        Commands::Normalize {
            inputs,
            level,
            out_dir,
        } => {
            let options = NormalizeOptions {
                level: level.map(CompressionLevel::new),
                out_dir,
            };
            for report in commands::normalize(&inputs, &settings, &options) {
                println!(
                    "{} -> {} [{}]",
                    report.input.display(),
                    report.output.display(),
                    report.status
                );
            }
        }
        Commands::Analyze { input, level } => {
            let level = level.map_or(settings.compression_level, CompressionLevel::new);
            let summary = commands::analyze(&input, level)?;
            println!("{summary}");
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            SettingsAction::Set {
                level,
                normalize,
                out_dir,
            } => {
                let update = SettingsUpdate {
                    level: level.map(CompressionLevel::new),
                    normalize,
                    out_dir,
                };
                if update.is_empty() {
                    anyhow::bail!("Nothing to change; pass --level, --normalize or --out-dir");
                }
                let saved = update.save_to(&cli.settings_file)?;
                println!("{}", serde_json::to_string_pretty(&saved)?);
            }
        },
    }

    Ok(())
}
