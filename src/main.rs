// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use futures::future::join_all;

use crate::app_config::{Config, LogLevel};
use crate::export_service::ExportService;
use crate::file_utils::FileManager;
use crate::storage::JsonFileStorage;
use crate::subtitle_encoder::SubtitleFormat;

mod aligner;
mod app_config;
mod errors;
mod export_service;
mod file_utils;
mod language_utils;
mod segment_model;
mod storage;
mod subtitle_encoder;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormat {
    Srt,
    Vtt,
    Txt,
}

impl From<CliFormat> for SubtitleFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Srt => SubtitleFormat::Srt,
            CliFormat::Vtt => SubtitleFormat::Vtt,
            CliFormat::Txt => SubtitleFormat::Txt,
        }
    }
}

// Display renders the clap value name, required by default_values_t
impl std::fmt::Display for CliFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let format: SubtitleFormat = self.clone().into();
        write!(f, "{}", format)
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export recorded translations as subtitle files
    Export(ExportArgs),

    /// List recordings and their available translation languages
    List(ListArgs),

    /// Generate shell completions for classcap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Recordings root directory produced by the capture pipeline
    #[arg(value_name = "RECORDINGS_DIR")]
    recordings_dir: PathBuf,

    /// Recording id to export
    #[arg(value_name = "RECORDING_ID")]
    recording_id: String,

    /// Target language code(s) to export (e.g. 'fr', 'spa')
    #[arg(short, long = "language", required = true)]
    languages: Vec<String>,

    /// Output format(s)
    #[arg(short, long = "format", value_enum, default_values_t = vec![CliFormat::Srt])]
    formats: Vec<CliFormat>,

    /// Output directory for the exported files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of existing output files
    #[arg(short = 'F', long)]
    force_overwrite: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Recordings root directory produced by the capture pipeline
    #[arg(value_name = "RECORDINGS_DIR")]
    recordings_dir: PathBuf,
}

/// classcap - Classroom Caption Export
///
/// Exports recorded classroom translations as SubRip, WebVTT or plain
/// transcript files, aligning each translated line with the nearest
/// original-language transcription.
#[derive(Parser, Debug)]
#[command(name = "classcap")]
#[command(version = "1.0.0")]
#[command(about = "Export recorded classroom translations as subtitle files")]
#[command(long_about = "classcap reads the recording directories written by the capture pipeline
and exports the stored translations as caption/subtitle files.

EXAMPLES:
    classcap export ./recordings rec-42 -l fr              # French SRT to the current directory
    classcap export ./recordings rec-42 -l fr -f vtt       # WebVTT instead
    classcap export ./recordings rec-42 -l fr -l es -f srt -f txt -o ./out
    classcap list ./recordings                             # What is available to export
    classcap completions bash > classcap.bash              # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Stderr logger with timestamps and per-level colors
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color prefix for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the config is loaded
    StderrLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "classcap", &mut std::io::stdout());
            Ok(())
        }
        Commands::List(args) => run_list(args),
        Commands::Export(args) => run_export(args).await,
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply any command-line log level override.
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(level) = log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.clone().into());

    Ok(config)
}

async fn run_export(options: ExportArgs) -> Result<()> {
    let config = load_config(&options.config_path, options.log_level.clone())?;

    if !options.recordings_dir.is_dir() {
        return Err(anyhow!("Recordings directory does not exist: {:?}", options.recordings_dir));
    }

    let storage = Arc::new(JsonFileStorage::new(&options.recordings_dir));
    let service = ExportService::new(storage, config);

    // One export per language/format pair; they are independent
    // computations and run concurrently
    let mut requests: Vec<(String, String)> = Vec::new();
    for language in &options.languages {
        for format in &options.formats {
            let format: SubtitleFormat = format.clone().into();
            requests.push((language.clone(), format.to_string()));
        }
    }

    let exports = join_all(requests.iter().map(|(language, format)| {
        service.export(&options.recording_id, language, format)
    }))
    .await;

    let mut exported = 0;
    let mut failed = 0;
    for ((language, format), result) in requests.iter().zip(exports) {
        match result {
            Ok(artifact) => {
                let output_path =
                    FileManager::artifact_output_path(&options.output_dir, &artifact.filename);
                if FileManager::file_exists(&output_path) && !options.force_overwrite {
                    warn!("Output file already exists: {:?}. Use -F to force overwrite.", output_path);
                    failed += 1;
                    continue;
                }

                FileManager::write_to_file(&output_path, &artifact.content)?;
                info!("Wrote {:?} ({})", output_path, artifact.mime_type);
                exported += 1;
            }
            Err(e) => {
                error!("Export {}/{} failed: {}", language, format, e);
                failed += 1;
            }
        }
    }

    if exported == 0 {
        return Err(anyhow!("All {} export(s) failed", failed));
    }
    if failed > 0 {
        warn!("{} of {} export(s) failed", failed, exported + failed);
    }

    Ok(())
}

fn run_list(options: ListArgs) -> Result<()> {
    if !options.recordings_dir.is_dir() {
        return Err(anyhow!("Recordings directory does not exist: {:?}", options.recordings_dir));
    }

    let storage = JsonFileStorage::new(&options.recordings_dir);
    let listings = storage.list_recordings()?;

    if listings.is_empty() {
        info!("No recordings found in {:?}", options.recordings_dir);
        return Ok(());
    }

    for listing in listings {
        let languages: Vec<String> = listing
            .languages
            .iter()
            .map(|code| match language_utils::get_language_name(code) {
                Ok(name) => format!("{} ({})", code, name),
                Err(_) => code.clone(),
            })
            .collect();

        let summary = if languages.is_empty() {
            "no translations".to_string()
        } else {
            languages.join(", ")
        };
        println!("{}: {}", listing.id, summary);
    }

    Ok(())
}
