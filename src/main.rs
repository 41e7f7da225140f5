// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context, anyhow};
use log::{warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::{ArgGroup, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use sentsub::app_config::{self, Config, TranslationProvider};
use sentsub::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "libretranslate")]
    LibreTranslate,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
        }
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

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for sentsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sentsub - sentence-aware subtitle translator
///
/// Translates SubRip subtitles one sentence at a time, even when a sentence
/// runs over several cues, and writes the translation under each original line.
#[derive(Parser, Debug)]
#[command(name = "sentsub")]
#[command(version)]
#[command(about = "Sentence-aware subtitle translator")]
#[command(long_about = "sentsub translates .srt subtitles sentence by sentence and appends the \
translation to every cue as a second line.

EXAMPLES:
    sentsub --file movie.srt                      # Writes movie[zh-CN].srt
    sentsub --file movie.srt --lang ja            # Translate to Japanese
    sentsub --file old.srt --encode gbk           # Read a GBK-encoded file
    sentsub --dir /videos --provider libretranslate
    sentsub completions bash > sentsub.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google         - Google Cloud Translation v2 (requires API key)
    libretranslate - LibreTranslate instance (default: http://localhost:5000)")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
#[command(subcommand_negates_reqs = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file to translate
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory to translate recursively
    #[arg(short, long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Encoding of the input files (e.g., 'utf-8', 'gbk', 'big5')
    #[arg(short, long, value_name = "ENCODING")]
    encode: Option<String>,

    /// Target language code (e.g., 'zh-CN', 'ja', 'fr')
    #[arg(short, long)]
    lang: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for the translation provider
    #[arg(long, env = "SENTSUB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "sentsub", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

/// Load the configuration file, creating a default one when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        Ok(config)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Override configuration values with the ones given on the command line
fn apply_cli_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(api_key) = &options.api_key {
        config.translation.active_provider_config_mut().api_key = api_key.clone();
    }

    if let Some(encoding) = &options.encode {
        config.source_encoding = encoding.clone();
    }

    if let Some(target_lang) = &options.lang {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;
    apply_cli_overrides(&mut config, &options);

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using {} with target language {}", config.translation.provider.display_name(), config.target_language);

    let controller = Controller::with_config(config);

    match (options.file, options.dir) {
        (Some(file), _) => controller.run_file(file).await,
        (None, Some(dir)) => Arc::new(controller).run_folder(dir).await,
        (None, None) => Err(anyhow!("Either --file or --dir is required")),
    }
}
