// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use transrank::app_config::{self, Config};
use transrank::app_controller::{Controller, parse_rating_arg};
use transrank::comparison::RequestStatus;
use transrank::language_utils::{self, SUPPORTED_LANGUAGES};
use transrank::translation_service::TRANSLATION_MODELS;

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
    /// Fetch several translations of a text, then rank and rate them
    Compare(CompareArgs),

    /// Translate a text with a single model
    Translate(TranslateArgs),

    /// List the supported target languages
    Languages,

    /// List the available translation models
    Models,

    /// Generate shell completions for transrank
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Target language code (e.g., 'es', 'pt-BR')
    #[arg(short, long)]
    language: Option<String>,

    /// Rate a translation before the session starts (e.g., gemini=8)
    #[arg(short, long = "rate", value_name = "ID=VALUE")]
    ratings: Vec<String>,

    /// Save the rankings right away instead of starting a session
    #[arg(short, long)]
    save: bool,

    /// Print the translations and exit
    #[arg(long, conflicts_with = "save")]
    no_interactive: bool,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Target language code (e.g., 'es', 'pt-BR')
    #[arg(short, long)]
    language: Option<String>,

    /// Model to translate with (see `transrank models`)
    #[arg(short, long)]
    model: Option<String>,
}

/// transrank - compare, rank and rate machine translations
#[derive(Parser, Debug)]
#[command(name = "transrank")]
#[command(version)]
#[command(about = "Compare, rank and rate machine translations")]
#[command(long_about = "transrank asks a translation service for several translations of the same text,
lets you reorder and rate them, and saves your ranking.

EXAMPLES:
    transrank compare -l es \"Good morning\"                 # Interactive ranking session
    transrank compare -l de -r deepl=9 -r gemini=6 -s Hi   # Rate and save without a session
    transrank translate -l fr -m deepl \"See you soon\"      # Single translation
    transrank languages                                    # Supported target languages
    transrank completions bash > transrank.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Base URL of the translation service
    #[arg(short, long, global = true, env = "TRANSRANK_ENDPOINT")]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
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

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "transrank", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            for option in SUPPORTED_LANGUAGES {
                println!("{:<6} {}", option.code, option.label);
            }
            Ok(())
        }
        Commands::Models => {
            for model in TRANSLATION_MODELS {
                println!("{:<22} {}", model.id, model.label);
            }
            Ok(())
        }
        Commands::Compare(ref args) => {
            let controller = Arc::new(build_controller(&cli)?);
            watch_interrupts(Arc::clone(&controller));
            run_compare(&controller, args).await
        }
        Commands::Translate(ref args) => {
            let controller = build_controller(&cli)?;
            run_translate(&controller, args).await
        }
    }
}

fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(endpoint) = &cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    debug!("Using service at {}", config.service.endpoint);
    Controller::with_config(config)
}

// @spawns: Ctrl+C handling; cancels a loading comparison, exits when idle
fn watch_interrupts(controller: Arc<Controller>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if sender.send(()).is_err() {
                break;
            }
        }
    });
    tokio::spawn(async move {
        if controller.cancel_on_interrupt(receiver).await {
            std::process::exit(130);
        }
    });
}

fn resolve_language(controller: &Controller, language: &Option<String>) -> String {
    let language = language
        .clone()
        .or_else(|| controller.config().default_target_language.clone())
        .unwrap_or_default();

    if !language.is_empty() && !language_utils::is_supported(&language) {
        log::warn!("'{}' is not in the list of supported languages", language);
    }
    language
}

async fn run_compare(controller: &Controller, args: &CompareArgs) -> Result<()> {
    let language = resolve_language(controller, &args.language);
    let mut stdout = std::io::stdout();

    let status = controller.fetch(&args.text, &language, &mut stdout).await?;

    let ratings = args
        .ratings
        .iter()
        .map(|arg| parse_rating_arg(arg))
        .collect::<Result<Vec<_>>>()?;

    let interactive = !args.save && !args.no_interactive;
    if status != RequestStatus::Success && !interactive {
        return Err(anyhow!("No translations to work with"));
    }

    controller.apply_ratings(&ratings, &mut stdout)?;

    if args.save {
        let status = controller.save(&mut stdout).await?;
        if let Some(message) = status.error_message() {
            return Err(anyhow!("{}", message));
        }
        return Ok(());
    }

    if interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        controller.run_session(stdin, &mut stdout).await?;
    }

    Ok(())
}

async fn run_translate(controller: &Controller, args: &TranslateArgs) -> Result<()> {
    let language = resolve_language(controller, &args.language);
    let model = args
        .model
        .clone()
        .or_else(|| controller.config().default_model.clone())
        .unwrap_or_default();

    let mut stdout = std::io::stdout();
    let status = controller.translate(&args.text, &language, &model, &mut stdout).await?;
    match status {
        RequestStatus::Success => Ok(()),
        _ => Err(anyhow!("Translation did not complete")),
    }
}
