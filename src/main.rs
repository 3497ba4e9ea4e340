// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use subtidy::app_config::{self, Config};
use subtidy::app_controller::Controller;
use subtidy::subtitle_processor::Dialect;

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
    /// Reformat bilingual subtitles (up to two language lines per entry)
    Subtitles(ProcessArgs),

    /// Reformat raw captions (all text lines merged into one)
    Cc(ProcessArgs),

    /// Generate shell completions for subtidy
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Input subtitle file or directory, `-` reads stdin and writes stdout
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for output files (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Reassign entry indices starting at 1
    #[arg(short, long)]
    renumber: bool,

    /// Name dictionary file, one `source=target` mapping per line
    #[arg(short, long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "subtidy.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subtidy - subtitle and caption reformatting
#[derive(Parser, Debug)]
#[command(name = "subtidy")]
#[command(version)]
#[command(about = "Split, clean up and re-serialize subtitle text files")]
#[command(long_about = "subtidy parses subtitle text into entries and writes it back in a canonical form.

EXAMPLES:
    subtidy subtitles movie.srt                 # Reformat bilingual subtitles
    subtidy subtitles -r -n names.txt movie.srt # Renumber and translate speaker names
    subtidy cc captions.srt                     # Merge raw caption lines
    subtidy cc - < captions.srt                 # Read stdin, write stdout
    subtidy subtitles /subs/                    # Process an entire directory
    subtidy completions bash > subtidy.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in subtidy.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: ANSI color code and tag for log level
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

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Logger accepts everything, the max level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subtidy", &mut std::io::stdout());
            Ok(())
        }
        Commands::Subtitles(args) => run_process(args, Dialect::Bilingual),
        Commands::Cc(args) => run_process(args, Dialect::RawCaption),
    }
}

fn run_process(options: ProcessArgs, dialect: Dialect) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    config.dialect = dialect;
    if options.renumber {
        config.renumber = true;
    }
    if let Some(names) = &options.names {
        config.name_dictionary_file = Some(names.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Using configuration: {:?}", config);
    let controller = Controller::with_config(config)?;

    if options.input_path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read subtitles from stdin")?;
        let output = controller.process_text(&input)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if options.input_path.is_file() {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(&options.input_path, &output_dir, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            return Err(anyhow!("--output-dir is only supported for single files"));
        }
        controller.run_folder(&options.input_path, options.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
