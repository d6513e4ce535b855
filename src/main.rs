//! jstrip command-line interface
//!
//! Mirrors a folder into `JStripped_<name>` with JavaScript removed from
//! every PDF, or cleans a single PDF into `<stem>_nojs.pdf`.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum};
use tracing::{error, info, warn};

use jstrip::{
    pipeline::{derive_output_root, validate_input_dir},
    config::ConfigOverrides,
    BatchReport, BatchStage, Error, LogLevel, LogTarget, Pipeline, ReportFormat, StripConfig,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Verbosity {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages (default)
    Info,
    /// Debug and all messages
    Debug,
    /// Trace and all messages (most verbose)
    Trace,
}

impl From<Verbosity> for LogLevel {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Error => LogLevel::Error,
            Verbosity::Warn => LogLevel::Warn,
            Verbosity::Info => LogLevel::Info,
            Verbosity::Debug => LogLevel::Debug,
            Verbosity::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Text,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Text => ReportFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let input = matches.get_one::<PathBuf>("input").cloned();
    let interactive = matches.get_flag("tui") || input.is_none();

    let level = if matches.get_flag("quiet") {
        LogLevel::Error
    } else {
        matches
            .get_one::<Verbosity>("verbose")
            .copied()
            .map(LogLevel::from)
            .unwrap_or_default()
    };
    let target = match matches.get_one::<PathBuf>("log-file") {
        Some(path) => LogTarget::File(path.clone()),
        None if interactive => LogTarget::Discard,
        None => LogTarget::Console,
    };
    if let Err(e) = jstrip::init_logging(level, target) {
        eprintln!("{}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    if interactive {
        return run_interactive(config, input);
    }

    let Some(input) = input else {
        return ExitCode::from(EXIT_FAILURE);
    };
    let result = if input.is_file() {
        run_single(config, &input, &matches)
    } else {
        run_batch(config, &input, &matches)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn build_cli() -> Command {
    Command::new("jstrip")
        .version(jstrip::VERSION)
        .about("Strip JavaScript from every PDF in a folder tree")
        .long_about(
            "Mirrors the input folder into a sibling folder named JStripped_<name>. \
             PDFs are rewritten without JavaScript actions, PDFs without JavaScript and \
             all other files are copied unchanged. A single PDF is cleaned into \
             <name>_nojs.pdf next to it.",
        )
        // Input/Output
        .arg(Arg::new("input")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .help("Input folder (or a single PDF); opens the folder picker when omitted"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("DIR")
            .value_parser(value_parser!(PathBuf))
            .help("Output folder instead of the derived JStripped_<name>"))
        // Configuration
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("Configuration file (JSON/YAML)"))
        .arg(Arg::new("prefix")
            .long("prefix")
            .value_name("PREFIX")
            .help("Name prefix of the derived output folder"))
        // Processing options
        .arg(Arg::new("skip-nonpdf")
            .long("skip-nonpdf")
            .action(ArgAction::SetTrue)
            .help("Do not copy files that are not PDFs"))
        .arg(Arg::new("skip-unprocessable")
            .long("skip-unprocessable")
            .action(ArgAction::SetTrue)
            .help("Leave encrypted or unreadable PDFs out of the output"))
        .arg(Arg::new("keep-xfa")
            .long("keep-xfa")
            .action(ArgAction::SetTrue)
            .help("Keep XFA form definitions"))
        .arg(Arg::new("dry-run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Show what would be done without writing anything"))
        // Reporting
        .arg(Arg::new("report")
            .short('r')
            .long("report")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("Write a batch report"))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .value_parser(value_parser!(OutputFormat))
            .requires("report")
            .help("Report format [default: text]"))
        // Logging
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .value_parser(value_parser!(Verbosity))
            .default_value("info")
            .help("Set logging verbosity"))
        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Suppress all output except errors"))
        .arg(Arg::new("log-file")
            .long("log-file")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("Append log lines to a file instead of the terminal"))
        // Front end
        .arg(Arg::new("tui")
            .long("tui")
            .action(ArgAction::SetTrue)
            .help("Pick the folder in an interactive terminal view"))
}

fn load_config(matches: &ArgMatches) -> jstrip::Result<StripConfig> {
    let loaded = match matches.get_one::<PathBuf>("config") {
        Some(path) => StripConfig::load(path)?,
        None => StripConfig::default(),
    };

    let overrides = ConfigOverrides {
        skip_non_pdf: matches.get_flag("skip-nonpdf"),
        skip_unprocessable: matches.get_flag("skip-unprocessable"),
        keep_xfa: matches.get_flag("keep-xfa"),
        dry_run: matches.get_flag("dry-run"),
        output_prefix: matches.get_one::<String>("prefix").cloned(),
    };
    let config = loaded.with_overrides(&overrides);
    config.validate()?;
    Ok(config)
}

fn run_single(config: StripConfig, input: &Path, matches: &ArgMatches) -> jstrip::Result<()> {
    if let Some(flag) = ["output", "report"].into_iter().find(|id| matches.contains_id(id)) {
        return Err(Error::InvalidInput(format!(
            "--{} only applies when the input is a folder",
            flag
        )));
    }
    let pipeline = Pipeline::new(config);
    let (output, outcome) = pipeline.clean_single(input)?;
    if outcome.is_failure() {
        warn!("{} {}", outcome, input.display());
    }
    println!("{} {} -> {}", outcome, input.display(), output.display());
    Ok(())
}

fn run_batch(config: StripConfig, input: &Path, matches: &ArgMatches) -> jstrip::Result<()> {
    let input_root = validate_input_dir(input)?;
    let output_root = match matches.get_one::<PathBuf>("output") {
        Some(path) => path.clone(),
        None => derive_output_root(&input_root, &config.output_prefix)?,
    };
    let pipeline = Pipeline::new(config);
    let dry_run = pipeline.config().dry_run;
    if dry_run {
        info!("Dry run: nothing will be written");
    }

    let mut stage = BatchStage::Scanning;
    let summary = pipeline.execute_into(&input_root, &output_root, |update| {
        if update.stage != stage {
            stage = update.stage;
            info!("{} ({} files)", stage, update.total);
        }
    })?;

    if !matches.get_flag("quiet") {
        println!("{}", summary);
    }

    if let Some(report_path) = matches.get_one::<PathBuf>("report") {
        let format = matches
            .get_one::<OutputFormat>("format")
            .copied()
            .map(ReportFormat::from)
            .unwrap_or_default();
        BatchReport::new(&input_root, &output_root, dry_run, summary).write_to(report_path, format)?;
        info!("Report written to {} ({})", report_path.display(), format);
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(config: StripConfig, start: Option<PathBuf>) -> ExitCode {
    let start = match start {
        Some(path) if path.is_dir() => path,
        Some(path) => {
            eprintln!("{}", Error::InvalidInput(format!("{} is not a folder", path.display())));
            return ExitCode::from(EXIT_FAILURE);
        }
        None => PathBuf::from("."),
    };
    match jstrip::tui::run(config, &start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_config: StripConfig, _start: Option<PathBuf>) -> ExitCode {
    eprintln!(
        "{}",
        Error::InvalidInput("no input given and the terminal picker is not built in".into())
    );
    ExitCode::from(EXIT_FAILURE)
}
