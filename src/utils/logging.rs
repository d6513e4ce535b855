//! Logging setup shared by the command line and the terminal front end

use std::{
    fmt,
    fs::OpenOptions,
    io,
    path::PathBuf,
    sync::Mutex,
};

use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter, FmtSubscriber};

use crate::error::{Error, Result};

/// Severity levels accepted by the subscriber filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        write!(f, "{}", level_str)
    }
}

/// Where log lines end up
#[derive(Debug, Clone)]
pub enum LogTarget {
    Console,
    File(PathBuf),
    /// Swallow everything; used while a full-screen UI owns the terminal
    Discard,
}

/// Filter directive scoping the level to this crate
pub fn filter_directive(level: LogLevel) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Installs the global tracing subscriber.
pub fn init_logging(level: LogLevel, target: LogTarget) -> Result<()> {
    let (writer, ansi) = match target {
        LogTarget::Console => (BoxMakeWriter::new(io::stderr), true),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| Error::LoggingError(format!("Cannot open log file {}: {}", path.display(), e)))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Discard => (BoxMakeWriter::new(io::sink), false),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(filter_directive(level)))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::LoggingError(format!("Failed to set tracing subscriber: {}", e)))
}
