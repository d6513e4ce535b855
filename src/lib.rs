//! Main library file for the PDF JavaScript stripper
//! Mirrors a folder into `JStripped_<name>`, removing JavaScript from every
//! PDF on the way and copying everything else unchanged.

// Configuration and core pipeline
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;

// Per-file cleaning
pub mod cleaner;

// Reporting
pub mod report;

// Utilities
pub mod utils;

// Terminal front end
#[cfg(feature = "tui")]
pub mod tui;

pub use cleaner::{FileOutcome, JavaScriptCleaner, JavaScriptCleaningResult, JavaScriptScan, PdfCleaner};
pub use config::StripConfig;
pub use error::{CleanerError, Error, Result};
pub use pipeline::{BatchSummary, Pipeline};
pub use progress::{BatchStage, FileRecord, ProgressUpdate};
pub use report::{BatchReport, ReportFormat};
pub use utils::{init_logging, LogLevel, LogTarget};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
