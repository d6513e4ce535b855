//! Batch reports
//!
//! A `BatchReport` wraps the summary of one run with the roots it covered
//! and renders it as JSON, YAML or plain text.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{
    error::Result,
    pipeline::BatchSummary,
    utils::io::write_bytes_atomic,
};

pub mod formatter;

pub use formatter::ReportFormatter;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Json,
    Yaml,
    #[default]
    Text,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Yaml => write!(f, "yaml"),
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub tool: String,
    pub version: String,
    pub generated_at: String,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub dry_run: bool,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(input_root: &Path, output_root: &Path, dry_run: bool, summary: BatchSummary) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            input_root: input_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            dry_run,
            summary,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        ReportFormatter::format(self, format)
    }

    /// Render and write atomically to `path`
    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<()> {
        let rendered = self.render(format)?;
        write_bytes_atomic(path, rendered.as_bytes())
    }
}
