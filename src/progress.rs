//! Progress reporting for batch runs

use std::{fmt, path::PathBuf};

use serde::Serialize;

use crate::cleaner::FileOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStage {
    Scanning,
    Cleaning,
    Copying,
    Complete,
}

impl fmt::Display for BatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStage::Scanning => write!(f, "Scanning"),
            BatchStage::Cleaning => write!(f, "Cleaning PDFs"),
            BatchStage::Copying => write!(f, "Copying other files"),
            BatchStage::Complete => write!(f, "Complete"),
        }
    }
}

/// Result for one path relative to the input root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome, self.path.display())
    }
}

#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub stage: BatchStage,
    pub completed: usize,
    pub total: usize,
    pub record: Option<FileRecord>,
}

impl ProgressUpdate {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }
}
