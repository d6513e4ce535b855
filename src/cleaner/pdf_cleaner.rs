//! PDF Cleaner
//! Per-file processing: load, detect, clean and save a single PDF, folding
//! every failure into a `FileOutcome` so a batch never stops on one file.

use std::{fmt, fs, path::Path};

use lopdf::Document;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    cleaner::javascript_cleaner::{JavaScriptCleaner, JavaScriptCleaningResult, JavaScriptScan},
    config::StripConfig,
    error::{CleanerError, Error, Result},
    utils::io::{copy_file, copy_metadata, write_atomic, write_bytes_atomic},
};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// JavaScript removed and the document rewritten
    Cleaned(JavaScriptCleaningResult),
    /// No JavaScript found; original bytes written unchanged
    CopiedClean,
    Encrypted { copied: bool },
    Unreadable { reason: String, copied: bool },
    CopiedNonPdf,
    Failed { reason: String },
    /// Dry run: the PDF carries JavaScript
    WouldClean(JavaScriptScan),
    /// Dry run: the file would be copied as-is
    WouldCopy,
}

impl FileOutcome {
    /// Outcomes counted as errors in the batch summary
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FileOutcome::Encrypted { .. } | FileOutcome::Unreadable { .. } | FileOutcome::Failed { .. }
        )
    }

    /// Short tag used in progress lines
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Cleaned(_) => "CLEANED",
            FileOutcome::CopiedClean => "COPIED CLEAN",
            FileOutcome::Encrypted { copied: true } => "COPIED ENCRYPTED",
            FileOutcome::Encrypted { copied: false } => "SKIPPED ENCRYPTED",
            FileOutcome::Unreadable { copied: true, .. } => "COPIED ERROR",
            FileOutcome::Unreadable { copied: false, .. } => "SKIPPED ERROR",
            FileOutcome::CopiedNonPdf => "COPIED NONPDF",
            FileOutcome::Failed { .. } => "ERROR",
            FileOutcome::WouldClean(_) => "WOULD CLEAN",
            FileOutcome::WouldCopy => "WOULD COPY",
        }
    }

    /// Extra detail worth showing next to the label
    pub fn detail(&self) -> Option<String> {
        match self {
            FileOutcome::Cleaned(result) => Some(format!("{} entries removed", result.total_removed())),
            FileOutcome::Unreadable { reason, .. } | FileOutcome::Failed { reason } => Some(reason.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "[{}] ({})", self.label(), detail),
            None => write!(f, "[{}]", self.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PdfCleaner {
    javascript: JavaScriptCleaner,
    copy_unprocessable: bool,
    preserve_metadata: bool,
    dry_run: bool,
}

impl Default for PdfCleaner {
    fn default() -> Self {
        Self::from_config(&StripConfig::default())
    }
}

impl PdfCleaner {
    pub fn from_config(config: &StripConfig) -> Self {
        Self {
            javascript: JavaScriptCleaner::new()
                .with_xfa_removal(config.strip_xfa)
                .with_pruning(config.prune_unreferenced),
            copy_unprocessable: config.copy_unprocessable,
            preserve_metadata: config.preserve_timestamps,
            dry_run: config.dry_run,
        }
    }

    /// Clean `src` into `dst`. Never fails: errors become outcomes.
    pub fn process(&self, src: &Path, dst: &Path) -> FileOutcome {
        let bytes = match fs::read(src) {
            Ok(bytes) => bytes,
            Err(e) => return FileOutcome::Failed { reason: e.to_string() },
        };

        let mut document = match Document::load_mem(&bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!("Cannot load {}: {}", src.display(), e);
                let reason = e.to_string();
                return self.fallback_copy(src, dst, |copied| FileOutcome::Unreadable { reason, copied });
            }
        };

        if document.trailer.has(b"Encrypt") {
            warn!("{} is encrypted", src.display());
            return self.fallback_copy(src, dst, |copied| FileOutcome::Encrypted { copied });
        }

        let scan = self.javascript.scan(&document);
        if self.dry_run {
            return if scan.needs_cleaning() {
                FileOutcome::WouldClean(scan)
            } else {
                FileOutcome::WouldCopy
            };
        }

        if !scan.needs_cleaning() {
            debug!("No JavaScript in {}", src.display());
            return match self.write_original(src, dst, &bytes) {
                Ok(()) => FileOutcome::CopiedClean,
                Err(e) => FileOutcome::Failed { reason: e.to_string() },
            };
        }

        let result = match self.javascript.clean(&mut document) {
            Ok(result) => result,
            Err(e) => {
                warn!("Cannot clean {}: {}", src.display(), e);
                let reason = e.to_string();
                return self.fallback_copy(src, dst, |copied| FileOutcome::Unreadable { reason, copied });
            }
        };

        match save_document(&mut document, dst) {
            Ok(()) => FileOutcome::Cleaned(result),
            Err(e) => FileOutcome::Failed { reason: e.to_string() },
        }
    }

    /// Copy a non-PDF file into the mirrored tree
    pub fn copy_verbatim(&self, src: &Path, dst: &Path) -> FileOutcome {
        if self.dry_run {
            return FileOutcome::WouldCopy;
        }
        match copy_file(src, dst, self.preserve_metadata) {
            Ok(_) => FileOutcome::CopiedNonPdf,
            Err(e) => FileOutcome::Failed { reason: e.to_string() },
        }
    }

    fn write_original(&self, src: &Path, dst: &Path, bytes: &[u8]) -> Result<()> {
        write_bytes_atomic(dst, bytes)?;
        if self.preserve_metadata {
            copy_metadata(src, dst)?;
        }
        Ok(())
    }

    fn fallback_copy<F>(&self, src: &Path, dst: &Path, outcome: F) -> FileOutcome
    where
        F: FnOnce(bool) -> FileOutcome,
    {
        if self.dry_run || !self.copy_unprocessable {
            return outcome(false);
        }
        match copy_file(src, dst, self.preserve_metadata) {
            Ok(_) => outcome(true),
            Err(e) => FileOutcome::Failed { reason: e.to_string() },
        }
    }
}

/// Save a document atomically to `dst`
pub fn save_document(document: &mut Document, dst: &Path) -> Result<()> {
    write_atomic(dst, |file| {
        document
            .save_to(file)
            .map_err(|e| Error::from(CleanerError::SaveError(e.to_string())))
    })
}
