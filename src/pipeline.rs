//! Batch stripping pipeline
//!
//! Walks an input folder, mirrors its directory layout under the output
//! root, cleans every PDF and (optionally) copies every other file. Files
//! are handled one at a time; a failure on one file is recorded and the
//! walk moves on.

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::{
    cleaner::{FileOutcome, PdfCleaner},
    config::StripConfig,
    error::{Error, Result},
    progress::{BatchStage, FileRecord, ProgressUpdate},
    utils::io::{ensure_parent_dir, has_allowed_extension},
};

/// Counters and per-file records for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub pdf_total: usize,
    pub cleaned: usize,
    pub copied_clean: usize,
    pub copied_nonpdf: usize,
    pub errors: usize,
    pub would_clean: usize,
    pub cancelled: bool,
    pub records: Vec<FileRecord>,
}

impl BatchSummary {
    fn record(&mut self, record: FileRecord, is_pdf: bool) {
        if is_pdf {
            self.pdf_total += 1;
        }
        match &record.outcome {
            FileOutcome::Cleaned(_) => self.cleaned += 1,
            FileOutcome::CopiedClean => self.copied_clean += 1,
            FileOutcome::CopiedNonPdf => self.copied_nonpdf += 1,
            FileOutcome::WouldClean(_) => self.would_clean += 1,
            outcome if outcome.is_failure() => self.errors += 1,
            _ => {}
        }
        self.records.push(record);
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|record| record.outcome.is_failure())
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  PDFs processed: {}", self.pdf_total)?;
        writeln!(f, "    cleaned (JS removed): {}", self.cleaned)?;
        writeln!(f, "    already clean -> copied: {}", self.copied_clean)?;
        if self.would_clean > 0 {
            writeln!(f, "    would be cleaned: {}", self.would_clean)?;
        }
        writeln!(f, "  non-PDFs copied: {}", self.copied_nonpdf)?;
        write!(f, "  errors or encrypted (copied as-is): {}", self.errors)?;
        if self.cancelled {
            write!(f, "\n  run cancelled before completion")?;
        }
        Ok(())
    }
}

/// Relative paths discovered under the input root
#[derive(Debug, Default)]
struct Plan {
    directories: Vec<PathBuf>,
    pdfs: Vec<PathBuf>,
    others: Vec<PathBuf>,
    failures: Vec<FileRecord>,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: StripConfig,
    cleaner: PdfCleaner,
    cancel: Option<Arc<AtomicBool>>,
}

impl Pipeline {
    pub fn new(config: StripConfig) -> Self {
        let cleaner = PdfCleaner::from_config(&config);
        Self {
            config,
            cleaner,
            cancel: None,
        }
    }

    /// Share a flag that stops the run before the next file once set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    pub fn is_pdf(&self, path: &Path) -> bool {
        has_allowed_extension(path, &self.config.pdf_extensions)
    }

    /// `<parent>/<prefix><name>` for an input folder
    pub fn output_root_for(&self, input: &Path) -> Result<PathBuf> {
        let input = validate_input_dir(input)?;
        derive_output_root(&input, &self.config.output_prefix)
    }

    /// Mirror `input` into the derived output root.
    pub fn execute<F>(&self, input: &Path, on_progress: F) -> Result<BatchSummary>
    where
        F: FnMut(ProgressUpdate),
    {
        let output_root = self.output_root_for(input)?;
        self.execute_into(input, &output_root, on_progress)
    }

    /// Mirror `input` into an explicit output root.
    #[instrument(skip(self, on_progress))]
    pub fn execute_into<F>(&self, input: &Path, output_root: &Path, mut on_progress: F) -> Result<BatchSummary>
    where
        F: FnMut(ProgressUpdate),
    {
        let input_root = validate_input_dir(input)?;
        let output_root = absolute(output_root)?;
        if output_root == input_root {
            return Err(Error::InvalidInput(
                "output directory must differ from the input directory".into(),
            ));
        }

        info!("Input:  {}", input_root.display());
        info!("Output: {}  (mirroring subfolders)", output_root.display());

        let plan = self.plan(&input_root, &output_root);
        let total = plan.pdfs.len() + if self.config.copy_non_pdf { plan.others.len() } else { 0 };
        info!(
            "Found {} PDFs and {} other files in {} folders",
            plan.pdfs.len(),
            plan.others.len(),
            plan.directories.len() + 1
        );

        let mut summary = BatchSummary::default();
        on_progress(ProgressUpdate {
            stage: BatchStage::Scanning,
            completed: 0,
            total,
            record: None,
        });
        for failure in plan.failures {
            on_progress(ProgressUpdate {
                stage: BatchStage::Scanning,
                completed: 0,
                total,
                record: Some(failure.clone()),
            });
            summary.record(failure, false);
        }

        if !self.config.dry_run {
            self.create_directories(&output_root, &plan.directories)?;
        }

        let mut completed = 0;
        for relative in &plan.pdfs {
            if self.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            let outcome = self.process_file(&input_root, &output_root, relative, true);
            completed += 1;
            self.emit(&mut summary, &mut on_progress, BatchStage::Cleaning, relative, outcome, true, completed, total);
        }

        if self.config.copy_non_pdf && !summary.cancelled {
            for relative in &plan.others {
                if self.is_cancelled() {
                    summary.cancelled = true;
                    break;
                }
                let outcome = self.process_file(&input_root, &output_root, relative, false);
                completed += 1;
                self.emit(&mut summary, &mut on_progress, BatchStage::Copying, relative, outcome, false, completed, total);
            }
        }

        if summary.cancelled {
            warn!("Cancelled after {} of {} files", completed, total);
        }
        on_progress(ProgressUpdate {
            stage: BatchStage::Complete,
            completed,
            total,
            record: None,
        });

        info!(
            "Done: {} cleaned, {} already clean, {} other files copied, {} errors",
            summary.cleaned, summary.copied_clean, summary.copied_nonpdf, summary.errors
        );
        Ok(summary)
    }

    /// Clean one PDF into `<stem><suffix>.pdf` next to it
    pub fn clean_single(&self, input: &Path) -> Result<(PathBuf, FileOutcome)> {
        if !input.is_file() || !self.is_pdf(input) {
            return Err(Error::InvalidInput(format!("{} is not a PDF file", input.display())));
        }
        let stem = input
            .file_stem()
            .ok_or_else(|| Error::InvalidInput(format!("{} has no file name", input.display())))?;
        let extension = input.extension().unwrap_or_default();

        let mut name = stem.to_os_string();
        name.push(&self.config.single_file_suffix);
        name.push(".");
        name.push(extension);
        let output = input.with_file_name(name);

        let outcome = self.cleaner.process(input, &output);
        info!("{} -> {} {}", input.display(), output.display(), outcome);
        Ok((output, outcome))
    }

    fn plan(&self, input_root: &Path, output_root: &Path) -> Plan {
        let mut plan = Plan::default();
        let walker = WalkDir::new(input_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !entry.path().starts_with(output_root));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .and_then(|p| p.strip_prefix(input_root).ok())
                        .map(Path::to_path_buf)
                        .unwrap_or_default();
                    let reason = Error::from(err).to_string();
                    warn!("Cannot read {}: {}", path.display(), reason);
                    plan.failures.push(FileRecord {
                        path,
                        outcome: FileOutcome::Failed { reason },
                    });
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(input_root) else {
                continue;
            };
            let relative = relative.to_path_buf();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                plan.directories.push(relative);
            } else if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
                if self.is_pdf(&relative) {
                    plan.pdfs.push(relative);
                } else {
                    plan.others.push(relative);
                }
            } else if file_type.is_symlink() && !entry.path().exists() {
                let reason = format!("broken symlink to {}", link_target(entry.path()));
                warn!("Cannot read {}: {}", relative.display(), reason);
                plan.failures.push(FileRecord {
                    path: relative,
                    outcome: FileOutcome::Failed { reason },
                });
            } else {
                debug!("Skipping {} (not a regular file)", relative.display());
            }
        }
        plan
    }

    fn create_directories(&self, output_root: &Path, directories: &[PathBuf]) -> Result<()> {
        fs::create_dir_all(output_root).map_err(|e| Error::output(output_root, e))?;
        for relative in directories {
            let target = output_root.join(relative);
            if let Err(e) = fs::create_dir_all(&target) {
                warn!("Cannot create {}: {}", target.display(), e);
            }
        }
        Ok(())
    }

    fn process_file(&self, input_root: &Path, output_root: &Path, relative: &Path, is_pdf: bool) -> FileOutcome {
        let src = input_root.join(relative);
        let dst = output_root.join(relative);

        if !self.config.dry_run {
            if let Err(e) = ensure_parent_dir(&dst) {
                return FileOutcome::Failed { reason: e.to_string() };
            }
        }
        if is_pdf {
            self.cleaner.process(&src, &dst)
        } else {
            self.cleaner.copy_verbatim(&src, &dst)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn emit<F>(
        &self,
        summary: &mut BatchSummary,
        on_progress: &mut F,
        stage: BatchStage,
        relative: &Path,
        outcome: FileOutcome,
        is_pdf: bool,
        completed: usize,
        total: usize,
    ) where
        F: FnMut(ProgressUpdate),
    {
        let record = FileRecord {
            path: relative.to_path_buf(),
            outcome,
        };
        if record.outcome.is_failure() {
            warn!("[{}/{}] {}", completed, total, record);
        } else if matches!(record.outcome, FileOutcome::Cleaned(_) | FileOutcome::WouldClean(_)) {
            info!("[{}/{}] {}", completed, total, record);
        } else {
            debug!("[{}/{}] {}", completed, total, record);
        }

        on_progress(ProgressUpdate {
            stage,
            completed,
            total,
            record: Some(record.clone()),
        });
        summary.record(record, is_pdf);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

/// The input must be an existing directory; returns its canonical path.
pub fn validate_input_dir(input: &Path) -> Result<PathBuf> {
    if !input.exists() {
        return Err(Error::InvalidInput(format!("{} does not exist", input.display())));
    }
    if !input.is_dir() {
        return Err(Error::InvalidInput(format!("{} is not a folder", input.display())));
    }
    Ok(input.canonicalize()?)
}

/// `<parent>/<prefix><name>` for an already validated input folder
pub fn derive_output_root(input: &Path, prefix: &str) -> Result<PathBuf> {
    let name = input
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("{} has no folder name", input.display())))?;
    let parent = input.parent().unwrap_or(input);

    let mut folder = std::ffi::OsString::from(prefix);
    folder.push(name);
    Ok(parent.join(folder))
}

fn link_target(path: &Path) -> String {
    fs::read_link(path)
        .map(|target| target.display().to_string())
        .unwrap_or_else(|_| "an unreadable target".into())
}

/// Absolute form of a possibly missing output root, with symlinks in the
/// existing part resolved so it compares against the canonical input.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    if let Ok(resolved) = joined.canonicalize() {
        return Ok(resolved);
    }
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(joined),
        },
        _ => Ok(joined),
    }
}
