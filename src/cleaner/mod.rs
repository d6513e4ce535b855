//! Cleaner modules for JavaScript removal

pub mod javascript_cleaner;
pub mod pdf_cleaner;

pub use javascript_cleaner::{JavaScriptCleaner, JavaScriptCleaningResult, JavaScriptScan};
pub use pdf_cleaner::{FileOutcome, PdfCleaner};
