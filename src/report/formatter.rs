//! Report formatter implementation

use std::fmt::Write;

use super::{BatchReport, ReportFormat};
use crate::error::{Error, Result};

/// Formats a batch report into the requested output format
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(report: &BatchReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            ReportFormat::Text => Self::to_text(report).map_err(|e| Error::ReportError(e.to_string())),
        }
    }

    fn to_text(report: &BatchReport) -> std::result::Result<String, std::fmt::Error> {
        let mut output = String::new();
        writeln!(output, "{} {} report", report.tool, report.version)?;
        writeln!(output, "Generated: {}", report.generated_at)?;
        writeln!(output, "Input:  {}", report.input_root.display())?;
        writeln!(output, "Output: {}", report.output_root.display())?;
        if report.dry_run {
            writeln!(output, "Dry run: nothing was written")?;
        }
        writeln!(output)?;

        for record in &report.summary.records {
            writeln!(output, "{}", record)?;
        }
        if !report.summary.records.is_empty() {
            writeln!(output)?;
        }
        writeln!(output, "{}", report.summary)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::{cleaner::FileOutcome, pipeline::BatchSummary, progress::FileRecord};

    fn sample() -> BatchReport {
        let summary = BatchSummary {
            pdf_total: 1,
            copied_clean: 1,
            records: vec![FileRecord {
                path: PathBuf::from("docs/a.pdf"),
                outcome: FileOutcome::CopiedClean,
            }],
            ..BatchSummary::default()
        };
        BatchReport::new(Path::new("/in"), Path::new("/JStripped_in"), false, summary)
    }

    #[test]
    fn text_lists_records_then_summary() {
        let text = ReportFormatter::format(&sample(), ReportFormat::Text).unwrap();
        let record_at = text.find("[COPIED CLEAN] docs/a.pdf").unwrap();
        let summary_at = text.find("Summary:").unwrap();
        assert!(record_at < summary_at);
        assert!(text.contains("already clean -> copied: 1"));
    }

    #[test]
    fn json_flattens_outcome_into_record() {
        let json = ReportFormatter::format(&sample(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value["summary"]["records"][0];
        assert_eq!(record["path"], "docs/a.pdf");
        assert_eq!(record["status"], "copied_clean");
    }

    #[test]
    fn yaml_renders() {
        let yaml = ReportFormatter::format(&sample(), ReportFormat::Yaml).unwrap();
        assert!(yaml.contains("status: copied_clean"));
    }
}
