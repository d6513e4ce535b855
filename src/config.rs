//! Configuration types and validation for the stripping pipeline

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default name prefix of the mirrored output folder
pub const DEFAULT_OUTPUT_PREFIX: &str = "JStripped_";

/// Default stem suffix used when cleaning a single file in place
pub const DEFAULT_SINGLE_FILE_SUFFIX: &str = "_nojs";

/// Global pipeline execution config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Copy files that are not PDFs into the mirrored tree
    pub copy_non_pdf: bool,
    /// Copy encrypted or unreadable PDFs as-is instead of leaving a gap
    pub copy_unprocessable: bool,
    /// Prefix of the derived output folder name
    pub output_prefix: String,
    /// Suffix appended to the file stem in single-file mode
    pub single_file_suffix: String,
    /// Extensions (without dot, case-insensitive) treated as PDF
    pub pdf_extensions: Vec<String>,
    /// Keep permissions and timestamps on verbatim copies
    pub preserve_timestamps: bool,
    /// Remove XFA form definitions along with form actions
    pub strip_xfa: bool,
    /// Drop objects left unreachable after cleaning
    pub prune_unreferenced: bool,
    /// Report what would happen without writing anything
    pub dry_run: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            copy_non_pdf: true,
            copy_unprocessable: true,
            output_prefix: DEFAULT_OUTPUT_PREFIX.into(),
            single_file_suffix: DEFAULT_SINGLE_FILE_SUFFIX.into(),
            pdf_extensions: vec!["pdf".into()],
            preserve_timestamps: true,
            strip_xfa: true,
            prune_unreferenced: true,
            dry_run: false,
        }
    }
}

/// Command-line settings layered over a loaded configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub skip_non_pdf: bool,
    pub skip_unprocessable: bool,
    pub keep_xfa: bool,
    pub dry_run: bool,
    pub output_prefix: Option<String>,
}

impl StripConfig {
    /// Applies overrides; flags only ever switch behaviour on, never back off.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.skip_non_pdf {
            self.copy_non_pdf = false;
        }
        if overrides.skip_unprocessable {
            self.copy_unprocessable = false;
        }
        if overrides.keep_xfa {
            self.strip_xfa = false;
        }
        if overrides.dry_run {
            self.dry_run = true;
        }
        if let Some(prefix) = &overrides.output_prefix {
            self.output_prefix = prefix.clone();
        }
        self
    }

    /// Loads a configuration file, trying JSON first and then YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration text, trying JSON first and then YAML.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| Error::ConfigError(format!("Config parsing error: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        validate_name_part("output_prefix", &self.output_prefix)?;
        validate_name_part("single_file_suffix", &self.single_file_suffix)?;

        if self.pdf_extensions.is_empty() {
            return Err(Error::ConfigError("pdf_extensions must not be empty".into()));
        }
        if let Some(bad) = self
            .pdf_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']))
        {
            return Err(Error::ConfigError(format!(
                "Invalid PDF extension {:?}: use a bare extension such as \"pdf\"",
                bad
            )));
        }
        Ok(())
    }
}

fn validate_name_part(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::ConfigError(format!("{} must not be empty", field)));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(Error::ConfigError(format!(
            "{} must be a plain name fragment, got {:?}",
            field, value
        )));
    }
    Ok(())
}
