//! Configuration for the wrangling run.
//!
//! The defaults mirror the fixed project layout: the raw workbook under
//! `data/raw/` and the cleaned CSV under `data/interim/`. Use the builder
//! to point a run elsewhere.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the raw spreadsheet, relative to the project root.
pub const DEFAULT_RAW_DATA_PATH: &str = "data/raw/default of credit card clients.xls";

/// Default directory that receives wrangled datasets.
pub const DEFAULT_INTERIM_DIR: &str = "data/interim";

/// Default output file name.
pub const DEFAULT_OUTPUT_NAME: &str = "dataset_wrangled.csv";

/// Configuration for [`crate::wrangle::create_wrangled_dataset`].
///
/// # Example
///
/// ```rust,ignore
/// let config = WrangleConfig::builder()
///     .output_name("dataset_wrangled.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrangleConfig {
    /// Path to the raw spreadsheet.
    /// Default: `data/raw/default of credit card clients.xls`
    pub raw_data_path: PathBuf,

    /// Directory that receives the wrangled CSV. Created if missing.
    /// Default: `data/interim`
    pub interim_dir: PathBuf,

    /// Output file name within `interim_dir`. An existing file at that
    /// path is overwritten without confirmation.
    /// Default: `dataset_wrangled.csv`
    pub output_name: String,
}

impl Default for WrangleConfig {
    fn default() -> Self {
        Self {
            raw_data_path: PathBuf::from(DEFAULT_RAW_DATA_PATH),
            interim_dir: PathBuf::from(DEFAULT_INTERIM_DIR),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl WrangleConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WrangleConfigBuilder {
        WrangleConfigBuilder::default()
    }

    /// Full path of the output CSV.
    pub fn output_path(&self) -> PathBuf {
        self.interim_dir.join(&self.output_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.output_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputName);
        }
        if self.output_name.contains(['/', '\\']) {
            return Err(ConfigValidationError::OutputNameWithSeparator(
                self.output_name.clone(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Output name must not be empty")]
    EmptyOutputName,

    #[error("Output name '{0}' must not contain path separators")]
    OutputNameWithSeparator(String),
}

/// Builder for [`WrangleConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct WrangleConfigBuilder {
    raw_data_path: Option<PathBuf>,
    interim_dir: Option<PathBuf>,
    output_name: Option<String>,
}

impl WrangleConfigBuilder {
    /// Set the path to the raw spreadsheet.
    pub fn raw_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw_data_path = Some(path.into());
        self
    }

    /// Set the directory that receives the wrangled CSV.
    pub fn interim_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.interim_dir = Some(dir.into());
        self
    }

    /// Set the output file name.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<WrangleConfig, ConfigValidationError> {
        let defaults = WrangleConfig::default();
        let config = WrangleConfig {
            raw_data_path: self.raw_data_path.unwrap_or(defaults.raw_data_path),
            interim_dir: self.interim_dir.unwrap_or(defaults.interim_dir),
            output_name: self.output_name.unwrap_or(defaults.output_name),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_paths() {
        let config = WrangleConfig::default();
        assert_eq!(
            config.raw_data_path,
            PathBuf::from("data/raw/default of credit card clients.xls")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("data/interim/dataset_wrangled.csv")
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = WrangleConfig::builder()
            .raw_data_path("fixtures/sample.xls")
            .interim_dir("/tmp/out")
            .output_name("cleaned.csv")
            .build()
            .unwrap();
        assert_eq!(config.output_path(), PathBuf::from("/tmp/out/cleaned.csv"));
    }

    #[test]
    fn test_empty_output_name_rejected() {
        let result = WrangleConfig::builder().output_name("  ").build();
        assert!(matches!(result, Err(ConfigValidationError::EmptyOutputName)));
    }

    #[test]
    fn test_output_name_with_separator_rejected() {
        let result = WrangleConfig::builder().output_name("nested/out.csv").build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::OutputNameWithSeparator(_))
        ));
    }
}
