//! Custom error types for the EDA utility.
//!
//! This module provides the error hierarchy using `thiserror`. Read and
//! schema errors are hard failures that abort a run; the discrete
//! inspector converts its internal failures to a no-result value instead
//! (see [`crate::inspect::DiscreteInspection`]).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wrangling and inspection operations.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Raw spreadsheet was not found at the expected path.
    #[error("Raw data file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Workbook contained no readable worksheet.
    #[error("Workbook contains no readable worksheet")]
    EmptyWorkbook,

    /// Worksheet is too short to hold two header rows plus data.
    #[error("Worksheet must contain two header rows and at least one data row")]
    TruncatedSheet,

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Spreadsheet decoding error wrapper.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is a missing-input failure (as opposed to a
    /// schema or computation failure).
    pub fn is_input_absence(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_input_absence(),
            _ => false,
        }
    }
}

/// Result type alias for wrangling and inspection operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}
