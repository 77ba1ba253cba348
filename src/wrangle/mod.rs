//! Wrangling pipeline for the raw credit default spreadsheet.
//!
//! This module provides the full transform: read the workbook, collapse
//! the `EDUCATION` domain, rename the first repayment column, and export
//! a CSV carrying the synthetic two-row header. Each step is a
//! single-pass, stateless transform; read and schema failures propagate
//! and abort the run.

mod export;
mod reader;

pub use export::{TwoRowHeader, write_wrangled_csv};
pub use reader::{RawSheet, build_raw_sheet, read_raw_sheet};

use chrono::Utc;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::WrangleConfig;
use crate::error::{EdaError, Result};
use crate::utils::integral_code;

/// Categorical column whose domain is collapsed.
pub const EDUCATION_COLUMN: &str = "EDUCATION";

/// Catch-all education code (4 = others).
pub const EDUCATION_OTHERS: i64 = 4;

/// Education codes that pass through unchanged.
pub const ACCEPTED_EDUCATION: [i64; 4] = [1, 2, 3, 4];

/// Repayment column as named in the raw sheet.
pub const PAY_SOURCE_COLUMN: &str = "PAY_0";

/// Repayment column as named in the wrangled output.
pub const PAY_TARGET_COLUMN: &str = "PAY_1";

/// Map an `EDUCATION` value onto the accepted {1,2,3,4} domain.
///
/// Total over any input: integers (and integral floats) already in the
/// accepted set pass through; everything else — other numbers, strings,
/// null — becomes [`EDUCATION_OTHERS`]. There is no error case.
pub fn normalize_education(value: &AnyValue) -> i64 {
    match integral_code(value) {
        Some(code) if ACCEPTED_EDUCATION.contains(&code) => code,
        _ => EDUCATION_OTHERS,
    }
}

/// Rewrite the `EDUCATION` column through [`normalize_education`].
///
/// Returns the number of values that fell outside the accepted domain
/// and were reassigned. A missing `EDUCATION` column is a schema error.
pub fn apply_education_rule(df: &mut DataFrame) -> Result<usize> {
    let series = df
        .column(EDUCATION_COLUMN)
        .map_err(|_| EdaError::ColumnNotFound(EDUCATION_COLUMN.to_string()))?
        .as_materialized_series()
        .clone();

    let mut values = Vec::with_capacity(series.len());
    let mut reassigned = 0usize;
    for idx in 0..series.len() {
        let value = series.get(idx)?;
        let in_domain =
            integral_code(&value).is_some_and(|code| ACCEPTED_EDUCATION.contains(&code));
        if !in_domain {
            reassigned += 1;
        }
        values.push(normalize_education(&value));
    }

    let normalized = Series::new(EDUCATION_COLUMN.into(), values);
    df.replace(EDUCATION_COLUMN, normalized)?;

    debug!("Reassigned {reassigned} EDUCATION values to {EDUCATION_OTHERS}");
    Ok(reassigned)
}

/// Rename `PAY_0` to `PAY_1`. A no-op when the source column is absent.
pub fn rename_pay_column(df: &mut DataFrame) -> Result<bool> {
    let present = df
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == PAY_SOURCE_COLUMN);
    if !present {
        debug!("Column {PAY_SOURCE_COLUMN} absent; rename skipped");
        return Ok(false);
    }
    df.rename(PAY_SOURCE_COLUMN, PAY_TARGET_COLUMN.into())?;
    Ok(true)
}

/// Result of the in-memory wrangling transform.
#[derive(Debug, Clone)]
pub struct WrangledDataset {
    pub df: DataFrame,
    pub header: TwoRowHeader,
    pub education_reassigned: usize,
    pub pay_renamed: bool,
}

/// Apply the full transform to a decoded sheet.
pub fn wrangle(sheet: RawSheet) -> Result<WrangledDataset> {
    let RawSheet { top_labels, df } = sheet;
    let mut df = df;

    let education_reassigned = apply_education_rule(&mut df)?;
    let pay_renamed = rename_pay_column(&mut df)?;
    let header = TwoRowHeader::new(&top_labels, &df);

    Ok(WrangledDataset {
        df,
        header,
        education_reassigned,
        pay_renamed,
    })
}

/// Summary of one wrangling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrangleReport {
    pub input_file: String,
    pub output_file: String,
    pub rows: usize,
    pub columns: usize,
    pub education_reassigned: usize,
    pub pay_renamed: bool,
    pub duration_ms: u128,
    pub generated_at: String,
}

/// Read the raw spreadsheet, wrangle it, and export the cleaned CSV.
///
/// The output lands at `config.output_path()`; any existing file there is
/// overwritten. The transform is deterministic, so repeated runs over the
/// same input produce byte-identical output.
pub fn create_wrangled_dataset(config: &WrangleConfig) -> Result<WrangleReport> {
    config
        .validate()
        .map_err(|e| EdaError::InvalidConfig(e.to_string()))?;

    let started = Instant::now();
    let sheet = read_raw_sheet(&config.raw_data_path)?;
    let mut wrangled = wrangle(sheet)?;

    std::fs::create_dir_all(&config.interim_dir)?;
    let output_path = config.output_path();
    write_wrangled_csv(&mut wrangled.df, &wrangled.header, &output_path)?;

    info!(
        "Wrangled {} rows x {} columns in {:?}",
        wrangled.df.height(),
        wrangled.df.width(),
        started.elapsed()
    );

    Ok(WrangleReport {
        input_file: config.raw_data_path.display().to_string(),
        output_file: output_path.display().to_string(),
        rows: wrangled.df.height(),
        columns: wrangled.df.width(),
        education_reassigned: wrangled.education_reassigned,
        pay_renamed: wrangled.pay_renamed,
        duration_ms: started.elapsed().as_millis(),
        generated_at: Utc::now().to_rfc3339(),
    })
}
