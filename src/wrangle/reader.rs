//! Spreadsheet loading and column type inference.
//!
//! The raw workbook carries two header rows: the first holds top-level
//! labels (`X1`..`X23` in the published dataset), the second the working
//! column names. Data rows start on the third row, and the first column
//! is the row identifier.

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EdaError, Result};

/// A decoded raw worksheet: the top-level label row plus the typed data
/// rows under their working column names.
#[derive(Debug, Clone)]
pub struct RawSheet {
    /// First header row, verbatim (empty cells stay empty strings).
    pub top_labels: Vec<String>,
    /// Data rows keyed by the second header row's names. The identifier
    /// column is an ordinary first column here.
    pub df: DataFrame,
}

/// Read the first worksheet of the workbook at `path`.
///
/// Any read or decode failure is a hard error; callers propagate it and
/// the run aborts.
pub fn read_raw_sheet(path: &Path) -> Result<RawSheet> {
    if !path.exists() {
        return Err(EdaError::InputNotFound(path.to_path_buf()));
    }
    info!("Reading raw spreadsheet: {}", path.display());

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(EdaError::EmptyWorkbook)??;

    let rows: Vec<&[Data]> = range.rows().collect();
    build_raw_sheet(&rows)
}

/// Assemble a [`RawSheet`] from decoded cell rows.
///
/// Row 0 supplies the top-level labels, row 1 the working column names,
/// everything after is data. Exposed separately from [`read_raw_sheet`]
/// so the schema logic can be exercised without a workbook on disk.
pub fn build_raw_sheet(rows: &[&[Data]]) -> Result<RawSheet> {
    if rows.len() < 3 {
        return Err(EdaError::TruncatedSheet);
    }

    let top_labels: Vec<String> = rows[0].iter().map(cell_to_label).collect();
    let names: Vec<String> = rows[1].iter().map(cell_to_label).collect();
    let data_rows = &rows[2..];

    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| build_column(name, idx, data_rows))
        .collect();

    let df = DataFrame::new(columns)?;
    debug!("Decoded {} rows x {} columns", df.height(), df.width());
    Ok(RawSheet { top_labels, df })
}

/// Inferred storage type for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    /// All cells are integers (or integral floats); blanks become nulls.
    Integer,
    /// At least one non-integral numeric cell.
    Numeric,
    /// At least one textual cell; every value is kept as a string.
    Text,
}

fn infer_kind(rows: &[&[Data]], idx: usize) -> ColumnKind {
    let mut kind = ColumnKind::Integer;
    for row in rows {
        match row.get(idx).unwrap_or(&Data::Empty) {
            Data::Empty | Data::Int(_) | Data::Bool(_) => {}
            Data::Float(f) if f.fract() == 0.0 => {}
            Data::Float(_) => kind = ColumnKind::Numeric,
            _ => return ColumnKind::Text,
        }
    }
    kind
}

fn build_column(name: &str, idx: usize, rows: &[&[Data]]) -> Column {
    match infer_kind(rows, idx) {
        ColumnKind::Integer => {
            let values: Vec<Option<i64>> = rows
                .iter()
                .map(|row| match row.get(idx).unwrap_or(&Data::Empty) {
                    Data::Int(v) => Some(*v),
                    Data::Float(f) => Some(*f as i64),
                    Data::Bool(b) => Some(i64::from(*b)),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnKind::Numeric => {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| match row.get(idx).unwrap_or(&Data::Empty) {
                    Data::Int(v) => Some(*v as f64),
                    Data::Float(f) => Some(*f),
                    Data::Bool(b) => Some(f64::from(u8::from(*b))),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| cell_to_text(row.get(idx).unwrap_or(&Data::Empty)))
                .collect();
            Series::new(name.into(), values).into_column()
        }
    }
}

fn cell_to_label(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(v) => Some(v.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
