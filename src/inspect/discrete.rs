//! Frequency tabulation for discrete columns.
//!
//! The inspector is built for interactive exploration and never raises:
//! anything that would fail degrades to an explicit
//! [`DiscreteInspection::Unavailable`] value carrying the reason.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::*;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

use crate::utils::{format_percent, format_thousands, integral_code, is_discrete_dtype};

/// One row of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    /// Display form of the distinct value.
    pub value: String,
    /// Integral form, when the value parses as a whole number.
    pub numeric: Option<i64>,
    pub count: u64,
    /// Share of the full series length (nulls included in the total).
    pub percentage: f64,
    /// Set when an accepted-value set was supplied and this value is
    /// outside it.
    pub flagged: bool,
}

/// Value counts for one discrete column, sorted ascending by value.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    pub column: String,
    /// Full series length used as the percentage denominator.
    pub total: usize,
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Render as a styled terminal table. Flagged rows get a red
    /// background with white bold text.
    pub fn render(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new(&self.column).add_attribute(Attribute::Bold),
                Cell::new("value_counts").add_attribute(Attribute::Bold),
                Cell::new("percentage").add_attribute(Attribute::Bold),
            ]);

        for row in &self.rows {
            let cells = vec![
                Cell::new(&row.value),
                Cell::new(format_thousands(row.count as i64))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_percent(row.percentage)).set_alignment(CellAlignment::Right),
            ];
            let cells: Vec<Cell> = if row.flagged {
                cells
                    .into_iter()
                    .map(|cell| {
                        cell.bg(Color::Red)
                            .fg(Color::White)
                            .add_attribute(Attribute::Bold)
                    })
                    .collect()
            } else {
                cells
            };
            table.add_row(cells);
        }
        table
    }
}

/// Why a discrete inspection produced no table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnavailableReason {
    #[error("series is empty")]
    EmptySeries,

    #[error("dtype {0} does not hold discrete values")]
    UnsupportedDtype(String),

    #[error("value counting failed: {0}")]
    CountFailed(String),
}

/// Outcome of a discrete inspection.
///
/// Callers treat [`DiscreteInspection::Unavailable`] as "nothing to
/// display", not as an error to recover from.
#[derive(Debug, Clone)]
pub enum DiscreteInspection {
    Table(FrequencyTable),
    Unavailable(UnavailableReason),
}

impl DiscreteInspection {
    /// The table, when the inspection produced one.
    pub fn table(&self) -> Option<&FrequencyTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Unavailable(_) => None,
        }
    }
}

/// Tabulate value counts for a discrete column.
///
/// Rows whose value lies outside `accepted` are flagged for highlighting;
/// with no accepted set, nothing is flagged. Distinct values are sorted
/// ascending (numerically where possible, lexically otherwise).
pub fn inspect_discrete(series: &Series, accepted: Option<&[i64]>) -> DiscreteInspection {
    if series.is_empty() {
        return DiscreteInspection::Unavailable(UnavailableReason::EmptySeries);
    }
    if !is_discrete_dtype(series.dtype()) {
        return DiscreteInspection::Unavailable(UnavailableReason::UnsupportedDtype(
            series.dtype().to_string(),
        ));
    }

    match build_table(series, accepted) {
        Ok(table) => DiscreteInspection::Table(table),
        Err(e) => {
            debug!("Discrete inspection degraded: {e}");
            DiscreteInspection::Unavailable(UnavailableReason::CountFailed(e.to_string()))
        }
    }
}

fn build_table(series: &Series, accepted: Option<&[i64]>) -> PolarsResult<FrequencyTable> {
    let total = series.len();
    let non_null = series.drop_nulls();
    let counts_df = non_null.value_counts(true, false, "count".into(), false)?;
    let values_col = counts_df.column(series.name().as_str())?;
    let counts_col = counts_df.column("count")?;

    let mut rows = Vec::with_capacity(counts_df.height());
    for idx in 0..counts_df.height() {
        let value = values_col.get(idx)?;
        let count = counts_col.get(idx)?.try_extract::<u64>()?;
        let numeric = integral_code(&value);
        let flagged = match (accepted, numeric) {
            (None, _) => false,
            (Some(set), Some(code)) => !set.contains(&code),
            (Some(_), None) => true,
        };
        rows.push(FrequencyRow {
            value: display_value(&value),
            numeric,
            count,
            percentage: count as f64 / total as f64,
            flagged,
        });
    }

    rows.sort_by(|a, b| match (a.numeric, b.numeric) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.value.cmp(&b.value),
    });

    Ok(FrequencyTable {
        column: series.name().to_string(),
        total,
        rows,
    })
}

fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{other}"),
    }
}
