//! Summary-statistic computations for continuous columns.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};

/// Location and shape statistics for a single numeric column.
///
/// Quartiles use linear interpolation between order statistics. Skewness
/// and kurtosis are population moment estimators; kurtosis is reported as
/// excess kurtosis (a normal distribution scores 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub column: String,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub mean: f64,
    pub upper_quartile: f64,
    pub max: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Compute summary statistics for a numeric series.
///
/// Nulls are dropped before computation. A non-numeric column fails the
/// float cast and that error propagates; an empty or all-null series is
/// [`EdaError::NoValidValues`].
pub fn summary_statistics(series: &Series) -> Result<SummaryStatistics> {
    let values = collect_finite(series)?;
    if values.is_empty() {
        return Err(EdaError::NoValidValues(series.name().to_string()));
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Ok(SummaryStatistics {
        column: series.name().to_string(),
        min: sorted[0],
        lower_quartile: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        mean,
        upper_quartile: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
        skewness: skewness(&values, mean),
        kurtosis: excess_kurtosis(&values, mean),
    })
}

/// Extract the non-null values of a series as finite floats.
pub(crate) fn collect_finite(series: &Series) -> Result<Vec<f64>> {
    let non_null = series.drop_nulls();
    let float_series = non_null.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

/// Linear-interpolated quantile over pre-sorted values.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + fraction * (sorted[upper] - sorted[lower])
    }
}

/// Population skewness (third standardized moment). Zero spread gives 0.
fn skewness(values: &[f64], mean: f64) -> f64 {
    standardized_moment(values, mean, 3).unwrap_or(0.0)
}

/// Excess kurtosis (fourth standardized moment minus 3). Zero spread
/// gives 0.
fn excess_kurtosis(values: &[f64], mean: f64) -> f64 {
    standardized_moment(values, mean, 4)
        .map(|m4| m4 - 3.0)
        .unwrap_or(0.0)
}

/// n-th standardized central moment, or `None` when the spread is zero.
fn standardized_moment(values: &[f64], mean: f64, order: i32) -> Option<f64> {
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std == 0.0 {
        return None;
    }
    let moment = values
        .iter()
        .map(|v| ((v - mean) / std).powi(order))
        .sum::<f64>()
        / n;
    Some(moment)
}
