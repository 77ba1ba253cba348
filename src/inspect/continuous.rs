//! Continuous-variable inspection: distribution plots plus a printed
//! summary block.

use polars::prelude::*;
use std::io::Write;

use crate::error::Result;
use crate::inspect::render::{PlotConfig, render_distribution};
use crate::inspect::stats::{SummaryStatistics, collect_finite, summary_statistics};
use crate::utils::format_grouped_round;

/// Render the boxplot/histogram pair and print the summary block for one
/// numeric column.
///
/// The printed order is fixed: Min, Lower Quartile, median, mean, Upper
/// Quartile, max as thousands-grouped integers, then a blank line, then
/// Skew and Kurtosis to two decimals. Unlike the discrete inspector this
/// performs no internal error handling: a non-numeric or empty column
/// propagates its failure to the caller.
pub fn inspect_continuous<W: Write>(
    series: &Series,
    config: &PlotConfig,
    out: &mut W,
) -> Result<SummaryStatistics> {
    let stats = summary_statistics(series)?;
    let values = collect_finite(series)?;

    writeln!(out, "{}", render_distribution(&values, &stats, config))?;
    writeln!(out)?;
    write_summary(&stats, out)?;
    Ok(stats)
}

/// Print the fixed-order summary block.
pub fn write_summary<W: Write>(stats: &SummaryStatistics, out: &mut W) -> Result<()> {
    writeln!(out, "{:<17}{}", "Min:", format_grouped_round(stats.min))?;
    writeln!(
        out,
        "{:<17}{}",
        "Lower Quartile:",
        format_grouped_round(stats.lower_quartile)
    )?;
    writeln!(out, "{:<17}{}", "median:", format_grouped_round(stats.median))?;
    writeln!(out, "{:<17}{}", "mean:", format_grouped_round(stats.mean))?;
    writeln!(
        out,
        "{:<17}{}",
        "Upper Quartile:",
        format_grouped_round(stats.upper_quartile)
    )?;
    writeln!(out, "{:<17}{}", "max:", format_grouped_round(stats.max))?;
    writeln!(out)?;
    writeln!(out, "{:<17}{:.2}", "Skew:", stats.skewness)?;
    writeln!(out, "{:<17}{:.2}", "Kurtosis:", stats.kurtosis)?;
    Ok(())
}
