//! Terminal rendering context for distribution plots.
//!
//! Plot styling is explicit initialization state carried by
//! [`PlotConfig`] and passed into the renderer, not a global mutation
//! applied at startup.

use crate::inspect::stats::SummaryStatistics;
use crate::utils::format_grouped_round;

/// Narrowest plot that still shows a readable box.
pub const MIN_PLOT_WIDTH: usize = 20;

const DEFAULT_PLOT_WIDTH: usize = 60;
const DEFAULT_BINS: usize = 30;
const DEFAULT_HIST_HEIGHT: usize = 6;

/// Rendering configuration for the continuous-variable plots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    /// Plot width in characters (shared by boxplot, histogram and axis).
    pub width: usize,
    /// Number of histogram bins.
    pub bins: usize,
    /// Histogram height in character rows.
    pub height: usize,
    /// Whether ANSI styling (bold title) is emitted.
    pub color: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLOT_WIDTH,
            bins: DEFAULT_BINS,
            height: DEFAULT_HIST_HEIGHT,
            color: true,
        }
    }
}

impl PlotConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PlotConfigBuilder {
        PlotConfigBuilder::default()
    }
}

/// Errors that can occur during plot configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum PlotConfigError {
    #[error("Plot width {0} is below the minimum of {MIN_PLOT_WIDTH}")]
    WidthTooSmall(usize),

    #[error("Bin count must be at least 1")]
    NoBins,

    #[error("Histogram height must be at least 1")]
    NoHeight,

    #[error("Bin count {bins} exceeds plot width {width}")]
    TooManyBins { bins: usize, width: usize },
}

/// Builder for [`PlotConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PlotConfigBuilder {
    width: Option<usize>,
    bins: Option<usize>,
    height: Option<usize>,
    color: Option<bool>,
}

impl PlotConfigBuilder {
    /// Set the plot width in characters.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the number of histogram bins.
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }

    /// Set the histogram height in rows.
    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Enable or disable ANSI styling.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = Some(enabled);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<PlotConfig, PlotConfigError> {
        let defaults = PlotConfig::default();
        let config = PlotConfig {
            width: self.width.unwrap_or(defaults.width),
            bins: self.bins.unwrap_or(defaults.bins),
            height: self.height.unwrap_or(defaults.height),
            color: self.color.unwrap_or(defaults.color),
        };
        if config.width < MIN_PLOT_WIDTH {
            return Err(PlotConfigError::WidthTooSmall(config.width));
        }
        if config.bins == 0 {
            return Err(PlotConfigError::NoBins);
        }
        if config.height == 0 {
            return Err(PlotConfigError::NoHeight);
        }
        if config.bins > config.width {
            return Err(PlotConfigError::TooManyBins {
                bins: config.bins,
                width: config.width,
            });
        }
        Ok(config)
    }
}

/// Render the boxplot + histogram pair over a shared horizontal axis,
/// titled with the column name.
pub(crate) fn render_distribution(
    values: &[f64],
    stats: &SummaryStatistics,
    config: &PlotConfig,
) -> String {
    let mut out = String::new();
    out.push_str(&title_line(&stats.column, config));
    out.push('\n');
    out.push_str(&boxplot_line(stats, config));
    out.push('\n');
    for line in histogram_lines(values, stats, config) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&axis_lines(stats, config));
    out
}

fn title_line(name: &str, config: &PlotConfig) -> String {
    if config.color {
        format!("\x1b[1m{name}\x1b[0m")
    } else {
        name.to_string()
    }
}

/// Map a value into a character cell on the shared axis.
fn cell_of(value: f64, stats: &SummaryStatistics, width: usize) -> usize {
    if stats.max <= stats.min {
        return 0;
    }
    let ratio = (value - stats.min) / (stats.max - stats.min);
    ((ratio * (width - 1) as f64).round() as usize).min(width - 1)
}

// Whiskers span min..max, the box spans the quartiles, the inner tick
// marks the median: |-----[====|====]-----|
fn boxplot_line(stats: &SummaryStatistics, config: &PlotConfig) -> String {
    let width = config.width;
    let mut chars = vec![' '; width];

    let lo = cell_of(stats.min, stats, width);
    let hi = cell_of(stats.max, stats, width);
    let q1 = cell_of(stats.lower_quartile, stats, width);
    let q3 = cell_of(stats.upper_quartile, stats, width);
    let med = cell_of(stats.median, stats, width);

    for cell in chars.iter_mut().take(hi + 1).skip(lo) {
        *cell = '-';
    }
    for cell in chars.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '=';
    }
    chars[lo] = '|';
    chars[hi] = '|';
    chars[q1] = '[';
    chars[q3] = ']';
    chars[med] = '|';

    chars.into_iter().collect()
}

fn histogram_lines(
    values: &[f64],
    stats: &SummaryStatistics,
    config: &PlotConfig,
) -> Vec<String> {
    let bins = config.bins;
    let cell_width = (config.width / bins).max(1);

    let mut counts = vec![0usize; bins];
    for &value in values {
        let bin = if stats.max <= stats.min {
            0
        } else {
            let ratio = (value - stats.min) / (stats.max - stats.min);
            ((ratio * bins as f64) as usize).min(bins - 1)
        };
        counts[bin] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut lines = Vec::with_capacity(config.height);
    for level in (1..=config.height).rev() {
        let mut line = String::with_capacity(bins * cell_width);
        for &count in &counts {
            // Fill when the bar reaches this row; mark any non-empty bin
            // on the baseline row.
            let glyph = if count * config.height >= level * peak {
                '█'
            } else if level == 1 && count > 0 {
                '▁'
            } else {
                ' '
            };
            for _ in 0..cell_width {
                line.push(glyph);
            }
        }
        lines.push(line);
    }
    lines
}

fn axis_lines(stats: &SummaryStatistics, config: &PlotConfig) -> String {
    let rule = "─".repeat(config.width);
    let min_label = format_grouped_round(stats.min);
    let max_label = format_grouped_round(stats.max);
    let pad = config
        .width
        .saturating_sub(min_label.len() + max_label.len())
        .max(1);
    format!("{rule}\n{min_label}{}{max_label}", " ".repeat(pad))
}
