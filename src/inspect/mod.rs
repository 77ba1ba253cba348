//! Ad-hoc inspection helpers for wrangled columns.
//!
//! Two entry points, mirroring the discrete/continuous split of the
//! dataset's variables:
//!
//! - [`inspect_discrete`] tabulates value counts and highlights values
//!   outside an accepted set; it never raises.
//! - [`inspect_continuous`] renders a boxplot/histogram pair and prints
//!   summary statistics; its failures propagate.

mod continuous;
mod discrete;
mod render;
mod stats;

pub use continuous::{inspect_continuous, write_summary};
pub use discrete::{
    DiscreteInspection, FrequencyRow, FrequencyTable, UnavailableReason, inspect_discrete,
};
pub use render::{MIN_PLOT_WIDTH, PlotConfig, PlotConfigBuilder, PlotConfigError};
pub use stats::{SummaryStatistics, summary_statistics};
