//! Exploratory data analysis utilities for the credit card default dataset.
//!
//! # Overview
//!
//! This crate wraps three small operations around the
//! "default of credit card clients" spreadsheet:
//!
//! - **Wrangling**: read the raw `.xls` workbook, collapse the `EDUCATION`
//!   domain to {1,2,3,4}, rename `PAY_0` to `PAY_1`, and export a cleaned
//!   CSV with a synthetic two-row header.
//! - **Discrete inspection**: tabulate value counts for a categorical
//!   column and highlight values outside an accepted set.
//! - **Continuous inspection**: render a boxplot/histogram pair in the
//!   terminal and print summary statistics for a numeric column.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use credit_eda::{WrangleConfig, create_wrangled_dataset};
//!
//! let config = WrangleConfig::builder()
//!     .output_name("dataset_wrangled.csv")
//!     .build()?;
//!
//! let report = create_wrangled_dataset(&config)?;
//! println!("Reassigned {} EDUCATION values", report.education_reassigned);
//! ```
//!
//! Inspection helpers operate on a single `polars::Series` and are meant
//! for interactive use:
//!
//! ```rust,ignore
//! use credit_eda::{PlotConfig, inspect_continuous, inspect_discrete};
//!
//! match inspect_discrete(&series, Some(&[1, 2, 3, 4])) {
//!     credit_eda::DiscreteInspection::Table(table) => println!("{}", table.render()),
//!     credit_eda::DiscreteInspection::Unavailable(reason) => eprintln!("{reason}"),
//! }
//!
//! let plot = PlotConfig::builder().width(72).build()?;
//! inspect_continuous(&series, &plot, &mut std::io::stdout())?;
//! ```

pub mod config;
pub mod error;
pub mod inspect;
pub mod utils;
pub mod wrangle;

// Re-exports for convenient access
pub use config::{ConfigValidationError, WrangleConfig, WrangleConfigBuilder};
pub use error::{EdaError, Result, ResultExt};
pub use inspect::{
    DiscreteInspection, FrequencyRow, FrequencyTable, PlotConfig, PlotConfigBuilder,
    PlotConfigError, SummaryStatistics, UnavailableReason, inspect_continuous, inspect_discrete,
    summary_statistics,
};
pub use wrangle::{
    RawSheet, TwoRowHeader, WrangleReport, WrangledDataset, build_raw_sheet,
    create_wrangled_dataset, normalize_education, read_raw_sheet, wrangle, write_wrangled_csv,
};
