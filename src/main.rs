//! CLI entry point for the credit-default EDA utility.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use credit_eda::config::{DEFAULT_INTERIM_DIR, DEFAULT_OUTPUT_NAME, DEFAULT_RAW_DATA_PATH};
use credit_eda::{
    DiscreteInspection, PlotConfig, WrangleConfig, WrangleReport, create_wrangled_dataset,
    inspect_continuous, inspect_discrete, summary_statistics,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};

const DEFAULT_WRANGLED_PATH: &str = "data/interim/dataset_wrangled.csv";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Wrangle and inspect the credit card default dataset",
    long_about = "Exploratory data analysis utility for the \"default of credit card clients\" dataset.\n\n\
                  EXAMPLES:\n  \
                  # Clean the raw spreadsheet and export the wrangled CSV\n  \
                  credit-eda wrangle\n\n  \
                  # Frequency table with out-of-domain highlighting\n  \
                  credit-eda inspect-discrete --column EDUCATION --accepted 1,2,3,4\n\n  \
                  # Boxplot, histogram and summary statistics\n  \
                  credit-eda inspect-continuous --column LIMIT_BAL"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean the raw spreadsheet and export the wrangled CSV
    Wrangle {
        /// Path to the raw spreadsheet
        #[arg(short, long, default_value = DEFAULT_RAW_DATA_PATH)]
        input: PathBuf,

        /// Directory that receives the wrangled CSV
        #[arg(short, long, default_value = DEFAULT_INTERIM_DIR)]
        output_dir: PathBuf,

        /// Output file name
        #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
        output_name: String,

        /// Print the run report as JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// Tabulate value counts for a discrete column
    InspectDiscrete {
        /// Column to inspect
        #[arg(short, long)]
        column: String,

        /// Accepted values; rows outside this set are highlighted
        #[arg(short, long, value_delimiter = ',')]
        accepted: Option<Vec<i64>>,

        /// Wrangled CSV to read
        #[arg(short, long, default_value = DEFAULT_WRANGLED_PATH)]
        input: PathBuf,
    },

    /// Plot and summarize a continuous column
    InspectContinuous {
        /// Column to inspect
        #[arg(short, long)]
        column: String,

        /// Wrangled CSV to read
        #[arg(short, long, default_value = DEFAULT_WRANGLED_PATH)]
        input: PathBuf,

        /// Plot width in characters
        #[arg(long, default_value = "60")]
        width: usize,

        /// Histogram bin count
        #[arg(long, default_value = "30")]
        bins: usize,

        /// Disable ANSI styling
        #[arg(long)]
        no_color: bool,

        /// Print the statistics as JSON (suppresses the plot)
        #[arg(long)]
        json: bool,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only carries the JSON document.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let json_mode = matches!(
        &args.command,
        Command::Wrangle { json: true, .. } | Command::InspectContinuous { json: true, .. }
    );
    init_logging(&args.log_level, args.quiet, json_mode);

    match args.command {
        Command::Wrangle {
            input,
            output_dir,
            output_name,
            json,
        } => run_wrangle(input, output_dir, output_name, json),
        Command::InspectDiscrete {
            column,
            accepted,
            input,
        } => run_inspect_discrete(&column, accepted.as_deref(), &input),
        Command::InspectContinuous {
            column,
            input,
            width,
            bins,
            no_color,
            json,
        } => run_inspect_continuous(&column, &input, width, bins, no_color, json),
    }
}

fn run_wrangle(input: PathBuf, output_dir: PathBuf, output_name: String, json: bool) -> Result<()> {
    let config = WrangleConfig::builder()
        .raw_data_path(input)
        .interim_dir(output_dir)
        .output_name(output_name)
        .build()?;

    let report = create_wrangled_dataset(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_wrangle_summary(&report);
    Ok(())
}

/// Print a human-readable summary of the wrangling run.
///
/// Uses `println!` intentionally: this is the command's primary output
/// and should be visible regardless of log level.
fn print_wrangle_summary(report: &WrangleReport) {
    println!();
    println!("{}", "=".repeat(60));
    println!("WRANGLING COMPLETE");
    println!("{}", "=".repeat(60));
    println!();
    println!("Input:  {}", report.input_file);
    println!(
        "Output: {} ({} rows x {} columns)",
        report.output_file, report.rows, report.columns
    );
    println!();
    println!(
        "  EDUCATION values reassigned to 4: {}",
        report.education_reassigned
    );
    if report.pay_renamed {
        println!("  Renamed PAY_0 -> PAY_1");
    } else {
        println!("  PAY_0 not present; rename skipped");
    }
    println!("  Duration: {}ms", report.duration_ms);
    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(60));
}

/// Read the wrangled CSV back for inspection.
///
/// The first line holds the shifted top-level labels; the working header
/// is the second line, so one row is skipped before parsing.
fn load_wrangled_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(anyhow!(
            "Wrangled dataset not found: {} (run `credit-eda wrangle` first)",
            path.display()
        ));
    }

    CsvReadOptions::default()
        .with_skip_rows(1)
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(|e| anyhow!("Failed to read wrangled dataset: {e}"))
}

fn column_series(df: &DataFrame, column: &str, input: &Path) -> Result<Series> {
    Ok(df
        .column(column)
        .map_err(|_| {
            anyhow!(
                "Column '{}' not found in {} (available: {:?})",
                column,
                input.display(),
                df.get_column_names()
            )
        })?
        .as_materialized_series()
        .clone())
}

fn run_inspect_discrete(column: &str, accepted: Option<&[i64]>, input: &Path) -> Result<()> {
    let df = load_wrangled_csv(input)?;
    let series = column_series(&df, column, input)?;

    match inspect_discrete(&series, accepted) {
        DiscreteInspection::Table(table) => println!("{}", table.render()),
        DiscreteInspection::Unavailable(reason) => {
            eprintln!("No table to display: {reason}");
        }
    }
    Ok(())
}

fn run_inspect_continuous(
    column: &str,
    input: &Path,
    width: usize,
    bins: usize,
    no_color: bool,
    json: bool,
) -> Result<()> {
    let df = load_wrangled_csv(input)?;
    let series = column_series(&df, column, input)?;

    if json {
        let stats = summary_statistics(&series)?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let config = PlotConfig::builder()
        .width(width)
        .bins(bins)
        .color(!no_color)
        .build()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    inspect_continuous(&series, &config, &mut out)?;
    Ok(())
}
