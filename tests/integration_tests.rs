//! Integration tests for the wrangling pipeline and inspection helpers.
//!
//! These tests drive the full transform over a synthetic worksheet:
//! decode, normalize, rename, export, and read the output back.

use calamine::Data;
use credit_eda::{
    DiscreteInspection, PlotConfig, build_raw_sheet, inspect_continuous, inspect_discrete,
    normalize_education, wrangle, write_wrangled_csv,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn label(s: &str) -> Data {
    Data::String(s.to_string())
}

fn num(v: f64) -> Data {
    Data::Float(v)
}

/// A miniature worksheet in the raw file's layout: a top-level label row,
/// a working-name row, then data rows with the identifier first.
fn synthetic_rows() -> Vec<Vec<Data>> {
    vec![
        vec![
            Data::Empty,
            label("X1"),
            label("X2"),
            label("X3"),
            label("Y"),
        ],
        vec![
            label("ID"),
            label("LIMIT_BAL"),
            label("EDUCATION"),
            label("PAY_0"),
            label("default payment next month"),
        ],
        vec![num(1.0), num(20000.0), num(1.0), num(2.0), num(1.0)],
        vec![num(2.0), num(120000.0), num(2.0), num(-1.0), num(0.0)],
        vec![num(3.0), num(90000.0), num(3.0), num(0.0), num(0.0)],
        vec![num(4.0), num(50000.0), num(4.0), num(0.0), num(0.0)],
        vec![num(5.0), num(300000.0), num(5.0), num(0.0), num(0.0)],
        vec![num(6.0), num(70000.0), num(99.0), num(2.0), num(1.0)],
        vec![num(7.0), num(200000.0), Data::Empty, num(0.0), num(0.0)],
    ]
}

fn synthetic_sheet() -> credit_eda::RawSheet {
    let rows = synthetic_rows();
    let slices: Vec<&[Data]> = rows.iter().map(Vec::as_slice).collect();
    build_raw_sheet(&slices).expect("Failed to build raw sheet")
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("credit-eda-{}-{name}", std::process::id()))
}

// ============================================================================
// Wrangle Round-Trip Tests
// ============================================================================

#[test]
fn test_wrangle_collapses_education_domain() {
    let wrangled = wrangle(synthetic_sheet()).unwrap();

    let education: Vec<i64> = wrangled
        .df
        .column("EDUCATION")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();

    assert_eq!(education.len(), 7, "nulls must be collapsed, not dropped");
    assert!(education.iter().all(|v| (1..=4).contains(v)));
    assert_eq!(education, vec![1, 2, 3, 4, 4, 4, 4]);
    // 5, 99 and the blank cell fell outside the domain.
    assert_eq!(wrangled.education_reassigned, 3);
}

#[test]
fn test_wrangle_renames_pay_column() {
    let wrangled = wrangle(synthetic_sheet()).unwrap();

    let names: Vec<String> = wrangled
        .df
        .get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect();

    assert!(!names.contains(&"PAY_0".to_string()));
    assert!(names.contains(&"PAY_1".to_string()));
    assert!(wrangled.pay_renamed);
}

#[test]
fn test_exported_csv_has_two_header_rows() {
    let mut wrangled = wrangle(synthetic_sheet()).unwrap();
    let path = temp_output("header.csv");

    write_wrangled_csv(&mut wrangled.df, &wrangled.header, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    let lines: Vec<&str> = content.lines().collect();
    // Two header rows, then one line per data row.
    assert_eq!(lines.len(), 2 + 7);

    // First header row: empty leading label, then the shifted top labels.
    assert_eq!(lines[0], ",,X1,X2,X3,Y");

    // Second header row: the working column list, identifier included.
    assert_eq!(
        lines[1],
        "ID,LIMIT_BAL,EDUCATION,PAY_1,default payment next month"
    );

    // Data rows carry the identifier as an ordinary first field.
    assert!(lines[2].starts_with("1,20000,1,"));
}

#[test]
fn test_wrangling_is_idempotent() {
    let path_a = temp_output("idempotent-a.csv");
    let path_b = temp_output("idempotent-b.csv");

    let mut first = wrangle(synthetic_sheet()).unwrap();
    write_wrangled_csv(&mut first.df, &first.header, &path_a).unwrap();

    let mut second = wrangle(synthetic_sheet()).unwrap();
    write_wrangled_csv(&mut second.df, &second.header, &path_b).unwrap();

    let bytes_a = fs::read(&path_a).unwrap();
    let bytes_b = fs::read(&path_b).unwrap();
    let _ = fs::remove_file(&path_a);
    let _ = fs::remove_file(&path_b);

    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn test_output_education_survives_reread() {
    let mut wrangled = wrangle(synthetic_sheet()).unwrap();
    let path = temp_output("reread.csv");
    write_wrangled_csv(&mut wrangled.df, &wrangled.header, &path).unwrap();

    // Read the way the inspection commands do: skip the label row, take
    // the second line as the header.
    let df = CsvReadOptions::default()
        .with_skip_rows(1)
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.clone()))
        .unwrap()
        .finish()
        .unwrap();
    let _ = fs::remove_file(&path);

    assert!(df.column("PAY_1").is_ok());
    assert!(df.column("PAY_0").is_err());

    let education: Vec<i64> = df
        .column("EDUCATION")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert!(education.iter().all(|v| (1..=4).contains(v)));
}

// ============================================================================
// Normalization Property Tests
// ============================================================================

#[test]
fn test_normalize_education_total_over_domain() {
    for code in 1..=4i64 {
        assert_eq!(normalize_education(&AnyValue::Int64(code)), code);
    }
    for out_of_domain in [0i64, 5, 6, 99, -7] {
        assert_eq!(normalize_education(&AnyValue::Int64(out_of_domain)), 4);
    }
    assert_eq!(normalize_education(&AnyValue::Null), 4);
    assert_eq!(normalize_education(&AnyValue::String("high school")), 4);
}

// ============================================================================
// Inspector Tests
// ============================================================================

#[test]
fn test_discrete_inspection_on_wrangled_education() {
    let wrangled = wrangle(synthetic_sheet()).unwrap();
    let education = wrangled
        .df
        .column("EDUCATION")
        .unwrap()
        .as_materialized_series()
        .clone();

    let table = match inspect_discrete(&education, Some(&[1, 2, 3, 4])) {
        DiscreteInspection::Table(table) => table,
        DiscreteInspection::Unavailable(reason) => panic!("expected a table: {reason}"),
    };

    // After wrangling, every value sits inside the accepted domain.
    assert!(table.rows.iter().all(|row| !row.flagged));
    let counts: Vec<u64> = table.rows.iter().map(|row| row.count).collect();
    assert_eq!(counts, vec![1, 1, 1, 4]);
}

#[test]
fn test_discrete_inspection_flags_raw_education() {
    let sheet = synthetic_sheet();
    let education = sheet
        .df
        .column("EDUCATION")
        .unwrap()
        .as_materialized_series()
        .clone();

    let table = match inspect_discrete(&education, Some(&[1, 2, 3, 4])) {
        DiscreteInspection::Table(table) => table,
        DiscreteInspection::Unavailable(reason) => panic!("expected a table: {reason}"),
    };

    let flagged: Vec<(String, bool)> = table
        .rows
        .iter()
        .map(|row| (row.value.clone(), row.flagged))
        .collect();
    assert_eq!(
        flagged,
        vec![
            ("1".to_string(), false),
            ("2".to_string(), false),
            ("3".to_string(), false),
            ("4".to_string(), false),
            ("5".to_string(), true),
            ("99".to_string(), true),
        ]
    );
}

#[test]
fn test_continuous_inspection_writes_plot_and_stats() {
    let wrangled = wrangle(synthetic_sheet()).unwrap();
    let limit = wrangled
        .df
        .column("LIMIT_BAL")
        .unwrap()
        .as_materialized_series()
        .clone();

    let config = PlotConfig::builder().color(false).build().unwrap();
    let mut out = Vec::new();
    let stats = inspect_continuous(&limit, &config, &mut out).unwrap();

    assert_eq!(stats.min, 20_000.0);
    assert_eq!(stats.max, 300_000.0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("LIMIT_BAL"));
    assert!(text.contains("Min:"));
    assert!(text.contains("Kurtosis:"));
    assert!(text.contains("20,000"));
    assert!(text.contains("300,000"));
}
