//! Two-row-header CSV serialization.

use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// The synthetic two-row column header of the wrangled CSV.
///
/// Row one holds the original top-level labels shifted right by one
/// position, with an empty leading label aligning over the identifier
/// column. Row two holds the working column names, identifier included.
/// Both rows are serialized verbatim as the first two lines of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoRowHeader {
    pub top: Vec<String>,
    pub bottom: Vec<String>,
}

impl TwoRowHeader {
    /// Build the header from the raw top-level labels and the wrangled
    /// frame's current column order.
    pub fn new(top_labels: &[String], df: &DataFrame) -> Self {
        let mut top = Vec::with_capacity(top_labels.len() + 1);
        top.push(String::new());
        top.extend(top_labels.iter().cloned());

        let bottom = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        Self { top, bottom }
    }

    /// The two serialized header lines, in file order.
    pub fn lines(&self) -> [String; 2] {
        [csv_line(&self.top), csv_line(&self.bottom)]
    }
}

fn csv_line(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|field| csv_field(field)).collect();
    escaped.join(",")
}

// Minimal quoting, matching what the data writer below emits.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write the wrangled dataset to `path`: the two header lines, then the
/// data rows. An existing file at `path` is overwritten.
pub fn write_wrangled_csv(df: &mut DataFrame, header: &TwoRowHeader, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    for line in header.lines() {
        writeln!(file, "{line}")?;
    }

    CsvWriter::new(&mut file)
        .include_header(false)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)?;

    info!("Wrangled dataset saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_alignment() {
        let df = df![
            "ID" => [1i64, 2],
            "LIMIT_BAL" => [20000i64, 120000],
        ]
        .unwrap();
        let top_labels = vec![String::new(), "X1".to_string()];

        let header = TwoRowHeader::new(&top_labels, &df);
        assert_eq!(header.top, vec!["", "", "X1"]);
        assert_eq!(header.bottom, vec!["ID", "LIMIT_BAL"]);
    }

    #[test]
    fn test_header_lines_first_cell_empty() {
        let df = df!["ID" => [1i64]].unwrap();
        let header = TwoRowHeader::new(&["X1".to_string()], &df);

        let [top, bottom] = header.lines();
        assert!(top.starts_with(','));
        assert_eq!(top, ",X1");
        assert_eq!(bottom, "ID");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("default payment next month"), "default payment next month");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
