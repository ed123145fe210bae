//! Output formatting and persistence for month-by-year summaries.
//!
//! Supports a fixed-width text grid, JSON serialization, and CSV export.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::summary::SummaryTable;

/// JSON shape of a [`SummaryTable`].
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub years: Vec<i32>,
    pub rows: Vec<SummaryRow>,
}

/// One month of a [`SummaryReport`]; `counts` follows `years` order.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub month: u8,
    pub counts: Vec<Option<usize>>,
}

impl SummaryReport {
    pub fn from_summary(summary: &SummaryTable) -> Self {
        SummaryReport {
            generated_at: Utc::now(),
            years: summary.years().to_vec(),
            rows: summary
                .months()
                .map(|month| SummaryRow {
                    month,
                    counts: summary.row(month),
                })
                .collect(),
        }
    }
}

/// Renders the summary as a fixed-width grid; missing cells print as `NA`.
pub fn render_text(summary: &SummaryTable) -> String {
    let mut out = format!("{:>5}", "MONTH");
    for year in summary.years() {
        out.push_str(&format!(" {year:>8}"));
    }
    out.push('\n');

    for month in summary.months() {
        out.push_str(&format!("{month:>5}"));
        for cell in summary.row(month) {
            let cell = cell.map_or_else(|| "NA".to_string(), |count| count.to_string());
            out.push_str(&format!(" {cell:>8}"));
        }
        out.push('\n');
    }

    out
}

/// Serializes the summary as pretty-printed JSON.
pub fn to_json(summary: &SummaryTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(&SummaryReport::from_summary(
        summary,
    ))?)
}

/// Writes the summary to a CSV file with a `MONTH,<year>...` header.
///
/// Missing cells are left empty. Overwrites any existing file.
pub fn write_csv(path: impl AsRef<Path>, summary: &SummaryTable) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Writing summary CSV");
    write_csv_to(File::create(path)?, summary)
}

/// Same layout as [`write_csv`], to any writer.
pub fn write_csv_to<W: io::Write>(out: W, summary: &SummaryTable) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(out);

    let mut header = vec!["MONTH".to_string()];
    header.extend(summary.years().iter().map(|y| y.to_string()));
    writer.write_record(&header)?;

    for month in summary.months() {
        let mut record = vec![month.to_string()];
        record.extend(
            summary
                .row(month)
                .into_iter()
                .map(|cell| cell.map(|c| c.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;
    use crate::years::{MonthYear, YearTable};
    use std::fs;

    fn sample() -> SummaryTable {
        let table = |year: i32, months: &[u8]| YearTable {
            year,
            rows: months.iter().map(|&month| MonthYear { month, year }).collect(),
        };
        summarize(vec![table(2013, &[1, 1, 2]), table(2014, &[2])]).unwrap()
    }

    #[test]
    fn test_render_text_has_header_and_twelve_rows() {
        let text = render_text(&sample());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert!(lines[0].contains("2013"));
        assert!(lines[0].contains("2014"));
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["1", "2", "NA"]);
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["2", "1", "1"]);
    }

    #[test]
    fn test_to_json_rows_and_nulls() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["years"], serde_json::json!([2013, 2014]));
        assert_eq!(value["rows"].as_array().unwrap().len(), 12);
        assert_eq!(value["rows"][0]["counts"], serde_json::json!([2, null]));
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        write_csv(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "MONTH,2013,2014");
        assert_eq!(lines[1], "1,2,");
        assert_eq!(lines[2], "2,1,1");
        assert_eq!(lines[3], "3,,");
    }

    #[test]
    fn test_write_csv_to_buffer_matches_file_layout() {
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &sample()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("MONTH,2013,2014\n1,2,\n"));
    }
}
