//! Output formatting and persistence for reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export of the table.

use std::fs::File;
use std::io::BufWriter;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::report::{Report, TableRow};
use crate::stats::SummaryStats;
use csv::WriterBuilder;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<(), PipelineError> {
    let json =
        serde_json::to_string_pretty(report).map_err(|e| PipelineError::Output(e.to_string()))?;
    info!("{}", json);
    Ok(())
}

/// Writes the report as JSON to `path`, replacing any existing file.
pub fn write_json(path: &str, report: &Report) -> Result<(), PipelineError> {
    debug!(path, "Writing report JSON");
    let file = File::create(path).map_err(|e| PipelineError::Output(format!("{path}: {e}")))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(|e| PipelineError::Output(format!("{path}: {e}")))
}

/// Writes table rows to a CSV file at `path` with a header row.
pub fn write_table_csv(path: &str, rows: &[TableRow]) -> Result<(), PipelineError> {
    debug!(path, rows = rows.len(), "Writing table CSV");
    let to_err = |e: csv::Error| PipelineError::Output(format!("{path}: {e}"));

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(to_err)?;

    for row in rows {
        writer.serialize(row).map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|e| PipelineError::Output(format!("{path}: {e}")))?;

    Ok(())
}

/// Writes the report JSON (or logs it when `json_path` is `None`) and the
/// optional table CSV. Either every requested file is written or none is:
/// on failure, files written by this call are removed again.
pub fn write_outputs(
    report: &Report,
    json_path: Option<&str>,
    table_csv_path: Option<&str>,
) -> Result<(), PipelineError> {
    let mut written = Vec::new();
    let result = write_requested(report, json_path, table_csv_path, &mut written);

    if result.is_err() {
        for path in written {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path, error = %e, "Failed to remove partial output");
            }
        }
    }
    result
}

fn write_requested<'a>(
    report: &Report,
    json_path: Option<&'a str>,
    table_csv_path: Option<&'a str>,
    written: &mut Vec<&'a str>,
) -> Result<(), PipelineError> {
    match json_path {
        Some(path) => {
            write_json(path, report)?;
            written.push(path);
        }
        None => print_json(report)?,
    }
    if let Some(path) = table_csv_path {
        write_table_csv(path, &report.table)?;
        written.push(path);
    }
    Ok(())
}

/// Formats an integer with `,` thousands separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The four summary-card strings, in display order.
pub fn summary_lines(summary: &SummaryStats) -> Vec<String> {
    vec![
        format!("Total passengers: {}", format_number(summary.total_passengers)),
        format!("Survived: {}", format_number(summary.survived)),
        format!("Survival rate: {:.1}%", summary.survival_rate),
        format!("Female passengers: {:.1}%", summary.female_ratio),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportOptions;
    use crate::report::Dataset;
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_report() -> Report {
        let dataset = Dataset::from_text(
            "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
             1,0,3,Braund,male,22,1,0,A/5,7.25,,S\n\
             2,1,1,Cumings,female,38,1,0,PC,71.2833,C85,C\n",
        )
        .unwrap();
        Report::build(&dataset, &ReportOptions::default())
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_write_json_round_trips_as_value() {
        let path = temp_path("passenger_survival_test_report.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &sample_report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_passengers"], 2);
        assert_eq!(value["charts"][0]["kind"], "bar");
        assert_eq!(value["table"][1]["fare"], "$71.28");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_csv_has_header_and_rows() {
        let path = temp_path("passenger_survival_test_table.csv");
        let _ = fs::remove_file(&path);

        let report = sample_report();
        write_table_csv(&path, &report.table).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,age,sex,class,status,fare,port");
        assert_eq!(lines[1], "Braund,22,Male,Class 3,Died,$7.25,Southampton");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_csv_overwrites() {
        let path = temp_path("passenger_survival_test_overwrite.csv");
        let report = sample_report();
        write_table_csv(&path, &report.table).unwrap();
        write_table_csv(&path, &report.table[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_outputs_writes_both_files() {
        let json = temp_path("passenger_survival_test_outputs.json");
        let table = temp_path("passenger_survival_test_outputs.csv");

        write_outputs(&sample_report(), Some(json.as_str()), Some(table.as_str())).unwrap();

        assert!(Path::new(&json).exists());
        assert!(Path::new(&table).exists());
        fs::remove_file(&json).unwrap();
        fs::remove_file(&table).unwrap();
    }

    #[test]
    fn test_write_outputs_removes_json_when_table_fails() {
        let json = temp_path("passenger_survival_test_partial.json");
        let table = temp_path("passenger_survival_missing_dir/table.csv");
        let _ = fs::remove_file(&json);

        let result = write_outputs(&sample_report(), Some(json.as_str()), Some(table.as_str()));

        assert!(matches!(result, Err(PipelineError::Output(_))));
        assert!(!Path::new(&json).exists());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(891), "891");
        assert_eq!(format_number(1309), "1,309");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&sample_report().summary);
        assert_eq!(
            lines,
            vec![
                "Total passengers: 2",
                "Survived: 1",
                "Survival rate: 50.0%",
                "Female passengers: 50.0%",
            ]
        );
    }
}
