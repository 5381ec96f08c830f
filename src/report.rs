//! Assembly of the render context: summary numbers, chart series and the
//! table preview, built from one enriched dataset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{Chart, all_charts};
use crate::config::ReportOptions;
use crate::enrich::enrich_all;
use crate::error::PipelineError;
use crate::fetch::load_source;
use crate::parser::parse_passengers;
use crate::passenger::Passenger;
use crate::stats::SummaryStats;

/// Enriched passengers. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct Dataset {
    passengers: Vec<Passenger>,
}

impl Dataset {
    pub fn new(mut passengers: Vec<Passenger>) -> Self {
        enrich_all(&mut passengers);
        Self { passengers }
    }

    pub fn from_text(text: &str) -> Result<Self, PipelineError> {
        Ok(Self::new(parse_passengers(text)?))
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

/// One line of the passenger table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub class: String,
    pub status: String,
    pub fare: String,
    pub port: String,
}

impl TableRow {
    pub fn from_passenger(p: &Passenger) -> Self {
        TableRow {
            name: p.name.split(',').next().unwrap_or_default().to_string(),
            age: p.age.map_or_else(|| "Unknown".to_string(), |a| a.to_string()),
            sex: p.derived.sex_display.clone(),
            class: p.derived.class_display.clone(),
            status: if p.survived { "Survived" } else { "Died" }.to_string(),
            fare: p
                .fare
                .map_or_else(|| "Unknown".to_string(), |f| format!("${f:.2}")),
            port: p.derived.port_display.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryStats,
    pub charts: Vec<Chart>,
    pub table: Vec<TableRow>,
}

impl Report {
    pub fn build(dataset: &Dataset, options: &ReportOptions) -> Self {
        let passengers = dataset.passengers();

        Report {
            generated_at: Utc::now(),
            summary: SummaryStats::from_passengers(passengers),
            charts: all_charts(passengers, options.min_family_group),
            table: passengers
                .iter()
                .take(options.table_limit)
                .map(TableRow::from_passenger)
                .collect(),
        }
    }

    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }
}

/// Loads `source`, then parses, enriches and aggregates it into a [`Report`].
///
/// # Errors
///
/// Fails as a whole with [`PipelineError::FetchFailed`] or
/// [`PipelineError::ParseFailed`]; no partial report is produced.
#[tracing::instrument(skip(options))]
pub async fn load_report(source: &str, options: &ReportOptions) -> Result<Report, PipelineError> {
    let text = load_source(source).await?;
    let dataset = Dataset::from_text(&text)?;
    let report = Report::build(&dataset, options);

    info!(
        passengers = dataset.len(),
        charts = report.charts.len(),
        table_rows = report.table.len(),
        "Report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::{Port, Sex};

    #[test]
    fn test_table_row_formatting() {
        let dataset = Dataset::new(vec![Passenger {
            name: "Braund, Mr. Owen Harris".to_string(),
            sex: Sex::Male,
            pclass: 3,
            age: Some(22.0),
            fare: Some(7.25),
            embarked: Some(Port::Southampton),
            ..Default::default()
        }]);

        let row = TableRow::from_passenger(&dataset.passengers()[0]);
        assert_eq!(
            row,
            TableRow {
                name: "Braund".into(),
                age: "22".into(),
                sex: "Male".into(),
                class: "Class 3".into(),
                status: "Died".into(),
                fare: "$7.25".into(),
                port: "Southampton".into(),
            }
        );
    }

    #[test]
    fn test_table_row_unknowns() {
        let dataset = Dataset::new(vec![Passenger {
            name: "Laina".to_string(),
            survived: true,
            age: Some(0.42),
            ..Default::default()
        }]);

        let row = TableRow::from_passenger(&dataset.passengers()[0]);
        assert_eq!(row.name, "Laina");
        assert_eq!(row.age, "0.42");
        assert_eq!(row.status, "Survived");
        assert_eq!(row.fare, "Unknown");
        assert_eq!(row.port, "Unknown");
    }

    #[test]
    fn test_report_table_is_capped() {
        let passengers = (0..30)
            .map(|i| Passenger {
                id: i,
                ..Default::default()
            })
            .collect();
        let dataset = Dataset::new(passengers);

        let report = Report::build(&dataset, &ReportOptions::default());
        assert_eq!(report.table.len(), 20);
        assert_eq!(report.summary.total_passengers, 30);
        assert_eq!(report.charts.len(), 6);
        assert!(report.chart("family").is_some());
        assert!(report.chart("missing").is_none());
    }

    #[test]
    fn test_dataset_from_text_enriches() {
        let dataset = Dataset::from_text("Survived,Pclass,Sex,SibSp,Parch\n1,2,female,1,1\n").unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.passengers()[0].derived.family_size, 3);
        assert_eq!(dataset.passengers()[0].derived.class_display, "Class 2");
    }
}
