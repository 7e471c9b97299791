//! Mock report generator.
//!
//! Every report type maps to a fixed record of example metrics. The record is
//! rendered as pretty JSON, `key,value` CSV lines, or a text placeholder for
//! PDF. Field order is part of the output and is kept as declared here.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::{ReportFormat, ReportRequest, ReportType};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Metric {
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl Metric {
    fn to_json(self) -> Value {
        match self {
            Self::Int(v) => Value::from(v),
            Self::Float(v) => Value::from(v),
            Self::Text(v) => Value::from(v),
        }
    }

    fn to_csv(self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(v) => v.to_owned(),
        }
    }
}

fn mock_record(kind: ReportType) -> &'static [(&'static str, Metric)] {
    match kind {
        ReportType::Sales => {
            &[("revenue", Metric::Int(45_000)), ("orders", Metric::Int(1_200)), ("period", Metric::Text("Last 30 days"))]
        }
        ReportType::Customers => &[("total", Metric::Int(850)), ("new", Metric::Int(200)), ("clv", Metric::Int(18_500))],
        ReportType::Performance => {
            &[("lcp", Metric::Float(1.9)), ("fid", Metric::Int(41)), ("cls", Metric::Float(0.07))]
        }
        ReportType::Revenue => &[("total", Metric::Int(328_000)), ("growth", Metric::Float(12.5))],
        ReportType::Orders => &[("total", Metric::Int(8_800)), ("average", Metric::Float(149.99))],
        ReportType::Custom => &[("data", Metric::Text("Custom report data"))],
    }
}

/// The example metrics for `kind` as an ordered JSON object.
#[must_use]
pub fn report_data(kind: ReportType) -> Map<String, Value> {
    mock_record(kind)
        .iter()
        .map(|(key, metric)| ((*key).to_owned(), metric.to_json()))
        .collect()
}

fn pretty_json(kind: ReportType) -> String {
    // A map of plain scalars always serializes.
    serde_json::to_string_pretty(&report_data(kind)).unwrap_or_default()
}

/// Render a report without the simulated delay.
#[must_use]
pub fn render_report(request: &ReportRequest) -> String {
    match request.format {
        ReportFormat::Json => pretty_json(request.kind),
        ReportFormat::Csv => mock_record(request.kind)
            .iter()
            .map(|(key, metric)| format!("{key},{}", metric.to_csv()))
            .collect::<Vec<_>>()
            .join("\n"),
        ReportFormat::Pdf => format!("PDF Report: {}", pretty_json(request.kind)),
    }
}

/// A rendered report ready to be returned or attached to an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedReport {
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub format: ReportFormat,
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
}

impl GeneratedReport {
    #[must_use]
    pub fn render(request: &ReportRequest) -> Self {
        Self {
            kind: request.kind,
            format: request.format,
            filename: request.filename(),
            content_type: request.format.content_type(),
            content: render_report(request),
        }
    }
}

/// Generate a report after the simulated processing delay. Never fails.
pub async fn generate_report(request: &ReportRequest, delay: Duration) -> GeneratedReport {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    GeneratedReport::render(request)
}

// =============================================================================
// CATALOG
// =============================================================================

/// An entry on the dashboard's list of available reports.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub name: &'static str,
    pub description: &'static str,
}

#[must_use]
pub fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            kind: ReportType::Sales,
            name: "Sales Report",
            description: "Daily sales trends, total revenue, and order statistics",
        },
        CatalogEntry {
            kind: ReportType::Revenue,
            name: "Revenue Report",
            description: "Quarterly revenue data with growth metrics",
        },
        CatalogEntry {
            kind: ReportType::Performance,
            name: "Performance Report",
            description: "Application performance metrics from New Relic",
        },
        CatalogEntry {
            kind: ReportType::Customers,
            name: "Customers Report",
            description: "Customer statistics, CLV, and CAC",
        },
    ]
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
