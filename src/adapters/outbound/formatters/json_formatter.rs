use crate::application::dto::ClientReport;
use crate::client_discovery::domain::ClientResultSet;
use crate::ports::outbound::ClientReportFormatter;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    requested: &'a str,
    generated_at: DateTime<Utc>,
    tool: &'static str,
    version: &'static str,
    total_clients: usize,
    complete: bool,
    #[serde(flatten)]
    results: &'a ClientResultSet,
}

/// JsonFormatter adapter producing a pretty-printed JSON document
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientReportFormatter for JsonFormatter {
    fn format(&self, report: &ClientReport) -> Result<String> {
        let document = JsonReport {
            requested: &report.requested,
            generated_at: report.generated_at,
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            total_clients: report.results.total_clients(),
            complete: report.results.is_complete(),
            results: &report.results,
        };

        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}
