use crate::application::dto::ClientReport;
use crate::ports::outbound::ClientReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// TextFormatter adapter producing a plain-text summary
///
/// The first line is always `Found N clients of <coordinates>`, followed by
/// one block per target version and, if any, the incomplete targets.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn plural(count: usize) -> &'static str {
        if count == 1 {
            "client"
        } else {
            "clients"
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientReportFormatter for TextFormatter {
    fn format(&self, report: &ClientReport) -> Result<String> {
        let results = &report.results;
        let mut output = String::new();

        writeln!(
            output,
            "Found {} clients of {}",
            results.total_clients(),
            report.requested
        )?;

        for entry in results.entries() {
            let clients = entry.clients();
            writeln!(output)?;
            writeln!(
                output,
                "{} ({} {})",
                entry.target(),
                clients.len(),
                Self::plural(clients.len())
            )?;
            for client in clients {
                writeln!(output, "  - {}", client)?;
            }
        }

        if !results.is_complete() {
            writeln!(output)?;
            writeln!(output, "Incomplete targets (usages could not be scraped):")?;
            for incomplete in results.incomplete() {
                let reason = incomplete.reason().lines().next().unwrap_or_default();
                writeln!(output, "  - {}: {}", incomplete.target(), reason)?;
            }
        }

        Ok(output)
    }
}
