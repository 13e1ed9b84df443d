use crate::application::dto::ClientReport;
use crate::shared::Result;

/// ClientReportFormatter port for rendering collection results
///
/// This port abstracts the formatting logic for the supported output
/// formats (plain text summary, JSON).
pub trait ClientReportFormatter {
    /// Formats a client report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &ClientReport) -> Result<String>;
}
