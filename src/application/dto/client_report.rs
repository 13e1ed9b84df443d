use crate::client_discovery::domain::ClientResultSet;
use chrono::{DateTime, Utc};

/// ClientReport - Response DTO handed to formatters
///
/// Wraps the collected result set with the coordinates the user asked for
/// and the time the report was produced.
#[derive(Debug, Clone)]
pub struct ClientReport {
    /// Coordinates as requested (`group:artifact` or `group:artifact:version`)
    pub requested: String,
    pub generated_at: DateTime<Utc>,
    pub results: ClientResultSet,
}

impl ClientReport {
    pub fn new(requested: impl Into<String>, results: ClientResultSet) -> Self {
        Self {
            requested: requested.into(),
            generated_at: Utc::now(),
            results,
        }
    }
}
