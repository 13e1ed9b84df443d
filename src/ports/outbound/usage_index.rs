use crate::client_discovery::domain::{ComponentVersion, UsagePage};
use crate::shared::Result;
use async_trait::async_trait;

/// UsageIndex port for the best-effort "who uses this" web index
///
/// This port abstracts the page-by-page listing of likely consumers of a
/// component version (e.g., mvnrepository.com usage pages). Results are
/// unverified and may be incomplete.
#[async_trait]
pub trait UsageIndex: Send + Sync {
    /// Fetches one page of usages of `target`
    ///
    /// # Arguments
    /// * `target` - The component version whose consumers are listed
    /// * `page` - 1-based page number
    ///
    /// # Returns
    /// The rows found on the page. An empty page means there are no more pages.
    ///
    /// # Errors
    /// Returns an error on network failures, timeouts or non-2xx responses.
    async fn fetch_usage_page(&self, target: &ComponentVersion, page: u32) -> Result<UsagePage>;
}
