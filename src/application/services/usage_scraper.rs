use super::RetryingExecutor;
use crate::client_discovery::domain::{ComponentIdentity, ComponentVersion};
use crate::client_discovery::services::CandidateExtractor;
use crate::ports::outbound::UsageIndex;
use crate::shared::Result;
use futures::stream::{self, Stream, TryStreamExt};

const FIRST_PAGE: u32 = 1;

/// Walks the usage index pages of a target version.
///
/// Pages are pulled one at a time through the executor. The first page without
/// any rows ends the walk; the index gives no other end-of-results signal.
pub struct UsageScraper<'a, U> {
    index: &'a U,
    executor: &'a RetryingExecutor,
}

impl<'a, U: UsageIndex> UsageScraper<'a, U> {
    pub fn new(index: &'a U, executor: &'a RetryingExecutor) -> Self {
        Self { index, executor }
    }

    /// Lazy stream of the candidates found on each page, in page order.
    ///
    /// The stream is finite: it ends on the first empty page, or right after
    /// yielding an error.
    pub fn pages(
        &self,
        target: &'a ComponentVersion,
    ) -> impl Stream<Item = Result<Vec<ComponentIdentity>>> + 'a {
        let index = self.index;
        let executor = self.executor;

        stream::unfold(Some(FIRST_PAGE), move |next_page| async move {
            let page = next_page?;
            let operation = format!("usages page {} of {}", page, target);

            match executor
                .execute(&operation, || index.fetch_usage_page(target, page))
                .await
            {
                Ok(usage) if usage.is_empty() => {
                    tracing::debug!(%target, page, "empty usages page, stopping");
                    None
                }
                Ok(usage) => {
                    let candidates = CandidateExtractor::extract(&usage);
                    tracing::debug!(%target, page, candidates = candidates.len(), "scraped usages page");
                    Some((Ok(candidates), page.checked_add(1)))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Every candidate across all pages, repeats included.
    pub async fn collect_candidates(
        &self,
        target: &'a ComponentVersion,
    ) -> Result<Vec<ComponentIdentity>> {
        self.pages(target).try_concat().await
    }
}
