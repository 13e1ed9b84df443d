use crate::application::dto::CollectorSettings;
use crate::application::services::{
    DependencyVerifier, RetryingExecutor, UsageScraper, VersionEnumerator,
};
use crate::client_discovery::domain::{ClientResultSet, ComponentIdentity, ComponentVersion};
use crate::ports::outbound::{MetadataRepository, ProgressReporter, UsageIndex};
use crate::shared::error::CollectorError;
use crate::shared::{RateLimiter, Result, WorkingContext};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// CollectClientsUseCase - Finds the published artifacts that depend on a target
///
/// Candidates come from the usage index and are confirmed one version at a
/// time against the metadata repository. Each external service is called
/// through its own rate limiter and retry executor, both owned by this use case.
///
/// # Type Parameters
/// * `M` - MetadataRepository implementation
/// * `U` - UsageIndex implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectClientsUseCase<M, U, PR> {
    metadata_repository: M,
    usage_index: U,
    progress_reporter: PR,
    metadata_executor: RetryingExecutor,
    usage_executor: RetryingExecutor,
    concurrency: usize,
}

impl<M, U, PR> CollectClientsUseCase<M, U, PR>
where
    M: MetadataRepository,
    U: UsageIndex,
    PR: ProgressReporter,
{
    /// Creates a new CollectClientsUseCase with injected dependencies
    ///
    /// # Errors
    /// Returns a validation error if the settings carry an invalid rate or concurrency
    pub fn new(
        metadata_repository: M,
        usage_index: U,
        progress_reporter: PR,
        settings: CollectorSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let metadata_limiter = RateLimiter::per_second("metadata repository", settings.metadata_rate)?;
        let usage_limiter = RateLimiter::per_second("usage index", settings.usage_index_rate)?;

        Ok(Self {
            metadata_repository,
            usage_index,
            progress_reporter,
            metadata_executor: RetryingExecutor::new(
                Arc::new(metadata_limiter),
                settings.retry_policy.clone(),
            ),
            usage_executor: RetryingExecutor::new(Arc::new(usage_limiter), settings.retry_policy),
            concurrency: settings.concurrency,
        })
    }

    /// Every published version of `identity`
    ///
    /// # Errors
    /// Returns `CollectorError::Resolution` when the identity does not resolve,
    /// or the last lookup error once the retry policy gives up
    pub async fn collect_available_versions(
        &self,
        identity: &ComponentIdentity,
    ) -> Result<Vec<ComponentVersion>> {
        VersionEnumerator::new(&self.metadata_repository, &self.metadata_executor)
            .enumerate(identity)
            .await
    }

    /// Collects the clients of every published version of `identity`
    ///
    /// An identity that does not resolve yields an empty result set. A target
    /// version whose usages cannot be scraped gets an empty entry and is
    /// recorded as incomplete; the other versions are still processed.
    ///
    /// # Errors
    /// Returns an error when the version lookup fails for a reason other than
    /// resolution and the retry policy gives up on it
    pub async fn collect_clients_of(&self, identity: &ComponentIdentity) -> Result<ClientResultSet> {
        self.progress_reporter
            .report(&format!("📦 Resolving versions of {}...", identity));

        let versions = match self.collect_available_versions(identity).await {
            Ok(versions) => versions,
            Err(e) if is_resolution(&e) => {
                tracing::warn!(%identity, error = %e, "couldn't resolve version range");
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Couldn't resolve versions of {}; nothing to collect.",
                    identity
                ));
                return Ok(ClientResultSet::new());
            }
            Err(e) => return Err(e),
        };

        self.progress_reporter
            .report(&format!("✅ Found {} version(s)", versions.len()));

        let context = WorkingContext::create()?;
        let mut results = ClientResultSet::new();

        for (index, target) in versions.iter().enumerate() {
            self.progress_reporter.report(&format!(
                "🔍 [{}/{}] Collecting clients of {}",
                index + 1,
                versions.len(),
                target
            ));

            match self.clients_with_context(target, &context).await {
                Ok(collected) => self.record(&mut results, target, collected),
                Err(e) => {
                    tracing::error!(%target, error = %e, "couldn't scrape usages");
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Usages of {} could not be collected; its result is incomplete.",
                        target
                    ));
                    results.put_all(target.clone(), Vec::new());
                    results.mark_incomplete(target.clone(), format!("{:#}", e));
                }
            }
        }

        self.progress_reporter.report_completion(&format!(
            "Found {} clients of {}",
            results.total_clients(),
            identity
        ));

        Ok(results)
    }

    /// Collects the clients of a single target version
    ///
    /// Candidates that could not be checked leave the target marked incomplete.
    ///
    /// # Errors
    /// Returns an error only if scraping the target's usages fails
    pub async fn collect_clients_of_version(
        &self,
        target: &ComponentVersion,
    ) -> Result<ClientResultSet> {
        let context = WorkingContext::create()?;
        let collected = self.clients_with_context(target, &context).await?;

        let mut results = ClientResultSet::new();
        self.record(&mut results, target, collected);

        self.progress_reporter.report_completion(&format!(
            "Found {} clients of {}",
            results.total_clients(),
            target
        ));

        Ok(results)
    }

    fn record(&self, results: &mut ClientResultSet, target: &ComponentVersion, collected: Collected) {
        results.put_all(target.clone(), collected.clients);

        if let Some(first) = collected.unchecked.first() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} candidate(s) of {} could not be checked; its result is incomplete.",
                collected.unchecked.len(),
                target
            ));
            results.mark_incomplete(
                target.clone(),
                format!(
                    "{} candidate(s) could not be checked, first: {}",
                    collected.unchecked.len(),
                    first
                ),
            );
        }
    }

    async fn clients_with_context(
        &self,
        target: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Collected> {
        let candidates = UsageScraper::new(&self.usage_index, &self.usage_executor)
            .collect_candidates(target)
            .await?;
        let candidates = distinct(candidates);

        self.progress_reporter.report(&format!(
            "   - {} candidate artifact(s) listed as users of {}",
            candidates.len(),
            target
        ));

        let mut collected = Collected::default();
        let candidate_versions = self.enumerate_candidates(&candidates, &mut collected).await;
        self.verify_candidates(target, &candidate_versions, context, &mut collected)
            .await;
        Ok(collected)
    }

    /// Versions of every candidate
    ///
    /// Candidates that don't resolve are skipped; lookups the retry policy gave
    /// up on are recorded as unchecked.
    async fn enumerate_candidates(
        &self,
        candidates: &[ComponentIdentity],
        collected: &mut Collected,
    ) -> Vec<ComponentVersion> {
        let enumerator = VersionEnumerator::new(&self.metadata_repository, &self.metadata_executor);
        let mut versions = Vec::new();

        for candidate in candidates {
            match enumerator.enumerate(candidate).await {
                Ok(found) => versions.extend(found),
                Err(e) if is_resolution(&e) => {
                    tracing::warn!(%candidate, error = %e, "skipping candidate without versions");
                }
                Err(e) => {
                    tracing::error!(%candidate, error = %e, "couldn't list candidate versions");
                    collected.unchecked.push(format!("{}: {:#}", candidate, e));
                }
            }
        }

        versions
    }

    async fn verify_candidates(
        &self,
        target: &ComponentVersion,
        candidates: &[ComponentVersion],
        context: &WorkingContext,
        collected: &mut Collected,
    ) {
        let verifier = DependencyVerifier::new(&self.metadata_repository, &self.metadata_executor);
        let verifier = &verifier;
        let total = candidates.len();

        let mut pending = stream::iter(candidates)
            .map(|candidate| async move {
                (candidate, verifier.find_edge(target, candidate, context).await)
            })
            .buffer_unordered(self.concurrency);

        let mut checked = 0;
        while let Some((candidate, outcome)) = pending.next().await {
            checked += 1;
            self.progress_reporter
                .report_progress(checked, total, Some(&candidate.to_string()));

            match outcome {
                Ok(Some(edge)) => {
                    tracing::info!(%edge, "confirmed client");
                    collected.clients.push(edge.into_consumer());
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(%candidate, error = %e, "couldn't verify candidate");
                    collected.unchecked.push(format!("{}: {:#}", candidate, e));
                }
            }
        }
    }
}

/// Confirmed clients of one target plus the candidates that couldn't be checked
#[derive(Default)]
struct Collected {
    clients: Vec<ComponentVersion>,
    unchecked: Vec<String>,
}

fn is_resolution(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<CollectorError>()
        .is_some_and(CollectorError::is_resolution)
}

/// Drops repeated identities, keeping first-seen order
fn distinct(candidates: Vec<ComponentIdentity>) -> Vec<ComponentIdentity> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}
