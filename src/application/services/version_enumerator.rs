use super::RetryingExecutor;
use crate::client_discovery::domain::{ComponentIdentity, ComponentVersion};
use crate::ports::outbound::MetadataRepository;
use crate::shared::Result;

/// Lists the published versions of a component.
///
/// Lookups go through the metadata executor like every other call. A
/// `CollectorError::Resolution` (unknown component) comes back after one
/// attempt; network and status failures are retried per policy.
pub struct VersionEnumerator<'a, M> {
    repository: &'a M,
    executor: &'a RetryingExecutor,
}

impl<'a, M: MetadataRepository> VersionEnumerator<'a, M> {
    pub fn new(repository: &'a M, executor: &'a RetryingExecutor) -> Self {
        Self {
            repository,
            executor,
        }
    }

    pub async fn enumerate(&self, identity: &ComponentIdentity) -> Result<Vec<ComponentVersion>> {
        let operation = format!("versions of {}", identity);
        self.executor
            .execute(&operation, || self.repository.resolve_versions(identity))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_discovery::policies::{Backoff, RetryPolicy};
    use crate::shared::error::CollectorError;
    use crate::shared::{RateLimiter, WorkingContext};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Answers with `versions` after `failures` throttled calls; `None` means unknown.
    struct FixedRepository {
        versions: Option<Vec<&'static str>>,
        failures: u32,
        calls: AtomicU32,
    }

    impl FixedRepository {
        fn new(versions: Option<Vec<&'static str>>) -> Self {
            Self {
                versions,
                failures: 0,
                calls: AtomicU32::new(0),
            }
        }

        fn throttled(mut self, failures: u32) -> Self {
            self.failures = failures;
            self
        }
    }

    #[async_trait]
    impl MetadataRepository for FixedRepository {
        async fn resolve_versions(
            &self,
            identity: &ComponentIdentity,
        ) -> Result<Vec<ComponentVersion>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(CollectorError::UnexpectedStatus {
                    service: "Maven repository",
                    status: 503,
                    url: "https://repo1.maven.org/maven2/x/a/maven-metadata.xml".to_string(),
                }
                .into());
            }
            match &self.versions {
                Some(versions) => versions
                    .iter()
                    .map(|v| identity.with_version(*v))
                    .collect(),
                None => Err(CollectorError::Resolution {
                    coordinates: identity.to_string(),
                    details: "maven-metadata.xml not found".to_string(),
                }
                .into()),
            }
        }

        async fn fetch_dependencies(
            &self,
            _version: &ComponentVersion,
            _context: &WorkingContext,
        ) -> Result<Vec<ComponentVersion>> {
            Ok(Vec::new())
        }
    }

    fn executor(policy: RetryPolicy) -> RetryingExecutor {
        let limiter = RateLimiter::per_second("test", 1000.0).unwrap();
        RetryingExecutor::new(Arc::new(limiter), policy)
    }

    #[tokio::test]
    async fn test_keeps_repository_order() {
        let repository = FixedRepository::new(Some(vec!["1.0", "1.10", "1.2"]));
        let executor = executor(RetryPolicy::default());
        let identity = ComponentIdentity::new("x", "a").unwrap();

        let versions = VersionEnumerator::new(&repository, &executor)
            .enumerate(&identity)
            .await
            .unwrap();

        let versions: Vec<&str> = versions.iter().map(|v| v.version()).collect();
        assert_eq!(versions, vec!["1.0", "1.10", "1.2"]);
    }

    #[tokio::test]
    async fn test_zero_versions_is_empty_not_error() {
        let repository = FixedRepository::new(Some(Vec::new()));
        let executor = executor(RetryPolicy::default());
        let identity = ComponentIdentity::new("x", "a").unwrap();

        let versions = VersionEnumerator::new(&repository, &executor)
            .enumerate(&identity)
            .await
            .unwrap();
        assert!(versions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_identity_fails_after_one_attempt() {
        let repository = FixedRepository::new(None);
        let executor = executor(RetryPolicy::default());
        let identity = ComponentIdentity::new("x", "gone").unwrap();

        let error = VersionEnumerator::new(&repository, &executor)
            .enumerate(&identity)
            .await
            .unwrap_err();

        let error = error.downcast_ref::<CollectorError>().unwrap();
        assert!(error.is_resolution());
        assert!(error.to_string().contains("x:gone"));
        assert_eq!(repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_lookup_is_retried() {
        let repository = FixedRepository::new(Some(vec!["1.0"])).throttled(2);
        let executor = executor(RetryPolicy::default());
        let identity = ComponentIdentity::new("x", "a").unwrap();

        let versions = VersionEnumerator::new(&repository, &executor)
            .enumerate(&identity)
            .await
            .unwrap();

        assert_eq!(versions.len(), 1);
        assert_eq!(repository.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_lookup_is_not_a_resolution_error() {
        let repository = FixedRepository::new(Some(vec!["1.0"])).throttled(5);
        let policy = RetryPolicy::indefinite()
            .with_max_attempts(2)
            .with_backoff(Backoff::Fixed(Duration::from_millis(1)));
        let executor = executor(policy);
        let identity = ComponentIdentity::new("x", "a").unwrap();

        let error = VersionEnumerator::new(&repository, &executor)
            .enumerate(&identity)
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CollectorError>(),
            Some(CollectorError::RetriesExhausted { attempts: 2, .. })
        ));
    }
}
