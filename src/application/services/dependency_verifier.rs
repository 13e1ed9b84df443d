use super::RetryingExecutor;
use crate::client_discovery::domain::{ComponentVersion, DependencyEdge};
use crate::client_discovery::services::DependencyMatcher;
use crate::ports::outbound::MetadataRepository;
use crate::shared::{Result, WorkingContext};

/// Checks whether a candidate version declares the target as a direct dependency.
pub struct DependencyVerifier<'a, M> {
    repository: &'a M,
    executor: &'a RetryingExecutor,
}

impl<'a, M: MetadataRepository> DependencyVerifier<'a, M> {
    pub fn new(repository: &'a M, executor: &'a RetryingExecutor) -> Self {
        Self {
            repository,
            executor,
        }
    }

    /// Fetches the candidate's descriptor (retried per policy) and returns the
    /// edge `candidate -> target` when it declares the exact target version.
    pub async fn find_edge(
        &self,
        target: &ComponentVersion,
        candidate: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Option<DependencyEdge>> {
        let operation = format!("dependencies of {}", candidate);
        let dependencies = self
            .executor
            .execute(&operation, || {
                self.repository.fetch_dependencies(candidate, context)
            })
            .await?;

        Ok(DependencyMatcher::find_edge(target, candidate, &dependencies))
    }
}
