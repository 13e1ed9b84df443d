use crate::client_discovery::domain::{ComponentIdentity, ComponentVersion};
use crate::shared::{Result, WorkingContext};
use async_trait::async_trait;

/// MetadataRepository port for authoritative package metadata
///
/// This port abstracts the repository (e.g., Maven Central) that knows which
/// versions of a component were published and what each version declares
/// as its direct dependencies.
///
/// # Async Support
/// Implementations must be `Send + Sync` so verification can run concurrently.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Resolves every published version of `identity` (the open range `[0,)`)
    ///
    /// # Returns
    /// Versions in the order the repository reports them. An identity that
    /// exists but has no versions yields an empty list.
    ///
    /// # Errors
    /// Returns `CollectorError::Resolution` when the identity cannot be
    /// resolved (unknown artifact), or a fetch error for network failures.
    async fn resolve_versions(&self, identity: &ComponentIdentity) -> Result<Vec<ComponentVersion>>;

    /// Reads the direct dependencies declared by `version`
    ///
    /// # Arguments
    /// * `version` - The component version whose descriptor is read
    /// * `context` - Disposable working area for downloaded descriptors
    ///
    /// # Returns
    /// Declared dependencies with their resolved versions, all scopes included.
    ///
    /// # Errors
    /// Returns an error if the descriptor cannot be fetched. Callers treat
    /// such errors as transient and retry.
    async fn fetch_dependencies(
        &self,
        version: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Vec<ComponentVersion>>;
}
