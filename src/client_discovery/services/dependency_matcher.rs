use crate::client_discovery::domain::{ComponentVersion, DependencyEdge};

/// Decides whether a consumer's declared dependencies contain a target version.
///
/// Matching is exact on group, artifact and version. A consumer that depends on
/// another version of the same artifact, or on a version range containing the
/// target, is not a match. Transitive dependencies are never considered.
pub struct DependencyMatcher;

impl DependencyMatcher {
    /// Returns the edge `consumer -> target` if `dependencies` declares the target.
    pub fn find_edge(
        target: &ComponentVersion,
        consumer: &ComponentVersion,
        dependencies: &[ComponentVersion],
    ) -> Option<DependencyEdge> {
        Self::is_direct_dependency(target, dependencies)
            .then(|| DependencyEdge::new(consumer.clone(), target.clone()))
    }

    pub fn is_direct_dependency(target: &ComponentVersion, dependencies: &[ComponentVersion]) -> bool {
        dependencies.iter().any(|dependency| dependency == target)
    }
}
