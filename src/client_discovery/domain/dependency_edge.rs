use super::ComponentVersion;
use std::fmt;

/// Asserts that `consumer` directly declares `dependee` as a dependency.
///
/// Edges only exist while a candidate is being verified; they are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    consumer: ComponentVersion,
    dependee: ComponentVersion,
}

impl DependencyEdge {
    pub fn new(consumer: ComponentVersion, dependee: ComponentVersion) -> Self {
        Self { consumer, dependee }
    }

    pub fn consumer(&self) -> &ComponentVersion {
        &self.consumer
    }

    pub fn dependee(&self) -> &ComponentVersion {
        &self.dependee
    }

    pub fn into_consumer(self) -> ComponentVersion {
        self.consumer
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.consumer, self.dependee)
    }
}
