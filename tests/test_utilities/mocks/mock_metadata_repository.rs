use async_trait::async_trait;
use maven_clients::prelude::*;
use maven_clients::shared::error::CollectorError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock MetadataRepository backed by in-memory version lists and POM dependencies
///
/// Identities without registered versions fail to resolve.
#[derive(Default, Clone)]
pub struct MockMetadataRepository {
    versions: HashMap<String, Vec<String>>,
    dependencies: HashMap<String, Vec<String>>,
    pub descriptor_requests: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, identity: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            identity.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_dependencies(mut self, version: &str, dependencies: &[&str]) -> Self {
        self.dependencies.insert(
            version.to_string(),
            dependencies.iter().map(|d| d.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl MetadataRepository for MockMetadataRepository {
    async fn resolve_versions(&self, identity: &ComponentIdentity) -> Result<Vec<ComponentVersion>> {
        let Some(versions) = self.versions.get(&identity.to_string()) else {
            return Err(CollectorError::Resolution {
                coordinates: identity.to_string(),
                details: "unknown to mock".to_string(),
            }
            .into());
        };
        versions.iter().map(|v| identity.with_version(v)).collect()
    }

    async fn fetch_dependencies(
        &self,
        version: &ComponentVersion,
        _context: &WorkingContext,
    ) -> Result<Vec<ComponentVersion>> {
        self.descriptor_requests
            .lock()
            .unwrap()
            .push(version.canonical());

        match self.dependencies.get(&version.canonical()) {
            Some(dependencies) => dependencies
                .iter()
                .map(|d| d.parse::<ComponentVersion>())
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}
