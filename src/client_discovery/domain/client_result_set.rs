use super::ComponentVersion;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Confirmed clients of one target version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetClients {
    target: ComponentVersion,
    clients: Vec<ComponentVersion>,
}

impl TargetClients {
    pub fn target(&self) -> &ComponentVersion {
        &self.target
    }

    pub fn clients(&self) -> &[ComponentVersion] {
        &self.clients
    }
}

/// A target version whose clients could not be collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteTarget {
    target: ComponentVersion,
    reason: String,
}

impl IncompleteTarget {
    pub fn target(&self) -> &ComponentVersion {
        &self.target
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Mapping from target versions to the consumer versions confirmed to depend on them.
///
/// Behaves like a multimap: clients are appended as found and duplicates are
/// kept. Callers that need set semantics use [`ClientResultSet::as_sets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientResultSet {
    targets: Vec<TargetClients>,
    incomplete: Vec<IncompleteTarget>,
}

impl ClientResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `clients` to the entry of `target`, creating the entry if needed.
    ///
    /// Passing no clients still records the target, so versions without
    /// clients show up in reports.
    pub fn put_all(
        &mut self,
        target: ComponentVersion,
        clients: impl IntoIterator<Item = ComponentVersion>,
    ) {
        match self.targets.iter_mut().find(|entry| entry.target == target) {
            Some(entry) => entry.clients.extend(clients),
            None => self.targets.push(TargetClients {
                target,
                clients: clients.into_iter().collect(),
            }),
        }
    }

    pub fn mark_incomplete(&mut self, target: ComponentVersion, reason: impl Into<String>) {
        self.incomplete.push(IncompleteTarget {
            target,
            reason: reason.into(),
        });
    }

    /// Clients recorded for `target`; empty when the target is unknown.
    pub fn clients_of(&self, target: &ComponentVersion) -> &[ComponentVersion] {
        self.targets
            .iter()
            .find(|entry| &entry.target == target)
            .map(|entry| entry.clients.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[TargetClients] {
        &self.targets
    }

    pub fn incomplete(&self) -> &[IncompleteTarget] {
        &self.incomplete
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Total number of (target, client) pairs, duplicates included
    pub fn total_clients(&self) -> usize {
        self.targets.iter().map(|entry| entry.clients.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_clients() == 0
    }

    /// Canonical, order-independent view used to compare two runs.
    pub fn as_sets(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.targets
            .iter()
            .map(|entry| {
                (
                    entry.target.canonical(),
                    entry.clients.iter().map(ComponentVersion::canonical).collect(),
                )
            })
            .collect()
    }
}
