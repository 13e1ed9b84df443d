use crate::shared::error::CollectorError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum length for group and artifact ids (security limit)
const MAX_ID_LENGTH: usize = 255;

/// Maximum length for versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

fn validate_component(value: &str, kind: &str, max_length: usize) -> Result<()> {
    let invalid = |reason: String| CollectorError::InvalidCoordinates {
        input: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid(format!("{} cannot be empty", kind)).into());
    }

    if value.len() > max_length {
        return Err(invalid(format!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            kind,
            value.len(),
            max_length
        ))
        .into());
    }

    // ':' separates components in the canonical form, so it can never appear inside one
    if value.contains(':') {
        return Err(invalid(format!("{} cannot contain ':'", kind)).into());
    }

    validate_url_component(value, kind).map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

/// Version-independent coordinate pair identifying a publishable unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdentity {
    group: String,
    artifact: String,
}

impl ComponentIdentity {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Result<Self> {
        let group = group.into();
        let artifact = artifact.into();
        validate_component(&group, "Group id", MAX_ID_LENGTH)?;
        validate_component(&artifact, "Artifact id", MAX_ID_LENGTH)?;
        Ok(Self { group, artifact })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Pins this identity to a concrete version.
    pub fn with_version(&self, version: impl Into<String>) -> Result<ComponentVersion> {
        let version = version.into();
        validate_component(&version, "Version", MAX_VERSION_LENGTH)?;
        Ok(ComponentVersion {
            identity: self.clone(),
            version,
        })
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for ComponentIdentity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Coordinates::from_str(s)? {
            Coordinates::Identity(identity) => Ok(identity),
            Coordinates::Version(_) => Err(CollectorError::InvalidCoordinates {
                input: s.to_string(),
                reason: "Expected group:artifact without a version".to_string(),
            }
            .into()),
        }
    }
}

impl Serialize for ComponentIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A component identity pinned to a concrete version.
///
/// Equality is field-wise, which coincides with equality of the canonical
/// `group:artifact:version` form because no component may contain ':'.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentVersion {
    identity: ComponentIdentity,
    version: String,
}

impl ComponentVersion {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        ComponentIdentity::new(group, artifact)?.with_version(version)
    }

    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    pub fn group(&self) -> &str {
        self.identity.group()
    }

    pub fn artifact(&self) -> &str {
        self.identity.artifact()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Canonical `group:artifact:version` form
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ComponentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identity, self.version)
    }
}

impl FromStr for ComponentVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Coordinates::from_str(s)? {
            Coordinates::Version(version) => Ok(version),
            Coordinates::Identity(_) => Err(CollectorError::InvalidCoordinates {
                input: s.to_string(),
                reason: "Expected group:artifact:version".to_string(),
            }
            .into()),
        }
    }
}

impl Serialize for ComponentVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Coordinates as typed by a user: either every version of an identity or a single version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coordinates {
    Identity(ComponentIdentity),
    Version(ComponentVersion),
}

impl FromStr for Coordinates {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<&str> = s.trim().split(':').collect();
        match segments.as_slice() {
            [group, artifact] => Ok(Coordinates::Identity(ComponentIdentity::new(
                *group, *artifact,
            )?)),
            [group, artifact, version] => Ok(Coordinates::Version(ComponentVersion::new(
                *group, *artifact, *version,
            )?)),
            _ => Err(CollectorError::InvalidCoordinates {
                input: s.to_string(),
                reason: format!("Expected 2 or 3 ':'-separated segments, got {}", segments.len()),
            }
            .into()),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinates::Identity(identity) => fmt::Display::fmt(identity, f),
            Coordinates::Version(version) => fmt::Display::fmt(version, f),
        }
    }
}
