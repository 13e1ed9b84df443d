use super::maven_model::{parse_metadata_versions, EffectivePom, PomModel};
use crate::client_discovery::domain::{ComponentIdentity, ComponentVersion};
use crate::ports::outbound::MetadataRepository;
use crate::shared::error::CollectorError;
use crate::shared::{Result, WorkingContext};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Maven Central, the default metadata repository
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bound on how far up a parent chain we follow
const MAX_PARENT_DEPTH: usize = 10;

/// MavenCentralRepository adapter reading a Maven 2 layout repository over HTTP
///
/// Versions come from `maven-metadata.xml`; dependencies come from the
/// version's POM merged with its parent POMs. Downloaded POMs are cached in
/// the working context so shared parents are fetched once per run.
pub struct MavenCentralRepository {
    client: reqwest::Client,
    base_url: String,
}

impl MavenCentralRepository {
    /// Creates a repository client for Maven Central
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_REPOSITORY_URL)
    }

    /// Creates a repository client for any Maven 2 layout repository
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("maven-clients/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn metadata_url(&self, identity: &ComponentIdentity) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.base_url,
            group_path(identity.group()),
            urlencoding::encode(identity.artifact())
        )
    }

    fn pom_url(&self, version: &ComponentVersion) -> String {
        format!("{}/{}", self.base_url, pom_path(version))
    }

    /// Body of `url`, or `None` when the repository answers 404
    async fn get_text(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CollectorError::Fetch {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                service: "Maven repository",
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| CollectorError::Fetch {
            url: url.to_string(),
            details: e.to_string(),
        })?;
        Ok(Some(body))
    }

    /// Loads a POM from the working context, downloading it on a miss.
    ///
    /// Returns `None` when the repository has no POM for `version`.
    async fn load_pom(
        &self,
        version: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Option<String>> {
        let relative = pom_path(version);
        if let Some(cached) = context.read_cached(&relative)? {
            return Ok(Some(cached));
        }

        let Some(body) = self.get_text(&self.pom_url(version)).await? else {
            return Ok(None);
        };

        if let Err(e) = context.store(&relative, &body) {
            tracing::warn!(%version, error = %e, "couldn't cache POM");
        }
        Ok(Some(body))
    }

    /// The POM of `version` followed by its ancestors.
    ///
    /// The chain stops quietly at a parent that is missing, unparseable or
    /// deeper than `MAX_PARENT_DEPTH`; what was collected so far is used.
    async fn lineage(
        &self,
        version: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Option<Vec<PomModel>>> {
        let Some(body) = self.load_pom(version, context).await? else {
            tracing::debug!(%version, "no POM in repository");
            return Ok(None);
        };

        let project = match PomModel::parse(&body) {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!(%version, error = %e, "unreadable POM, treating as no dependencies");
                return Ok(None);
            }
        };

        let mut lineage = vec![project];
        while lineage.len() <= MAX_PARENT_DEPTH {
            let Some(parent) = lineage.last().and_then(parent_coordinates) else {
                break;
            };

            let Some(body) = self.load_pom(&parent, context).await? else {
                tracing::debug!(%version, %parent, "parent POM not found");
                break;
            };
            match PomModel::parse(&body) {
                Ok(model) => lineage.push(model),
                Err(e) => {
                    tracing::debug!(%parent, error = %e, "unreadable parent POM");
                    break;
                }
            }
        }

        Ok(Some(lineage))
    }
}

#[async_trait]
impl MetadataRepository for MavenCentralRepository {
    async fn resolve_versions(&self, identity: &ComponentIdentity) -> Result<Vec<ComponentVersion>> {
        let url = self.metadata_url(identity);
        let resolution_error = |details: String| CollectorError::Resolution {
            coordinates: identity.to_string(),
            details,
        };

        let body = self
            .get_text(&url)
            .await?
            .ok_or_else(|| resolution_error(format!("{} not found", url)))?;

        let versions =
            parse_metadata_versions(&body).map_err(|e| resolution_error(format!("{:#}", e)))?;

        Ok(versions
            .into_iter()
            .filter_map(|version| match identity.with_version(version) {
                Ok(version) => Some(version),
                Err(e) => {
                    tracing::debug!(%identity, error = %e, "skipping unusable version");
                    None
                }
            })
            .collect())
    }

    async fn fetch_dependencies(
        &self,
        version: &ComponentVersion,
        context: &WorkingContext,
    ) -> Result<Vec<ComponentVersion>> {
        Ok(self
            .lineage(version, context)
            .await?
            .map(|lineage| EffectivePom::build(&lineage).dependencies())
            .unwrap_or_default())
    }
}

fn group_path(group: &str) -> String {
    group
        .split('.')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `org/example/lib/1.0/lib-1.0.pom`, used both as URL path and cache key
fn pom_path(version: &ComponentVersion) -> String {
    let artifact = urlencoding::encode(version.artifact());
    let number = urlencoding::encode(version.version());
    format!(
        "{}/{}/{}/{}-{}.pom",
        group_path(version.group()),
        artifact,
        number,
        artifact,
        number
    )
}

fn parent_coordinates(model: &PomModel) -> Option<ComponentVersion> {
    let parent = model.parent.as_ref()?;
    ComponentVersion::new(
        parent.group_id.clone()?,
        parent.artifact_id.clone()?,
        parent.version.clone()?,
    )
    .ok()
}
