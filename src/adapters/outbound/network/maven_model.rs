//! Just enough of the Maven POM and repository metadata formats to list the
//! direct dependencies a published version declares.

use crate::client_discovery::domain::ComponentVersion;
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// Bound on nested `${...}` expansion passes
const MAX_INTERPOLATION_PASSES: usize = 10;

/// Parent reference of a POM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
}

/// One `<dependency>` entry, uninterpolated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyDecl {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
}

impl DependencyDecl {
    fn key(&self) -> Option<(String, String)> {
        Some((self.group_id.clone()?, self.artifact_id.clone()?))
    }
}

/// Raw content of a single POM file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomModel {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent: Option<ParentRef>,
    pub properties: HashMap<String, String>,
    pub dependencies: Vec<DependencyDecl>,
    pub managed_dependencies: Vec<DependencyDecl>,
}

impl PomModel {
    /// Parses a POM document. Profiles, plugins and build sections are ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut model = PomModel::default();
        let mut path: Vec<String> = Vec::new();
        let mut dependency: Option<DependencyDecl> = None;

        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                    path.push(name);
                    match segments(&path).as_slice() {
                        ["project", "parent"] => model.parent = Some(ParentRef::default()),
                        ["project", "dependencies", "dependency"]
                        | ["project", "dependencyManagement", "dependencies", "dependency"] => {
                            dependency = Some(DependencyDecl::default())
                        }
                        _ => {}
                    }
                }
                Event::Empty(element) => {
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                    path.push(name);
                    if let ["project", "properties", key] = segments(&path).as_slice() {
                        model.properties.insert(key.to_string(), String::new());
                    }
                    path.pop();
                }
                Event::End(_) => {
                    match segments(&path).as_slice() {
                        ["project", "dependencies", "dependency"] => {
                            model.dependencies.extend(dependency.take())
                        }
                        ["project", "dependencyManagement", "dependencies", "dependency"] => {
                            model.managed_dependencies.extend(dependency.take())
                        }
                        _ => {}
                    }
                    path.pop();
                }
                Event::Text(text) => {
                    let value = text.unescape()?.into_owned();
                    model.assign(&path, &mut dependency, value);
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    model.assign(&path, &mut dependency, value);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if model.artifact_id.is_none() {
            anyhow::bail!("not a POM: missing project/artifactId");
        }
        Ok(model)
    }

    fn assign(&mut self, path: &[String], dependency: &mut Option<DependencyDecl>, value: String) {
        match segments(path).as_slice() {
            ["project", "groupId"] => self.group_id = Some(value),
            ["project", "artifactId"] => self.artifact_id = Some(value),
            ["project", "version"] => self.version = Some(value),
            ["project", "parent", field] => {
                if let Some(parent) = self.parent.as_mut() {
                    match *field {
                        "groupId" => parent.group_id = Some(value),
                        "artifactId" => parent.artifact_id = Some(value),
                        "version" => parent.version = Some(value),
                        _ => {}
                    }
                }
            }
            ["project", "properties", key] => {
                self.properties.insert(key.to_string(), value);
            }
            ["project", "dependencies", "dependency", field]
            | ["project", "dependencyManagement", "dependencies", "dependency", field] => {
                if let Some(decl) = dependency.as_mut() {
                    match *field {
                        "groupId" => decl.group_id = Some(value),
                        "artifactId" => decl.artifact_id = Some(value),
                        "version" => decl.version = Some(value),
                        "scope" => decl.scope = Some(value),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Group id, falling back to the parent's
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or_else(|| self.parent.as_ref()?.group_id.as_deref())
    }

    /// Version, falling back to the parent's
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.parent.as_ref()?.version.as_deref())
    }
}

fn segments(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

/// Versions listed in a `maven-metadata.xml`, in document order
pub fn parse_metadata_versions(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut versions = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                seen_root |= path.is_empty() && name == "metadata";
                path.push(name);
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(text) => {
                if let ["metadata", "versioning", "versions", "version"] = segments(&path).as_slice() {
                    versions.push(text.unescape()?.into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        anyhow::bail!("not a repository metadata document");
    }
    Ok(versions)
}

/// A POM merged with its ancestors
///
/// Properties and managed versions are inherited, with descendants taking
/// precedence. Dependencies declared by ancestors are inherited too.
#[derive(Debug, Clone)]
pub struct EffectivePom {
    properties: HashMap<String, String>,
    managed_versions: HashMap<(String, String), String>,
    dependencies: Vec<DependencyDecl>,
}

impl EffectivePom {
    /// `lineage` starts with the project itself and walks up through its parents.
    pub fn build(lineage: &[PomModel]) -> Self {
        let mut properties = HashMap::new();
        let mut managed_versions = HashMap::new();
        let mut dependencies: Vec<DependencyDecl> = Vec::new();

        for model in lineage.iter().rev() {
            properties.extend(model.properties.clone());

            for decl in &model.managed_dependencies {
                if let (Some(key), Some(version)) = (decl.key(), decl.version.clone()) {
                    managed_versions.insert(key, version);
                }
            }

            for decl in &model.dependencies {
                match dependencies
                    .iter_mut()
                    .find(|existing| existing.key().is_some() && existing.key() == decl.key())
                {
                    Some(existing) => *existing = decl.clone(),
                    None => dependencies.push(decl.clone()),
                }
            }
        }

        if let Some(project) = lineage.first() {
            let builtins = [
                ("groupId", project.effective_group_id()),
                ("artifactId", project.artifact_id.as_deref()),
                ("version", project.effective_version()),
            ];
            for (name, value) in builtins {
                if let Some(value) = value {
                    properties.insert(format!("project.{}", name), value.to_string());
                    properties.insert(format!("pom.{}", name), value.to_string());
                }
            }

            if let Some(parent) = &project.parent {
                let parent_values = [
                    ("groupId", &parent.group_id),
                    ("artifactId", &parent.artifact_id),
                    ("version", &parent.version),
                ];
                for (name, value) in parent_values {
                    if let Some(value) = value {
                        properties.insert(format!("project.parent.{}", name), value.clone());
                    }
                }
            }
        }

        Self {
            properties,
            managed_versions,
            dependencies,
        }
    }

    /// Declared dependencies with their versions resolved.
    ///
    /// Entries whose coordinates still hold an unresolved `${...}` after
    /// interpolation, or that are not valid coordinates, are left out.
    pub fn dependencies(&self) -> Vec<ComponentVersion> {
        self.dependencies
            .iter()
            .filter_map(|decl| self.resolve(decl))
            .collect()
    }

    fn resolve(&self, decl: &DependencyDecl) -> Option<ComponentVersion> {
        let group = self.interpolate(decl.group_id.as_deref()?);
        let artifact = self.interpolate(decl.artifact_id.as_deref()?);
        let version = match &decl.version {
            Some(version) => version.clone(),
            None => self
                .managed_versions
                .get(&(group.clone(), artifact.clone()))
                .or_else(|| {
                    let raw_key = (decl.group_id.clone()?, decl.artifact_id.clone()?);
                    self.managed_versions.get(&raw_key)
                })?
                .clone(),
        };
        let version = self.interpolate(&version);

        if [&group, &artifact, &version].iter().any(|s| s.contains("${")) {
            tracing::debug!(%group, %artifact, %version, "skipping dependency with unresolved property");
            return None;
        }

        match ComponentVersion::new(group, artifact, version) {
            Ok(dependency) => Some(dependency),
            Err(e) => {
                tracing::debug!(error = %e, "skipping dependency with invalid coordinates");
                None
            }
        }
    }

    fn interpolate(&self, value: &str) -> String {
        interpolate(value, &self.properties)
    }
}

/// Expands `${name}` references; unknown names are left as they are.
fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
    let mut current = value.to_string();

    for _ in 0..MAX_INTERPOLATION_PASSES {
        let mut expanded = String::with_capacity(current.len());
        let mut changed = false;
        let mut rest = current.as_str();

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let reference = &rest[start + 2..];
            match reference.find('}') {
                Some(end) => {
                    match properties.get(&reference[..end]) {
                        Some(replacement) => {
                            expanded.push_str(replacement);
                            changed = true;
                        }
                        None => expanded.push_str(&rest[start..start + 2 + end + 1]),
                    }
                    rest = &reference[end + 1..];
                }
                None => {
                    expanded.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        expanded.push_str(rest);
        current = expanded;

        if !changed {
            break;
        }
    }

    current
}
