use crate::shared::security::{validate_regular_file, MAX_DESCRIPTOR_SIZE};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMP_DIR_PREFIX: &str = "maven-clients-tmp-repo-";

/// Disposable local repository used while exploring candidate metadata.
///
/// Candidate descriptors downloaded during a run are cached here instead of
/// in any persistent local repository. The directory is removed when the
/// context is dropped, whichever way the run ends. A failed removal is
/// logged and otherwise ignored.
///
/// A context is owned by exactly one collection run.
#[derive(Debug)]
pub struct WorkingContext {
    root: PathBuf,
    dir: Option<TempDir>,
}

impl WorkingContext {
    /// Creates a fresh temporary directory under the system temp location.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .context("Failed to create temporary repository")?;
        let root = dir.path().to_path_buf();

        tracing::debug!(path = %root.display(), "created temporary repository");

        Ok(Self {
            root,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns the cached content stored under `relative`, if any.
    ///
    /// # Errors
    /// Returns an error if the entry exists but is not a readable regular file.
    pub fn read_cached(&self, relative: &str) -> Result<Option<String>> {
        let path = self.root.join(relative);
        if !path.exists() {
            return Ok(None);
        }

        validate_regular_file(&path, MAX_DESCRIPTOR_SIZE)?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached file {}", path.display()))?;
        Ok(Some(content))
    }

    /// Stores `content` under `relative`, replacing any previous entry atomically.
    pub fn store(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root.join(relative);
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to stage {}", path.display()))?;
        staged.write_all(content.as_bytes())?;
        staged
            .persist(&path)
            .with_context(|| format!("Failed to store {}", path.display()))?;
        Ok(())
    }
}

impl Drop for WorkingContext {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        match dir.close() {
            Ok(()) => tracing::debug!(path = %self.root.display(), "removed temporary repository"),
            Err(e) => tracing::error!(
                path = %self.root.display(),
                error = %e,
                "Couldn't remove temporary repository"
            ),
        }
    }
}
