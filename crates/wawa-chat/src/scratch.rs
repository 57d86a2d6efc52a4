use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

/// Where per-request scratch directories are created
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    parent: Option<PathBuf>,
}

impl ScratchSpace {
    /// Scratch directories under `parent`, or the system temp directory
    pub const fn new(parent: Option<PathBuf>) -> Self {
        Self { parent }
    }

    /// Create a fresh directory for one request
    ///
    /// Filesystem work runs on the blocking pool.
    pub async fn create(&self) -> std::io::Result<ScratchDir> {
        let parent = self.parent.clone();
        let dir = tokio::task::spawn_blocking(move || create_dir(parent.as_deref()))
            .await
            .map_err(std::io::Error::other)??;

        tracing::trace!(path = %dir.path().display(), "scratch directory created");

        Ok(ScratchDir { dir })
    }
}

fn create_dir(parent: Option<&Path>) -> std::io::Result<TempDir> {
    let prefix = format!("wawa-{}-", Uuid::new_v4());
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix);

    match parent {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            builder.tempdir_in(parent)
        }
        None => builder.tempdir(),
    }
}

/// Directory holding one request's intermediate artifacts
///
/// Removed with everything in it when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the artifact for message `index`, e.g. `message_0.wav`
    pub fn artifact(&self, index: usize, extension: &str) -> PathBuf {
        self.dir.path().join(format!("message_{index}.{extension}"))
    }

    /// Remove the directory now, reporting failures
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
        }
    }
}
