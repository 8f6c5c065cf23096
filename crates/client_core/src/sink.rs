use std::{
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use shared::error::SubmitError;
use tempfile::NamedTempFile;
use tracing::info;

/// Where a received archive ends up.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Returns the location the archive was delivered to.
    async fn deliver(&self, file_name: &str, archive: Vec<u8>) -> Result<PathBuf, SubmitError>;
}

/// Saves archives into a fixed directory, like a browser download folder.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// The staging file lives next to the target so the final persist is a rename.
// `NamedTempFile` deletes it on drop, which covers every early return here.
fn write_staged(dir: &Path, target: &Path, archive: &[u8]) -> Result<(), SubmitError> {
    std::fs::create_dir_all(dir).map_err(|err| {
        SubmitError::Unexpected(format!(
            "failed to create download directory '{}': {err}",
            dir.display()
        ))
    })?;

    let mut staged = NamedTempFile::new_in(dir).map_err(SubmitError::unexpected)?;
    staged
        .write_all(archive)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(SubmitError::unexpected)?;

    staged.persist(target).map_err(|err| {
        SubmitError::Unexpected(format!(
            "failed to save '{}': {}",
            target.display(),
            err.error
        ))
    })?;
    Ok(())
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, file_name: &str, archive: Vec<u8>) -> Result<PathBuf, SubmitError> {
        let dir = self.dir.clone();
        let target = dir.join(file_name);
        let size = archive.len();

        let saved = target.clone();
        tokio::task::spawn_blocking(move || write_staged(&dir, &saved, &archive))
            .await
            .map_err(SubmitError::unexpected)??;

        info!(path = %target.display(), bytes = size, "archive saved");
        Ok(target)
    }
}
