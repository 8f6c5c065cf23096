use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileHandleError {
    #[error("failed to read metadata for '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' is not a regular file")]
    NotAFile(PathBuf),
}

#[derive(Clone, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A user-selected file. Replaced wholesale on reselection, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    size_bytes: u64,
    source: FileSource,
}

impl FileHandle {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FileHandleError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| FileHandleError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(FileHandleError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Files dropped by platforms that hand over content instead of a path.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    /// Size in KiB with one decimal, e.g. `"12.5 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }

    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    }

    pub async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("path", &self.path())
            .finish()
    }
}
