use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("invalid path: path is empty")]
    InvalidPath,

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type FsResult<T> = Result<T, FsError>;

/// file operations on paths relative to a project root
pub struct FileSystem {
    root: PathBuf,
}

impl FileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> FsResult<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(FsError::InvalidPath);
        }
        Ok(self.root.join(path))
    }

    /// never fails, anything unreadable counts as missing
    pub fn path_exists(&self, path: &Path) -> bool {
        match self.resolve(path) {
            Ok(full) => full.try_exists().unwrap_or(false),
            Err(_) => false,
        }
    }

    pub fn create_directory(&self, path: &Path) -> FsResult<()> {
        let full = self.resolve(path)?;
        fs::create_dir_all(&full).map_err(|source| FsError::Io {
            op: "create folder",
            path: full,
            source,
        })
    }

    /// recursive remove, a missing directory is not an error
    pub fn remove_directory(&self, path: &Path) -> FsResult<()> {
        let full = self.resolve(path)?;
        if !self.path_exists(path) {
            return Ok(());
        }
        fs::remove_dir_all(&full).map_err(|source| FsError::Io {
            op: "remove folder",
            path: full,
            source,
        })
    }

    /// copy `source` to `destination`, creating the destination's parent folders.
    /// a destination that is already a directory is left alone.
    pub fn copy_file(&self, source: &Path, destination: &Path) -> FsResult<()> {
        let from = self.resolve(source)?;
        let to = self.resolve(destination)?;

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
            && !self.path_exists(parent)
        {
            self.create_directory(parent)?;
        }

        if to.is_dir() {
            return Ok(());
        }

        fs::copy(&from, &to)
            .map(|_| ())
            .map_err(|source| FsError::Io {
                op: "copy file",
                path: from,
                source,
            })
    }
}
