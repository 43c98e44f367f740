use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to copy '{}' -> '{}': {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("'{}' is outside the scan root '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    #[error("invalid setting: {0}")]
    Setting(String),
}

impl CatalogError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn create_dir(path: &Path, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn copy(from: &Path, to: &Path, source: io::Error) -> Self {
        Self::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
