//! Error mirror: a shadow tree under `<root>/@@error` that collects copies of
//! invalid files and their folders at the same relative paths.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CatalogError, Result};

use super::ERROR_FOLDER_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderCopy {
    Copied(PathBuf),
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ErrorMirror {
    root: PathBuf,
    error_root: PathBuf,
}

impl ErrorMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let error_root = root.join(ERROR_FOLDER_NAME);
        Self { root, error_root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn error_root(&self) -> &Path {
        &self.error_root
    }

    /// True for the mirror root itself and anything below it.
    pub fn is_mirror_path(&self, path: &Path) -> bool {
        path.starts_with(&self.error_root)
    }

    /// `<root>/@@error/<folder relative to root>`.
    pub fn destination_for(&self, folder: &Path) -> Result<PathBuf> {
        let relative = folder
            .strip_prefix(&self.root)
            .map_err(|_| CatalogError::OutsideRoot {
                path: folder.to_path_buf(),
                root: self.root.clone(),
            })?;
        Ok(self.error_root.join(relative))
    }

    /// Copies one offending file into the mirrored folder, overwriting an earlier copy.
    /// Returns the mirrored folder the file landed in.
    pub fn copy_to_error_folder(&self, file: &Path, folder: &Path) -> Result<PathBuf> {
        if !self.error_root.exists() {
            tracing::info!(
                "@@error 폴더가 없습니다. 생성 중: {}",
                self.error_root.display()
            );
            fs::create_dir_all(&self.error_root)
                .map_err(|err| CatalogError::create_dir(&self.error_root, err))?;
        }

        let destination = self.destination_for(folder)?;
        if !destination.exists() {
            fs::create_dir_all(&destination)
                .map_err(|err| CatalogError::create_dir(&destination, err))?;
        }

        let target = match file.file_name() {
            Some(name) => destination.join(name),
            None => destination.clone(),
        };
        fs::copy(file, &target).map_err(|err| CatalogError::copy(file, &target, err))?;
        tracing::info!(
            "파일 복사 완료: {} -> {}",
            file.display(),
            destination.display()
        );
        Ok(destination)
    }

    /// Deep-copies `folder` into the mirror unless its destination was already
    /// present before this run touched the folder.
    pub fn copy_folder_to_error(&self, folder: &Path, existed_before: bool) -> Result<FolderCopy> {
        if !self.error_root.exists() {
            fs::create_dir_all(&self.error_root)
                .map_err(|err| CatalogError::create_dir(&self.error_root, err))?;
        }

        let destination = self.destination_for(folder)?;
        if existed_before {
            tracing::info!("폴더 이미 존재: {}", destination.display());
            return Ok(FolderCopy::AlreadyExists(destination));
        }

        self.copy_tree(folder, &destination)?;
        tracing::info!(
            "폴더 복사 완료: {} -> {}",
            folder.display(),
            destination.display()
        );
        Ok(FolderCopy::Copied(destination))
    }

    fn copy_tree(&self, source: &Path, destination: &Path) -> Result<()> {
        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_mirror_path(entry.path()));

        for entry in walker {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|_| CatalogError::OutsideRoot {
                    path: entry.path().to_path_buf(),
                    root: source.to_path_buf(),
                })?;
            let target = destination.join(relative);
            if entry.path().is_dir() {
                fs::create_dir_all(&target).map_err(|err| CatalogError::create_dir(&target, err))?;
            } else {
                fs::copy(entry.path(), &target)
                    .map_err(|err| CatalogError::copy(entry.path(), &target, err))?;
            }
        }
        Ok(())
    }
}
