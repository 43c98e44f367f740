//! Validator walk: check every folder's catalog files once and mirror the broken ones.

use std::fs;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{CatalogError, Result};

use super::mirror::{ErrorMirror, FolderCopy};
use super::schema::{validate_categories, validate_wallpapers, SchemaViolation};
use super::{CATEGORIES_FILE, WALLPAPERS_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderOutcome {
    Clean,
    Mirrored,
    AlreadyMirrored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub folders_scanned: usize,
    pub invalid_files: usize,
    pub folders_mirrored: usize,
    pub folders_skipped: usize,
}

impl CheckSummary {
    fn record(&mut self, outcome: FolderOutcome) {
        self.folders_scanned += 1;
        match outcome {
            FolderOutcome::Clean => {}
            FolderOutcome::Mirrored => self.folders_mirrored += 1,
            FolderOutcome::AlreadyMirrored => self.folders_skipped += 1,
        }
    }
}

#[derive(Debug)]
enum FileCheck {
    Valid,
    Syntax(String),
    Schema(SchemaViolation),
}

type Validator = fn(&Value) -> std::result::Result<(), SchemaViolation>;

const CATALOG_FILES: &[(&str, Validator)] = &[
    (CATEGORIES_FILE, validate_categories),
    (WALLPAPERS_FILE, validate_wallpapers),
];

fn check_file(path: &Path, validate: Validator) -> Result<FileCheck> {
    let raw = fs::read(path).map_err(|err| CatalogError::read(path, err))?;
    let payload: Value = match serde_json::from_slice(&raw) {
        Ok(payload) => payload,
        Err(err) => return Ok(FileCheck::Syntax(err.to_string())),
    };
    Ok(match validate(&payload) {
        Ok(()) => FileCheck::Valid,
        Err(violation) => FileCheck::Schema(violation),
    })
}

/// Checks the catalog files directly inside `folder` (not its subfolders).
pub fn process_folder(
    folder: &Path,
    mirror: &ErrorMirror,
    summary: &mut CheckSummary,
) -> Result<FolderOutcome> {
    tracing::info!("검사 중: {}", folder.display());
    let existed_before = mirror.destination_for(folder)?.exists();
    let mut has_error = false;

    for (file_name, validate) in CATALOG_FILES {
        let path = folder.join(file_name);
        if !path.is_file() {
            continue;
        }
        match check_file(&path, *validate)? {
            FileCheck::Valid => continue,
            FileCheck::Syntax(detail) => {
                tracing::info!("{file_name} 파일 구문 오류: {}", path.display());
                tracing::debug!("{}: {detail}", path.display());
            }
            FileCheck::Schema(violation) => {
                tracing::info!("잘못된 {file_name} 발견: {}", path.display());
                tracing::debug!("{}: record {}", path.display(), violation.index);
            }
        }
        summary.invalid_files += 1;
        mirror.copy_to_error_folder(&path, folder)?;
        has_error = true;
    }

    if !has_error {
        return Ok(FolderOutcome::Clean);
    }
    Ok(match mirror.copy_folder_to_error(folder, existed_before)? {
        FolderCopy::Copied(_) => FolderOutcome::Mirrored,
        FolderCopy::AlreadyExists(_) => FolderOutcome::AlreadyMirrored,
    })
}

/// Walks `root` depth first, visiting each folder once and never entering `@@error`.
pub fn run_check(root: &Path) -> Result<CheckSummary> {
    let mirror = ErrorMirror::new(root);
    tracing::info!("현재 작업 디렉토리: {}", mirror.root().display());
    tracing::info!("오류 파일이 복사될 폴더: {}", mirror.error_root().display());

    let mut summary = CheckSummary::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !mirror.is_mirror_path(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        let is_folder = entry.file_type().is_dir()
            || (entry.path_is_symlink() && entry.path().is_dir());
        if !is_folder {
            continue;
        }
        let outcome = process_folder(entry.path(), &mirror, &mut summary)?;
        summary.record(outcome);
    }

    tracing::info!("검사 완료!");
    tracing::debug!(
        "folders={} invalid_files={} mirrored={} skipped={}",
        summary.folders_scanned,
        summary.invalid_files,
        summary.folders_mirrored,
        summary.folders_skipped
    );
    Ok(summary)
}
