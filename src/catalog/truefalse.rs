//! Rebalancer driver: find every `wallpapers.json`, reassign premium flags and
//! rewrite the file in the canonical layout.

use std::fs;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{CatalogError, Result};

use super::format::format_entries;
use super::rebalance::{rebalance, GroupStat, RatioPolicy};
use super::WALLPAPERS_FILE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub changes: usize,
    pub stats: Vec<GroupStat>,
    /// Flags changed or the layout differs from canonical; in dry-run nothing is written.
    pub needs_write: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrueFalseSummary {
    pub total_files: usize,
    pub updated_files: usize,
}

pub fn process_file(path: &Path, policy: RatioPolicy, dry_run: bool) -> Result<FileOutcome> {
    let original = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::info!("SKIP {}: load error ({err})", path.display());
            return Ok(FileOutcome::default());
        }
    };
    let payload: Value = match serde_json::from_slice(&original) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::info!("SKIP {}: load error ({err})", path.display());
            return Ok(FileOutcome::default());
        }
    };
    let Value::Array(mut entries) = payload else {
        tracing::info!("SKIP {}: not a list", path.display());
        return Ok(FileOutcome::default());
    };

    let outcome = rebalance(&mut entries, policy);
    let formatted = match format_entries(&entries) {
        Ok(text) => text,
        Err(err) => {
            tracing::info!("SKIP {}: {err}", path.display());
            return Ok(FileOutcome::default());
        }
    };

    let needs_write = outcome.changes > 0 || formatted.as_bytes() != original.as_slice();
    if needs_write && !dry_run {
        fs::write(path, formatted).map_err(|err| CatalogError::write(path, err))?;
    }
    Ok(FileOutcome {
        changes: outcome.changes,
        stats: outcome.stats,
        needs_write,
    })
}

fn describe_groups(stats: &[GroupStat]) -> String {
    stats
        .iter()
        .map(|stat| format!("{}:{}/{}", stat.key, stat.true_count, stat.total))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run_truefalse(root: &Path, policy: RatioPolicy, dry_run: bool) -> Result<TrueFalseSummary> {
    let mut summary = TrueFalseSummary::default();
    let walker = WalkDir::new(root).sort_by_file_name().into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        // `path().is_file()` follows symlinks; `file_type()` would not.
        if entry.file_name() != WALLPAPERS_FILE || !entry.path().is_file() {
            continue;
        }

        summary.total_files += 1;
        let path = entry.path();
        let outcome = process_file(path, policy, dry_run)?;
        if outcome.needs_write {
            summary.updated_files += 1;
        }
        tracing::info!(
            "{} {}: {}; groups={}",
            if dry_run { "[DRY]" } else { "DONE" },
            path.display(),
            if outcome.needs_write { "changed" } else { "no-change" },
            describe_groups(&outcome.stats)
        );
    }

    tracing::info!(
        "총 파일: {}, 수정된 파일: {}",
        summary.total_files,
        summary.updated_files
    );
    Ok(summary)
}
