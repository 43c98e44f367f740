//! Rebalancer settings. Precedence: command-line flag, then optional YAML file, then defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::rebalance::RatioPolicy;
use crate::error::{CatalogError, Result};

/// Environment variable holding the log level (`error`..`trace`).
pub const LOG_LEVEL_ENV: &str = "WALLPAPER_CATALOG_LOG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RebalanceFile {
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub min_true: Option<i64>,
    #[serde(default)]
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebalanceSettings {
    pub policy: RatioPolicy,
    pub dry_run: bool,
}

impl Default for RebalanceSettings {
    fn default() -> Self {
        Self {
            policy: RatioPolicy::default(),
            dry_run: false,
        }
    }
}

pub fn load_rebalance_file(path: &Path) -> Result<RebalanceFile> {
    let raw = fs::read_to_string(path).map_err(|err| CatalogError::read(path, err))?;
    if raw.trim().is_empty() {
        return Ok(RebalanceFile::default());
    }
    serde_yaml::from_str(&raw).map_err(|source| CatalogError::Config {
        path: path.to_path_buf(),
        source,
    })
}

impl RebalanceSettings {
    /// Layers `file` and then the flag values over the defaults.
    pub fn resolve(
        file: Option<&RebalanceFile>,
        ratio: Option<f64>,
        min_true: Option<i64>,
        dry_run: bool,
    ) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(file) = file {
            if let Some(ratio) = file.ratio {
                settings.policy.ratio = ratio;
            }
            if let Some(min_true) = file.min_true {
                settings.policy.min_true = min_true;
            }
            settings.dry_run = file.dry_run.unwrap_or(false);
        }
        if let Some(ratio) = ratio {
            settings.policy.ratio = ratio;
        }
        if let Some(min_true) = min_true {
            settings.policy.min_true = min_true;
        }
        settings.dry_run |= dry_run;

        if !settings.policy.ratio.is_finite() {
            return Err(CatalogError::Setting(format!(
                "ratio must be a finite number, got {}",
                settings.policy.ratio
            )));
        }
        Ok(settings)
    }
}
