//! Application configuration.
//!
//! Precedence: explicit overrides (CLI) > environment > config files > defaults.
//! Files are read from, in order: `--config`, `$DIADROP_CONFIG`,
//! `~/.config/diadrop.toml`, `./diadrop.toml`. Earlier files win per field.

use crate::errors::DiaError;
use crate::fsutil::{default_log_dir, default_projects_dir};
use crate::store::StoreOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub projects_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
    pub autosave_secs: Option<u64>,
    pub io_retries: Option<u32>,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, DiaError> {
        toml::from_str(text).map_err(|e| DiaError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, DiaError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Fill fields still unset from `other`.
    pub fn merge_missing(&mut self, other: Self) {
        if self.projects_dir.is_none() { self.projects_dir = other.projects_dir; }
        if self.log_dir.is_none() { self.log_dir = other.log_dir; }
        if self.log_level.is_none() { self.log_level = other.log_level; }
        if self.log_retention.is_none() { self.log_retention = other.log_retention; }
        if self.autosave_secs.is_none() { self.autosave_secs = other.autosave_secs; }
        if self.io_retries.is_none() { self.io_retries = other.io_retries; }
    }

    /// Values from `DIADROP_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            projects_dir: get("DIADROP_PROJECTS_DIR").map(PathBuf::from),
            log_dir: get("DIADROP_LOG_DIR").map(PathBuf::from),
            log_level: get("DIADROP_LOG_LEVEL"),
            log_retention: get("DIADROP_LOG_RETENTION").and_then(|s| s.parse().ok()),
            autosave_secs: get("DIADROP_AUTOSAVE_SECS").and_then(|s| s.parse().ok()),
            io_retries: get("DIADROP_IO_RETRIES").and_then(|s| s.parse().ok()),
        }
    }

    /// Resolve a full configuration. `overrides` carries command-line values.
    ///
    /// Unreadable or malformed config files are logged and skipped.
    #[must_use]
    pub fn load(cli_config: Option<&Path>, overrides: Self) -> Self {
        let mut cfg = overrides;
        cfg.merge_missing(Self::from_env());
        for path in config_paths(cli_config) {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(file_cfg) => cfg.merge_missing(file_cfg),
                Err(e) => log::warn!("ignoring config {}: {e}", path.display()),
            }
        }
        cfg
    }

    #[must_use]
    pub fn projects_dir(&self) -> PathBuf {
        self.projects_dir.clone().unwrap_or_else(default_projects_dir)
    }

    /// Configured log directory, or the default next to the project folder.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }

    /// Install the process logger from this configuration.
    pub fn init_logging(&self) -> Result<(), DiaError> {
        crate::logger::configure_logging(
            Some(&self.log_dir()),
            self.log_level.as_deref(),
            self.log_retention,
        )
    }

    #[must_use]
    pub fn autosave_interval(&self) -> Duration {
        self.autosave_secs.map_or(crate::autosave::DEFAULT_INTERVAL, Duration::from_secs)
    }

    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        let mut opts = StoreOptions::default();
        if let Some(n) = self.io_retries {
            opts.io_retries = n;
        }
        opts
    }
}

fn config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.to_path_buf()); }
    if let Ok(p) = std::env::var("DIADROP_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Some(cfg_dir) = dirs_next::config_dir() { paths.push(cfg_dir.join("diadrop.toml")); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join("diadrop.toml")); }
    paths
}
