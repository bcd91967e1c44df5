// SPDX-License-Identifier: MIT

//! `JudgeConfig`: the TOML document loaded at startup, one section per
//! config-surface entry named in the design's external-interfaces section.
//! Mirrors the source's `jConfig`, including its field naming where that
//! naming is part of the on-disk compatibility surface.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::DaemonError;

#[derive(Debug, Clone, Deserialize)]
pub struct JudgeConfig {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub challenge: ChallengeConfig,
    pub repo: RepoConfig,
    pub logger: LoggerConfig,
    pub testing: TestingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeConfig {
    pub storage_folder: PathBuf,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoConfig {
    pub storage_folder: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub file: PathBuf,
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default)]
    pub compress: bool,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_max_size_mb() -> u64 {
    10
}

fn default_max_backups() -> u32 {
    3
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestingConfig {
    pub pending_queue_size: usize,
    pub max_concurrent_workers: usize,
    /// Seconds, despite the `_in_minute` key name — kept for on-disk
    /// compatibility with existing config files. See `pending_queue_timeout`.
    #[serde(rename = "pending_queue_timeout_in_minute")]
    pub pending_queue_timeout_secs: u64,
    /// Minutes, matching the key name — unlike `pending_queue_timeout_secs`,
    /// the source has no unit bug here. See `running_timeout`.
    #[serde(rename = "running_timeout_in_minute")]
    pub running_timeout_mins: u64,
    pub docker_socket: Option<String>,
    pub tmp_storage_folder: PathBuf,
}

impl JudgeConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, DaemonError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| DaemonError::ReadConfig { path: path.to_path_buf(), source })?;
        toml::from_str(&contents).map_err(|source| DaemonError::ParseConfig { path: path.to_path_buf(), source })
    }

    pub fn pending_queue_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.testing.pending_queue_timeout_secs)
    }

    pub fn running_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.testing.running_timeout_mins * 60)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
