// SPDX-License-Identifier: MIT

//! Daemon bootstrap errors: config loading, logging setup, storage/driver init.

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to set up log sink: {0}")]
    Logging(std::io::Error),

    #[error(transparent)]
    Storage(#[from] judge_storage::StorageError),

    #[error("failed to connect to container engine: {0}")]
    ContainerDriver(#[from] judge_container::DriverError),

    #[error("failed to bind HTTP listener on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(std::io::Error),
}
