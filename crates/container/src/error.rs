// SPDX-License-Identifier: MIT

//! Errors from the container driver and the report reader.

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// `log` carries whatever build-output was streamed before the
    /// failure, so the Task Runner can still surface it to the learner.
    #[error("image build failed: {message}")]
    Build { message: String, log: String },

    #[error("container create/start failed: {0}")]
    Start(String),

    #[error("waiting on container failed: {0}")]
    Wait(String),

    #[error("fetching container logs failed: {0}")]
    Logs(String),

    #[error("cleanup step failed: {0}")]
    Cleanup(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report directory missing expected file: {0}")]
    MissingFile(String),

    #[error("report file was not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("I/O error reading report: {0}")]
    Io(#[from] std::io::Error),
}
