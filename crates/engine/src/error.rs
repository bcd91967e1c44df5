// SPDX-License-Identifier: MIT

//! Errors surfaced synchronously by Submission Intake. The Task Runner
//! never propagates an error of its own — every execution path ends by
//! writing a terminal `Testing` status (see `runner`), so there is no
//! `RunError` for callers to observe.

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("repository not found: {0}")]
    NotFound(String),

    #[error("caller does not own this repository")]
    Unauthorized,

    #[error("pending queue is full")]
    QueueFull,

    #[error(transparent)]
    Storage(#[from] judge_storage::StorageError),

    #[error("failed to parse challenge {folder_name}: {source}")]
    Challenge {
        folder_name: String,
        #[source]
        source: judge_core::ChallengeError,
    },
}
