// SPDX-License-Identifier: MIT

//! Errors surfaced to the operator. `main` renders these with `Display` and
//! exits non-zero; there is no structured error reporting beyond that.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] judge_storage::StorageError),

    #[error(transparent)]
    Challenge(#[from] judge_core::ChallengeError),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("daemon at {url} returned {status}: {body}")]
    DaemonRejected { url: String, status: reqwest::StatusCode, body: String },

    #[error("no challenge named {0:?} under the challenge storage folder")]
    UnknownChallenge(String),
}
