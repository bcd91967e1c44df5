// SPDX-License-Identifier: MIT

//! Testing: one evaluation attempt, and its in-memory task counterpart.

use crate::challenge::Challenge;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Status of a [`Testing`] record.
///
/// Pre-`Running` states live only in memory plus the `pending` row;
/// everything from `Running` onward (save for `Running` itself) is terminal
/// once written, and written exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestingStatus {
    Pending,
    Running,
    Success,
    Failed,
    Error,
    WaitingTimeout,
    RunningTimeout,
}

impl TestingStatus {
    /// Whether this status is one of the five terminal outcomes.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TestingStatus::Pending | TestingStatus::Running)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestingStatus::Pending => "pending",
            TestingStatus::Running => "running",
            TestingStatus::Success => "success",
            TestingStatus::Failed => "failed",
            TestingStatus::Error => "error",
            TestingStatus::WaitingTimeout => "waitingTimeout",
            TestingStatus::RunningTimeout => "runningTimeout",
        }
    }
}

impl fmt::Display for TestingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a stored status string doesn't match one of the
/// seven known tags (data corruption, or a schema drift between versions).
#[derive(Debug, thiserror::Error)]
#[error("unrecognized testing status: {0}")]
pub struct UnknownTestingStatus(pub String);

impl FromStr for TestingStatus {
    type Err = UnknownTestingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TestingStatus::Pending),
            "running" => Ok(TestingStatus::Running),
            "success" => Ok(TestingStatus::Success),
            "failed" => Ok(TestingStatus::Failed),
            "error" => Ok(TestingStatus::Error),
            "waitingTimeout" => Ok(TestingStatus::WaitingTimeout),
            "runningTimeout" => Ok(TestingStatus::RunningTimeout),
            other => Err(UnknownTestingStatus(other.to_string())),
        }
    }
}

/// One submission attempt. Composite key is `(repository_id, serial)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testing {
    pub repository_id: String,
    pub serial: i64,
    pub stage: i64,
    pub status: TestingStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub log: String,
    pub create_time: String,
    #[serde(default)]
    pub run_start_time: String,
    #[serde(default)]
    pub run_end_time: String,
}

impl Testing {
    pub fn new_pending(repository_id: String, serial: i64, stage: i64, create_time: String) -> Self {
        Self {
            repository_id,
            serial,
            stage,
            status: TestingStatus::Pending,
            message: String::new(),
            log: String::new(),
            create_time,
            run_start_time: String::new(),
            run_end_time: String::new(),
        }
    }
}

/// Per-repository serial counter. One row per `repository_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingSerial {
    pub repository_id: String,
    pub next_serial: i64,
}

/// In-memory unit of work handed from Submission Intake to a worker.
///
/// Never persisted as such — `challenge` is an enqueue-time snapshot so a
/// mid-queue edit on disk can't change what a queued job runs, and
/// `waiting_since` is only meaningful for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct TestingTask {
    pub repository_id: String,
    pub serial: i64,
    pub stage: i64,
    pub challenge: Challenge,
    pub waiting_since: Instant,
}

impl TestingTask {
    pub fn new(
        repository_id: String,
        serial: i64,
        stage: i64,
        challenge: Challenge,
        waiting_since: Instant,
    ) -> Self {
        Self {
            repository_id,
            serial,
            stage,
            challenge,
            waiting_since,
        }
    }
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
