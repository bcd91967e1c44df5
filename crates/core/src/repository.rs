// SPDX-License-Identifier: MIT

//! Repository: a learner's working copy of a startpoint, git-served.
//!
//! Creation (forking the starter tree, wiring the `post-commit` hook) is the
//! job of the out-of-scope HTTP/git surface; this crate only carries the row
//! shape the testing-execution subsystem reads and advances.

use serde::{Deserialize, Serialize};

/// A learner's repository.
///
/// Invariants (enforced by callers, not by this type): `0 <= stage <=
/// total_stages`, and `stage` never decreases across the repository's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub repository_id: String,
    pub subject: String,
    pub provider: String,
    pub challenge_folder_name: String,
    pub startpoint: String,
    pub stage: i64,
    pub total_stages: i64,
    pub create_time: String,
    pub update_time: String,
}

impl Repository {
    /// Identity used for the Submission Intake ownership check.
    pub fn owner_matches(&self, provider: &str, subject: &str) -> bool {
        self.provider == provider && self.subject == subject
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
