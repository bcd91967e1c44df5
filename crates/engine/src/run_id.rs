// SPDX-License-Identifier: MIT

//! `run_id` and its derived image/container names. One pure formatting
//! function, unit tested directly — `runId` embeds repository, provider,
//! subject, serial, stage, and a millisecond clock reading, so no two jobs
//! ever collide on an engine-visible name.

pub fn build_run_id(
    repository_id: &str,
    provider: &str,
    subject: &str,
    serial: i64,
    stage: i64,
    now_epoch_ms: i64,
) -> String {
    format!("{repository_id}-{provider}-{subject}-{serial}-{stage}-{now_epoch_ms}").to_lowercase()
}

pub fn image_name(run_id: &str) -> String {
    format!("image-{run_id}")
}

pub fn container_name(run_id: &str) -> String {
    format!("container-{run_id}")
}

#[cfg(test)]
#[path = "run_id_tests.rs"]
mod tests;
