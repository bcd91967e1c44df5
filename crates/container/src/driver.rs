// SPDX-License-Identifier: MIT

//! `ContainerDriver`: the three operations the Task Runner needs from a
//! container engine. The driver owns all engine interaction; callers never
//! construct engine requests directly, and the driver is stateless across
//! jobs — every call is addressed by name, not by a held handle.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::DriverError;

/// Where to build an image from and what to tag it.
#[derive(Debug, Clone)]
pub struct BuildSpec {
    /// Directory containing the Dockerfile; also the build context root.
    pub context_dir: PathBuf,
    /// Dockerfile path, relative to `context_dir`.
    pub dockerfile: PathBuf,
    pub image_name: String,
}

/// How to run a built image and for how long to wait.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub image_name: String,
    pub container_name: String,
    /// Host directory bind-mounted read-write at `/mnt/report`.
    pub report_mount_path: PathBuf,
    pub stage_env_value: String,
    pub timeout: Duration,
}

/// Result of running a container to completion or to its timeout.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub logs: String,
    pub timed_out: bool,
}

#[async_trait]
pub trait ContainerDriver: Send + Sync + 'static {
    /// Build an image from `spec.dockerfile`'s directory, tagged `image_name`.
    async fn build(&self, spec: &BuildSpec) -> Result<String, DriverError>;

    /// Create, start, and wait for a container per `spec`. Force-stops it on
    /// timeout. Always returns whatever logs were collected, even when
    /// `timed_out` is true.
    async fn run_and_wait(&self, spec: &RunSpec) -> Result<RunOutcome, DriverError>;

    /// Remove the named container (if present) and image, prune dangling
    /// images, and delete `temp_dir`. Each step is independent; a failure in
    /// one does not prevent the others from running. Failures are collected,
    /// not propagated — cleanup never reopens a terminal job status.
    async fn cleanup(&self, image_name: &str, container_name: &str, temp_dir: &Path);
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
