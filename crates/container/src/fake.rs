// SPDX-License-Identifier: MIT

//! Fake container driver for deterministic testing, without a real engine.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::driver::{BuildSpec, ContainerDriver, RunOutcome, RunSpec};
use crate::error::DriverError;

/// One call recorded by [`FakeDriver`], in invocation order.
#[derive(Debug, Clone)]
pub enum DriverCall {
    Build { image_name: String },
    RunAndWait { image_name: String, container_name: String },
    Cleanup { image_name: String, container_name: String, temp_dir: PathBuf },
}

#[derive(Clone)]
pub struct FakeDriver {
    inner: Arc<Mutex<FakeState>>,
}

struct FakeState {
    calls: Vec<DriverCall>,
    build_error: Option<(String, String)>,
    run_outcome: Option<Result<RunOutcome, String>>,
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState { calls: Vec::new(), build_error: None, run_outcome: None })),
        }
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.inner.lock().calls.clone()
    }

    /// Script the next `build` call to fail, with the given partial log.
    pub fn set_build_error(&self, message: impl Into<String>, log: impl Into<String>) {
        self.inner.lock().build_error = Some((message.into(), log.into()));
    }

    /// Script the next `run_and_wait` call's outcome (success or error).
    pub fn set_run_outcome(&self, outcome: Result<RunOutcome, String>) {
        self.inner.lock().run_outcome = Some(outcome);
    }
}

#[async_trait]
impl ContainerDriver for FakeDriver {
    async fn build(&self, spec: &BuildSpec) -> Result<String, DriverError> {
        let mut state = self.inner.lock();
        state.calls.push(DriverCall::Build { image_name: spec.image_name.clone() });
        if let Some((message, log)) = state.build_error.take() {
            return Err(DriverError::Build { message, log });
        }
        Ok(String::new())
    }

    async fn run_and_wait(&self, spec: &RunSpec) -> Result<RunOutcome, DriverError> {
        let mut state = self.inner.lock();
        state.calls.push(DriverCall::RunAndWait {
            image_name: spec.image_name.clone(),
            container_name: spec.container_name.clone(),
        });
        match state.run_outcome.take() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(DriverError::Wait(message)),
            None => Ok(RunOutcome { logs: String::new(), timed_out: false }),
        }
    }

    async fn cleanup(&self, image_name: &str, container_name: &str, temp_dir: &Path) {
        self.inner.lock().calls.push(DriverCall::Cleanup {
            image_name: image_name.to_string(),
            container_name: container_name.to_string(),
            temp_dir: temp_dir.to_path_buf(),
        });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
