// SPDX-License-Identifier: MIT

//! `BollardDriver`: the production `ContainerDriver`, talking to a real
//! Docker engine over `bollard`. Ports `buildDockerImage` /
//! `createAndStartContainer` / `cleanUp` from the source almost line for
//! line; the shape (archive context, build, create+start, wait-with-
//! deadline, force-stop-on-timeout, list-then-remove-by-name) is unchanged.

use async_trait::async_trait;
use bollard::container::{
    Config, ListContainersOptions, LogOutput, LogsOptions, RemoveContainerOptions, StopContainerOptions,
    WaitContainerOptions,
};
use bollard::image::{BuildImageOptions, RemoveImageOptions};
use bollard::models::HostConfig;
use bollard::Docker;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::driver::{BuildSpec, ContainerDriver, RunOutcome, RunSpec};
use crate::error::DriverError;

pub struct BollardDriver {
    docker: Docker,
}

impl BollardDriver {
    /// Connect to the engine at `socket`, or the platform default if `None`.
    pub fn connect(socket: Option<&str>) -> Result<Self, DriverError> {
        let docker = match socket {
            Some(addr) => Docker::connect_with_socket(addr, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|err| DriverError::Start(err.to_string()))?,
            None => Docker::connect_with_local_defaults().map_err(|err| DriverError::Start(err.to_string()))?,
        };
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerDriver for BollardDriver {
    async fn build(&self, spec: &BuildSpec) -> Result<String, DriverError> {
        let context_dir = spec.context_dir.clone();
        let dockerfile = spec.dockerfile.clone();
        let tar_bytes = tokio::task::spawn_blocking(move || archive_build_context(&context_dir, &dockerfile))
            .await
            .map_err(|err| DriverError::Build { message: err.to_string(), log: String::new() })?
            .map_err(|err| DriverError::Build { message: err.to_string(), log: String::new() })?;

        let dockerfile_name = spec
            .dockerfile
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Dockerfile")
            .to_string();

        let options = BuildImageOptions {
            dockerfile: dockerfile_name,
            t: spec.image_name.clone(),
            rm: true,
            ..Default::default()
        };

        let mut stream = self.docker.build_image(options, None, Some(tar_bytes.into()));
        let mut build_log = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(info) => {
                    if let Some(stream_line) = info.stream {
                        build_log.push_str(&stream_line);
                    }
                    if let Some(error) = info.error {
                        return Err(DriverError::Build { message: error, log: build_log });
                    }
                }
                Err(err) => return Err(DriverError::Build { message: err.to_string(), log: build_log }),
            }
        }
        Ok(build_log)
    }

    async fn run_and_wait(&self, spec: &RunSpec) -> Result<RunOutcome, DriverError> {
        let host_config = HostConfig {
            mounts: Some(vec![bollard::models::Mount {
                typ: Some(bollard::models::MountTypeEnum::BIND),
                source: Some(spec.report_mount_path.display().to_string()),
                target: Some("/mnt/report".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let config = Config {
            image: Some(spec.image_name.clone()),
            tty: Some(true),
            env: Some(vec![format!("STAGE={}", spec.stage_env_value)]),
            host_config: Some(host_config),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container::<String, String>(
                Some(bollard::container::CreateContainerOptions {
                    name: spec.container_name.clone(),
                    platform: None,
                }),
                config,
            )
            .await
            .map_err(|err| DriverError::Start(err.to_string()))?;

        self.docker
            .start_container::<String>(&created.id, None)
            .await
            .map_err(|err| DriverError::Start(err.to_string()))?;

        let wait = self.docker.wait_container(
            &created.id,
            Some(WaitContainerOptions { condition: "not-running" }),
        );
        tokio::pin!(wait);

        let timed_out = match tokio::time::timeout(spec.timeout, wait.next()).await {
            Ok(Some(Ok(_))) => false,
            Ok(Some(Err(err))) => return Err(DriverError::Wait(err.to_string())),
            Ok(None) => false,
            Err(_) => {
                self.docker
                    .stop_container(&created.id, Some(StopContainerOptions { t: 0 }))
                    .await
                    .map_err(|err| DriverError::Wait(format!("failed to stop container on timeout: {err}")))?;
                true
            }
        };

        let logs = self.collect_logs(&created.id).await?;
        Ok(RunOutcome { logs, timed_out })
    }

    async fn cleanup(&self, image_name: &str, container_name: &str, temp_dir: &Path) {
        if let Err(err) = self.remove_named_container(container_name).await {
            tracing::warn!(container_name, %err, "failed to remove container during cleanup");
        }
        if let Err(err) = self
            .docker
            .remove_image(image_name, Some(RemoveImageOptions { force: true, ..Default::default() }), None)
            .await
        {
            tracing::warn!(image_name, %err, "failed to remove image during cleanup");
        }
        if let Err(err) = self.docker.prune_images::<String>(None).await {
            tracing::warn!(%err, "failed to prune dangling images during cleanup");
        }
        if let Err(err) = tokio::fs::remove_dir_all(temp_dir).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(?temp_dir, %err, "failed to remove temp storage path during cleanup");
            }
        }
    }
}

impl BollardDriver {
    async fn collect_logs(&self, container_id: &str) -> Result<String, DriverError> {
        let mut stream = self.docker.logs(
            container_id,
            Some(LogsOptions::<String> { stdout: true, stderr: true, ..Default::default() }),
        );
        let mut logs = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk.map_err(|err| DriverError::Logs(err.to_string()))? {
                LogOutput::StdOut { message } | LogOutput::StdErr { message } | LogOutput::Console { message } => {
                    logs.push_str(&String::from_utf8_lossy(&message));
                }
                LogOutput::StdIn { .. } => {}
            }
        }
        Ok(logs)
    }

    /// Docker prepends a leading `/` to container names; list-then-match is
    /// how the source finds the id to remove (names aren't directly
    /// addressable for removal the way image tags are).
    async fn remove_named_container(&self, container_name: &str) -> Result<(), DriverError> {
        let mut filters = HashMap::new();
        filters.insert("name".to_string(), vec![container_name.to_string()]);
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions { all: true, filters, ..Default::default() }))
            .await
            .map_err(|err| DriverError::Cleanup(err.to_string()))?;

        let wanted = format!("/{container_name}");
        let Some(found) = containers
            .into_iter()
            .find(|c| c.names.as_ref().is_some_and(|names| names.iter().any(|n| n == &wanted)))
        else {
            tracing::warn!(container_name, "container not found during cleanup");
            return Ok(());
        };
        let Some(id) = found.id else { return Ok(()) };
        self.docker
            .remove_container(&id, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await
            .map_err(|err| DriverError::Cleanup(err.to_string()))
    }
}

fn archive_build_context(context_dir: &Path, dockerfile: &Path) -> std::io::Result<Vec<u8>> {
    let dir = dockerfile
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| context_dir.to_path_buf());
    let mut builder = tar::Builder::new(Vec::new());
    builder.append_dir_all(".", &dir)?;
    builder.into_inner()
}

