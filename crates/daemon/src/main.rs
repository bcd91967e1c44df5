// SPDX-License-Identifier: MIT

//! `judged`: the testing-execution daemon. Loads `JudgeConfig`, wires
//! storage, the container driver, and the worker pool together, then serves
//! the single submission endpoint until a shutdown signal arrives.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod config;
mod error;
mod http;

use std::path::Path;
use std::sync::Arc;

use judge_container::BollardDriver;
use judge_core::{Clock, SystemClock};
use judge_engine::{IntakeContext, JudgeEngine, RunnerContext};
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::config::JudgeConfig;
use crate::error::DaemonError;
use crate::http::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(config_path) = std::env::args().nth(1) else {
        eprintln!("usage: judged <config.toml>");
        std::process::exit(1);
    };
    let config = JudgeConfig::load_from_file(Path::new(&config_path))?;

    rotate_log_if_needed(&config.logger)?;
    let _log_guard = setup_logging(&config.logger)?;

    info!(bind_address = %config.server.bind_address, "starting judge daemon");

    let pool = judge_storage::pool::open(&config.db.path).await?;

    let driver: Arc<dyn judge_container::ContainerDriver> =
        Arc::new(BollardDriver::connect(config.testing.docker_socket.as_deref())?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (engine, receiver) = JudgeEngine::new(config.testing.pending_queue_size, config.testing.max_concurrent_workers);

    let runner_ctx = Arc::new(RunnerContext {
        pool: pool.clone(),
        driver,
        clock: clock.clone(),
        repository_storage_root: config.repo.storage_folder.clone(),
        tmp_storage_root: config.testing.tmp_storage_folder.clone(),
        pending_queue_timeout: config.pending_queue_timeout(),
        running_timeout: config.running_timeout(),
    });
    engine.start(receiver, runner_ctx).await;

    let intake = Arc::new(IntakeContext {
        pool,
        engine: engine.clone(),
        clock,
        challenge_storage_folder: config.challenge.storage_folder.clone(),
    });

    let app = http::router(AppState { intake });
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|source| DaemonError::Bind { address: config.server.bind_address.clone(), source })?;

    info!(bind_address = %config.server.bind_address, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(engine.clone()))
        .await
        .map_err(DaemonError::Serve)?;

    info!("judge daemon stopped");
    Ok(())
}

/// Wait for SIGTERM or SIGINT, then drain the worker pool before letting
/// axum finish its own graceful shutdown.
async fn shutdown_signal(engine: Arc<JudgeEngine>) {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(err) => {
            tracing::error!(%err, "failed to install SIGTERM handler");
            return;
        }
    };
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, draining"),
        _ = tokio::signal::ctrl_c() => info!("received SIGINT, draining"),
    }
    engine.shutdown().await;
}

/// Rotate `logger.file` if it has grown past `logger.max_size_mb`, shifting
/// `judged.log` -> `judged.log.1` -> ... -> `judged.log.<max_backups>`,
/// compressing the rotated-out file when `logger.compress` is set.
fn rotate_log_if_needed(logger: &config::LoggerConfig) -> Result<(), DaemonError> {
    let size = match std::fs::metadata(&logger.file) {
        Ok(metadata) => metadata.len(),
        Err(_) => return Ok(()),
    };
    if size < logger.max_size_mb * 1024 * 1024 {
        return Ok(());
    }

    let log_str = logger.file.display().to_string();
    for i in (1..logger.max_backups).rev() {
        let from = rotated_path(&log_str, i, logger.compress);
        let to = rotated_path(&log_str, i + 1, logger.compress);
        let _ = std::fs::rename(from, to);
    }

    let first_backup = format!("{log_str}.1");
    std::fs::rename(&logger.file, &first_backup).map_err(DaemonError::Logging)?;
    if logger.compress {
        compress_in_place(Path::new(&first_backup)).map_err(DaemonError::Logging)?;
    }
    Ok(())
}

fn rotated_path(log_str: &str, index: u32, compress: bool) -> String {
    if compress {
        format!("{log_str}.{index}.gz")
    } else {
        format!("{log_str}.{index}")
    }
}

fn compress_in_place(path: &Path) -> std::io::Result<()> {
    use std::io::Read;
    let mut contents = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut contents)?;

    let gz_path = path.with_extension(format!(
        "{}.gz",
        path.extension().and_then(|ext| ext.to_str()).unwrap_or_default()
    ));
    let gz_file = std::fs::File::create(&gz_path)?;
    let mut encoder = flate2::write::GzEncoder::new(gz_file, flate2::Compression::default());
    std::io::Write::write_all(&mut encoder, &contents)?;
    encoder.finish()?;
    std::fs::remove_file(path)?;
    Ok(())
}

/// Install a `tracing-subscriber` registry writing to `logger.file` via a
/// non-blocking `tracing-appender` sink, filtered by `logger.level` (or
/// `RUST_LOG` if set).
fn setup_logging(logger: &config::LoggerConfig) -> Result<tracing_appender::non_blocking::WorkerGuard, DaemonError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if let Some(parent) = logger.file.parent() {
        std::fs::create_dir_all(parent).map_err(DaemonError::Logging)?;
    }
    let dir = logger.file.parent().unwrap_or_else(|| Path::new("."));
    let file_name = logger.file.file_name().ok_or_else(|| {
        DaemonError::Logging(std::io::Error::new(std::io::ErrorKind::InvalidInput, "logger.file has no file name"))
    })?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logger.level.clone()));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
