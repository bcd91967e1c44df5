// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! judge-daemon: config loading, the HTTP submission endpoint, and the
//! bootstrap glue between `judge-engine`, `judge-storage`, and
//! `judge-container`. The process entry point lives in `main.rs`.

pub mod config;
pub mod error;
pub mod http;

pub use config::JudgeConfig;
pub use error::DaemonError;
