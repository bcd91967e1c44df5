// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! Persistence Adapter: thin CRUD over SQLite for repositories, their
//! per-repository serial counters, and testing attempts.

pub mod error;
pub mod pool;
pub mod repository;
pub mod testing;
pub mod testing_serial;

pub use error::{Result, StorageError};
