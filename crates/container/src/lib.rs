// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! Container Driver and Report Reader: the only two components that touch
//! the container engine and its filesystem artifacts.

pub mod bollard_driver;
pub mod driver;
pub mod error;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use bollard_driver::BollardDriver;
pub use driver::{BuildSpec, ContainerDriver, RunOutcome, RunSpec};
pub use error::{DriverError, ReportError};
pub use report::{read_report, Report};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{DriverCall, FakeDriver};
