// SPDX-License-Identifier: MIT

//! Report Reader: the fixed two-file artifact a container leaves behind.

use crate::error::ReportError;
use std::path::Path;

pub const MESSAGE_FILE: &str = "message.md";
pub const RESULT_FILE: &str = "result";

/// Outcome read from a job's bind-mounted report directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pass: bool,
    pub message: String,
}

/// Read `message.md` and `result` from `dir`. The only parsing rule is the
/// case-insensitive first byte of `result`: `t` is a pass, `f` is a fail,
/// anything else is treated as a fail with a warning logged.
pub fn read_report(dir: &Path) -> Result<Report, ReportError> {
    let message_path = dir.join(MESSAGE_FILE);
    let result_path = dir.join(RESULT_FILE);

    let message_bytes = std::fs::read(&message_path)
        .map_err(|_| ReportError::MissingFile(message_path.display().to_string()))?;
    let message = String::from_utf8(message_bytes)
        .map_err(|_| ReportError::InvalidUtf8(message_path.display().to_string()))?;

    let result_bytes = std::fs::read(&result_path)
        .map_err(|_| ReportError::MissingFile(result_path.display().to_string()))?;

    let pass = match result_bytes.first().map(|b| b.to_ascii_lowercase()) {
        Some(b't') => true,
        Some(b'f') => false,
        _ => {
            tracing::warn!(
                result = %String::from_utf8_lossy(&result_bytes),
                "unrecognized report result, treating as fail"
            );
            false
        }
    };

    Ok(Report { pass, message })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
