// SPDX-License-Identifier: MIT

//! Challenge definitions: read-only on disk, parsed from a declarative
//! `attribute.toml` file per challenge folder.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ATTRIBUTE_FILE_NAME: &str = "attribute.toml";

/// A single starter tree plus the Dockerfile that evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartPoint {
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    /// Root subdirectory (relative to the challenge folder) containing the
    /// starter files handed to a new repository.
    pub root: String,
    /// Path to the Dockerfile, relative to the repository root.
    pub dockerfile: String,
}

/// One checkpoint within a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub note_file_or_path: String,
    #[serde(default)]
    pub note_file_type: String,
}

/// Descriptive metadata, carried from `original_source/` even though
/// `spec.md` only calls out name/stages/startpoints — costs nothing and is
/// read by the operator CLI's `challenge show` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Basic {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Vec<String>,
}

/// A declarative challenge definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Challenge {
    /// Identifying folder name. Not part of the TOML body — attached after
    /// load, mirroring the Go source's `toml:"-"` tag.
    #[serde(skip, default)]
    pub folder_name: String,
    #[serde(default)]
    pub basic: Basic,
    #[serde(default, rename = "startpoints")]
    pub start_points: Vec<StartPoint>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Challenge {
    pub fn find_start_point(&self, name: &str) -> Option<&StartPoint> {
        self.start_points.iter().find(|sp| sp.name == name)
    }

    pub fn total_stages(&self) -> usize {
        self.stages.len()
    }
}

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("failed to read challenge storage folder {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read challenge attribute file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse challenge attribute file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Parse a single challenge folder's `attribute.toml`.
pub fn parse_challenge(storage_folder: &Path, folder_name: &str) -> Result<Challenge, ChallengeError> {
    let attribute_path = storage_folder.join(folder_name).join(ATTRIBUTE_FILE_NAME);
    let contents =
        std::fs::read_to_string(&attribute_path).map_err(|source| ChallengeError::ReadFile {
            path: attribute_path.clone(),
            source,
        })?;
    let mut challenge: Challenge =
        toml::from_str(&contents).map_err(|source| ChallengeError::Parse {
            path: attribute_path,
            source,
        })?;
    challenge.folder_name = folder_name.to_string();
    Ok(challenge)
}

/// Enumerate every non-ignored challenge folder under `storage_folder`.
///
/// The Go source's ignore loop used an inner `continue` that only skipped
/// the *pattern* loop, not the outer folder — so every folder got appended
/// regardless of whether a pattern matched. This is the fixed, obviously
/// intended semantics: skip the folder if *any* pattern matches.
pub fn parse_all_challenges(
    storage_folder: &Path,
    ignore_patterns: &[String],
) -> Result<Vec<Challenge>, ChallengeError> {
    let entries = std::fs::read_dir(storage_folder).map_err(|source| ChallengeError::ReadDir {
        path: storage_folder.to_path_buf(),
        source,
    })?;

    let compiled: Vec<regex::Regex> = ignore_patterns
        .iter()
        .map(|pattern| {
            regex::Regex::new(pattern).map_err(|source| ChallengeError::InvalidIgnorePattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<_, _>>()?;

    let mut folder_names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ChallengeError::ReadDir {
            path: storage_folder.to_path_buf(),
            source,
        })?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if compiled.iter().any(|pattern| pattern.is_match(&name)) {
            continue;
        }
        folder_names.push(name);
    }

    folder_names
        .into_iter()
        .map(|name| parse_challenge(storage_folder, &name))
        .collect()
}

#[cfg(test)]
#[path = "challenge_tests.rs"]
mod tests;
