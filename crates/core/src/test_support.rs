// SPDX-License-Identifier: MIT

//! Shared test builders, gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::challenge::{Basic, Challenge, StartPoint, Stage};
use crate::repository::Repository;

/// A minimal two-stage, single-startpoint challenge for tests that don't
/// care about the challenge's content.
pub fn sample_challenge(folder_name: &str) -> Challenge {
    Challenge {
        folder_name: folder_name.to_string(),
        basic: Basic {
            author: "test-author".to_string(),
            source: "test-source".to_string(),
            title: "Test Challenge".to_string(),
            description: vec!["a challenge used only in tests".to_string()],
        },
        start_points: vec![StartPoint {
            name: "default".to_string(),
            description: vec![],
            root: "starter".to_string(),
            dockerfile: "starter/Dockerfile".to_string(),
        }],
        stages: vec![
            Stage {
                name: "stage-0".to_string(),
                description: vec![],
                note_file_or_path: "notes/0.md".to_string(),
                note_file_type: "markdown".to_string(),
            },
            Stage {
                name: "stage-1".to_string(),
                description: vec![],
                note_file_or_path: "notes/1.md".to_string(),
                note_file_type: "markdown".to_string(),
            },
        ],
    }
}

pub fn sample_repository(repository_id: &str, stage: i64) -> Repository {
    Repository {
        repository_id: repository_id.to_string(),
        subject: "alice".to_string(),
        provider: "github".to_string(),
        challenge_folder_name: "test-challenge".to_string(),
        startpoint: "default".to_string(),
        stage,
        total_stages: 2,
        create_time: "2024-01-01T00:00:00Z".to_string(),
        update_time: "2024-01-01T00:00:00Z".to_string(),
    }
}
