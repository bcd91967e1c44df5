// SPDX-License-Identifier: MIT

//! Storage errors: everything that can go wrong talking to SQLite.

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("testing record not found: repository={repository_id} serial={serial}")]
    TestingNotFound { repository_id: String, serial: i64 },
}

pub type Result<T> = std::result::Result<T, StorageError>;
