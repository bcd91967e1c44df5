// SPDX-License-Identifier: MIT

//! `judge status`: read recent testing attempts for a repository straight
//! out of the database, bypassing the daemon entirely. Useful when the
//! daemon itself is the thing under investigation.

use clap::Args;
use std::path::PathBuf;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Path to the judge daemon's SQLite database
    #[arg(long)]
    pub db: PathBuf,

    /// Repository to inspect
    #[arg(long)]
    pub repo: String,

    /// Number of recent attempts to show
    #[arg(long, default_value_t = 10)]
    pub limit: i64,
}

pub async fn run(args: StatusArgs) -> Result<(), CliError> {
    let pool = judge_storage::pool::open(&args.db).await?;
    let repo = judge_storage::repository::get(&pool, &args.repo).await?;
    println!(
        "{} (provider={}, subject={}, stage={}/{})",
        repo.repository_id, repo.provider, repo.subject, repo.stage, repo.total_stages
    );

    let attempts = judge_storage::testing::list_recent(&pool, &args.repo, args.limit).await?;
    if attempts.is_empty() {
        println!("no testing attempts recorded");
        return Ok(());
    }
    for attempt in attempts {
        println!(
            "  #{serial} stage={stage} status={status} created={created} message={message:?}",
            serial = attempt.serial,
            stage = attempt.stage,
            status = attempt.status,
            created = attempt.create_time,
            message = attempt.message,
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
