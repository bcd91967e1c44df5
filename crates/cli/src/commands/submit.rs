// SPDX-License-Identifier: MIT

//! `judge submit`: push a repository onto a running daemon's pending queue.
//! A thin HTTP client over `judge-daemon`'s single submission endpoint — for
//! incident response, not a replacement for the webhook-driven path.

use clap::Args;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Base URL of the running daemon, e.g. http://127.0.0.1:8080
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub daemon_url: String,

    /// Repository to submit
    #[arg(long)]
    pub repo: String,

    /// Stage to evaluate at (defaults to the repository's current stage)
    #[arg(long)]
    pub stage: Option<i64>,

    /// Value sent as the x-provider header; must match the repository owner
    #[arg(long)]
    pub provider: String,

    /// Value sent as the x-subject header; must match the repository owner
    #[arg(long)]
    pub subject: String,
}

pub async fn run(args: SubmitArgs) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let mut url = format!("{}/testing/pending?repo={}", args.daemon_url.trim_end_matches('/'), args.repo);
    if let Some(stage) = args.stage {
        url.push_str(&format!("&stage={stage}"));
    }

    let response = client
        .post(&url)
        .header("x-provider", &args.provider)
        .header("x-subject", &args.subject)
        .send()
        .await
        .map_err(|source| CliError::Request { url: url.clone(), source })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(CliError::DaemonRejected { url, status, body });
    }

    println!("{body}");
    Ok(())
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
