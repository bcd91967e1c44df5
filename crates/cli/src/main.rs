// SPDX-License-Identifier: MIT

//! `judge`: thin operator CLI for manual submission and inspection during
//! incident response. Talks to a running daemon over HTTP for submission,
//! and reads the database or the challenge storage folder directly for
//! inspection — neither path requires the worker pool to be running.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::{challenge, status, submit};

#[derive(Parser)]
#[command(name = "judge", version, about = "Operator CLI for the testing-execution daemon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push a repository onto a running daemon's pending queue
    Submit(submit::SubmitArgs),
    /// Inspect recent testing attempts for a repository
    Status(status::StatusArgs),
    /// Inspect the on-disk challenge catalog
    Challenge(challenge::ChallengeArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Submit(args) => submit::run(args).await,
        Commands::Status(args) => status::run(args).await,
        Commands::Challenge(args) => challenge::run(args),
    };
    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
