// SPDX-License-Identifier: MIT

//! `judge challenge`: inspect the on-disk challenge catalog directly,
//! without needing a daemon or database at all.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ChallengeArgs {
    #[command(subcommand)]
    pub command: ChallengeCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChallengeCommand {
    /// List every non-ignored challenge folder
    List {
        /// Root folder containing one subdirectory per challenge
        #[arg(long)]
        challenge_root: PathBuf,
        /// Regex patterns for folder names to skip
        #[arg(long = "ignore")]
        ignore_patterns: Vec<String>,
    },
    /// Show a single challenge's metadata, start points, and stages
    Show {
        /// Root folder containing one subdirectory per challenge
        #[arg(long)]
        challenge_root: PathBuf,
        /// Challenge folder name
        name: String,
    },
}

pub fn run(args: ChallengeArgs) -> Result<(), CliError> {
    match args.command {
        ChallengeCommand::List { challenge_root, ignore_patterns } => list(&challenge_root, &ignore_patterns),
        ChallengeCommand::Show { challenge_root, name } => show(&challenge_root, &name),
    }
}

fn list(challenge_root: &std::path::Path, ignore_patterns: &[String]) -> Result<(), CliError> {
    let challenges = judge_core::parse_all_challenges(challenge_root, ignore_patterns)?;
    if challenges.is_empty() {
        println!("no challenges found under {}", challenge_root.display());
        return Ok(());
    }
    for challenge in challenges {
        println!("{} ({} stages) — {}", challenge.folder_name, challenge.total_stages(), challenge.basic.title);
    }
    Ok(())
}

fn show(challenge_root: &std::path::Path, name: &str) -> Result<(), CliError> {
    let challenge = judge_core::parse_challenge(challenge_root, name)?;
    println!("{}", challenge.basic.title);
    if !challenge.basic.author.is_empty() {
        println!("author: {}", challenge.basic.author);
    }
    if !challenge.basic.source.is_empty() {
        println!("source: {}", challenge.basic.source);
    }
    for line in &challenge.basic.description {
        println!("  {line}");
    }

    println!("start points:");
    for sp in &challenge.start_points {
        println!("  {} (root={}, dockerfile={})", sp.name, sp.root, sp.dockerfile);
    }

    println!("stages:");
    for (index, stage) in challenge.stages.iter().enumerate() {
        println!("  {index}. {}", stage.name);
    }
    Ok(())
}

#[cfg(test)]
#[path = "challenge_tests.rs"]
mod tests;
