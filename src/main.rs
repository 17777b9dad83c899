//! `quiz`: take multiple-answer quizzes from plain-text question banks and
//! compare results on a leaderboard.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
