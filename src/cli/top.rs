use std::path::PathBuf;

use clap::Parser;
use quizkit::{DataDir, Leaderboard};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the top results for a quiz")]
pub struct Top {
    /// Quiz title, e.g. "Quiz 1". Matched ignoring case.
    title: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Serialize)]
struct JsonBoard<'a> {
    quiz_title: &'a str,
    entries: Vec<&'a quizkit::domain::leaderboard::Entry<'a>>,
}

impl Top {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::new(root).load()?;
        let size = data.config().leaderboard_size();

        let board = match Leaderboard::rank(data.results(), &self.title, size) {
            Ok(board) => board,
            Err(no_results) => {
                tracing::debug!("{no_results}");
                println!("No results for this quiz.");
                return Ok(());
            }
        };

        match self.output {
            OutputFormat::Json => Self::output_json(&board)?,
            OutputFormat::Table => Self::output_table(&board, size),
        }
        Ok(())
    }

    fn output_json(board: &Leaderboard<'_>) -> anyhow::Result<()> {
        let output = JsonBoard {
            quiz_title: board.quiz_title(),
            entries: board.iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(board: &Leaderboard<'_>, size: usize) {
        println!(
            "{}",
            format!("Top-{size}: {}", board.quiz_title()).bold()
        );

        let narrow = is_narrow();
        for entry in board.iter() {
            let line = format!("{}. {} - {} points", entry.rank, entry.user_login, entry.score);
            if narrow {
                println!("{line}");
            } else {
                let date = format!("({})", entry.date.format("%Y-%m-%d %H:%M"));
                println!("{line} {}", date.dim());
            }
        }
    }
}
