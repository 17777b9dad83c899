use std::{path::PathBuf, process};

use clap::Parser;
use quizkit::{BankLoadError, DataDir, Difficulty};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Parse question banks and report lines that were dropped")]
pub struct Check {
    /// Only check this difficulty tier (default: all tiers)
    #[arg(long, short)]
    difficulty: Option<Difficulty>,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::new(root);
        let tiers = self
            .difficulty
            .map_or_else(|| Difficulty::ALL.to_vec(), |difficulty| vec![difficulty]);

        let mut problems = 0;
        for difficulty in tiers {
            let bank = match data.bank(difficulty) {
                Ok(bank) => bank,
                Err(BankLoadError::SourceNotFound(path)) => {
                    println!("{}", format!("⚠️  {} not found", path.display()).warning());
                    problems += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let rejected = bank.rejected();
            let summary = format!(
                "{difficulty}: {} questions, {} malformed lines",
                bank.len(),
                rejected.len()
            );
            if rejected.is_empty() {
                println!("{}", summary.success());
            } else {
                println!("{}", summary.warning());
                for malformed in rejected {
                    println!("  {}", malformed.to_string().dim());
                }
                problems += rejected.len();
            }
        }

        // Exit with a non-zero code when a bank needs attention.
        if problems > 0 {
            process::exit(2);
        }
        Ok(())
    }
}
