use std::{path::PathBuf, time::Instant};

use chrono::Utc;
use clap::Parser;
use quizkit::{BankLoadError, DataDir, Difficulty, Question, Session, Submission};
use tracing::instrument;

use super::{authenticate, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Take a quiz sampled from a difficulty tier's question bank")]
pub struct Play {
    /// Your login
    login: String,

    /// Difficulty tier (easy, medium, hard or 1-3). Prompted for if omitted.
    #[arg(long, short)]
    difficulty: Option<Difficulty>,
}

impl Play {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut data = DataDir::new(root).load()?;
        let login = authenticate(&data, &self.login)?;

        let difficulty = match self.difficulty {
            Some(difficulty) => difficulty,
            None => choose_difficulty()?,
        };

        let bank = match data.bank(difficulty) {
            Ok(bank) => bank,
            Err(BankLoadError::SourceNotFound(path)) => {
                anyhow::bail!("File {} not found!", path.display())
            }
            Err(e) => return Err(e.into()),
        };
        if bank.is_empty() {
            anyhow::bail!("The {difficulty} question bank has no questions");
        }

        let mut session = Session::start(
            difficulty.quiz_title(),
            bank.questions(),
            data.config().session_length(),
            &mut rand::thread_rng(),
        );

        let started = Instant::now();
        while let Some(question) = session.current() {
            print_question(session.position(), session.len(), question);
            let raw = prompt_answer(question.answers().len())?;
            session.submit(&raw)?;
        }
        let elapsed = started.elapsed();

        let (score, total) = (session.score(), session.len());
        session.record(login, Utc::now(), data.results_mut());
        data.save_results()?;

        println!();
        println!("{}", format!("You scored {score}/{total}!").success());
        println!(
            "{}",
            format!(
                "Finished in {}m {:02}s",
                elapsed.as_secs() / 60,
                elapsed.as_secs() % 60
            )
            .dim()
        );
        Ok(())
    }
}

fn choose_difficulty() -> anyhow::Result<Difficulty> {
    let labels: Vec<String> = Difficulty::ALL
        .iter()
        .map(|difficulty| format!("{} - {difficulty}", difficulty.level()))
        .collect();

    let selection = dialoguer::Select::new()
        .with_prompt("Choose difficulty")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Difficulty::ALL[selection])
}

fn print_question(position: usize, total: usize, question: &Question) {
    println!();
    println!(
        "{} {}",
        format!("[{}/{total}]", position + 1).dim(),
        question.text().bold()
    );
    for (index, answer) in question.answers().iter().enumerate() {
        println!("  {}. {}", index + 1, answer.text());
    }
}

/// Prompt until the response parses as a valid submission.
fn prompt_answer(answer_count: usize) -> anyhow::Result<String> {
    let raw = dialoguer::Input::<String>::new()
        .with_prompt("Your answer(s), separated by commas")
        .validate_with(|input: &String| {
            Submission::parse(input, answer_count)
                .map(|_| ())
                .map_err(|e| e.to_string().warning())
        })
        .interact_text()?;
    Ok(raw)
}
