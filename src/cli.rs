use std::path::{Path, PathBuf};

mod check;
mod play;
mod rename;
mod terminal;
mod top;

use chrono::NaiveDate;
use check::Check;
use clap::ArgAction;
use play::Play;
use quizkit::{
    domain::{result::history_for, user},
    storage::Loaded,
    DataDir, Login, User,
};
use terminal::Colorize;
use top::Top;
use tracing::instrument;

/// Date format accepted for birth dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a birth date in `YYYY-MM-DD` form.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Prompt for the user's password and check it against the stored account.
///
/// Returns the authenticated login.
fn authenticate(data: &DataDir<Loaded>, login: &str) -> anyhow::Result<Login> {
    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()?;

    match user::authenticate(data.users(), login, &password) {
        Some(user) => {
            tracing::debug!("Authenticated {}", user.login);
            Ok(user.login.clone())
        }
        None => anyhow::bail!("Wrong login or password!"),
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the quiz data directory
    #[arg(short, long, default_value = "Data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.data_dir)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Initialize a new quiz data directory
    Init,

    /// Register a new user
    Register(Register),

    /// Take a quiz
    Play(Play),

    /// Show your past results
    History(History),

    /// Show the top results for a quiz
    ///
    /// Scores are ranked highest first. Equal scores are ranked by date, so
    /// the earliest achiever ranks higher.
    Top(Top),

    /// Change your login
    ///
    /// All of your past results are moved to the new login.
    Rename(rename::Command),

    /// Change your password or birth date
    Settings(Settings),

    /// Check question banks for malformed lines
    Check(Check),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Init => Init::run(&root)?,
            Self::Register(command) => command.run(root)?,
            Self::Play(command) => command.run(root)?,
            Self::History(command) => command.run(root)?,
            Self::Top(command) => command.run(root)?,
            Self::Rename(command) => command.run(root)?,
            Self::Settings(command) => command.run(root)?,
            Self::Check(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let created = DataDir::new(root.to_path_buf()).init()?;

        if created.is_empty() {
            println!("Data directory {} is already initialized", root.display());
            return Ok(());
        }

        println!("Initialized quiz data directory in {}", root.display());
        for path in &created {
            println!("  Created: {}", path.display());
        }
        println!();
        println!("Next steps:");
        println!("  Add questions to easy.txt, medium.txt and hard.txt, one per line:");
        println!("    Capital of France Paris* London Berlin Madrid");
        println!("  quiz register <LOGIN>");

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Register {
    /// The login to register
    login: Login,

    /// Birth date (YYYY-MM-DD). Prompted for if omitted.
    #[arg(long, value_parser = parse_date)]
    birth_date: Option<NaiveDate>,
}

impl Register {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut data = DataDir::new(root).load()?;

        if user::find(data.users(), &self.login).is_some() {
            anyhow::bail!("Login already exists!");
        }

        let password = dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?;

        let birth_date = match self.birth_date {
            Some(date) => date,
            None => {
                let input: String = dialoguer::Input::new()
                    .with_prompt("Birth date (YYYY-MM-DD)")
                    .validate_with(|input: &String| parse_date(input).map(|_| ()))
                    .interact_text()?;
                parse_date(&input).map_err(anyhow::Error::msg)?
            }
        };

        let user = User {
            login: self.login,
            password,
            birth_date,
        };
        let login = user::register(data.users_mut(), user)?.login.clone();
        data.save_users()?;

        println!("{}", format!("✅ Registered {login}").success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct History {
    /// Your login
    login: String,
}

impl History {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let data = DataDir::new(root).load()?;
        let login = authenticate(&data, &self.login)?;

        let history = history_for(data.results(), &login);
        if history.is_empty() {
            println!("No results yet.");
            return Ok(());
        }

        println!("My Results:");
        for result in history {
            println!(
                "{}: {} - {} points",
                result.date.format("%Y-%m-%d %H:%M").to_string().dim(),
                result.quiz_title,
                result.score
            );
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Settings {
    /// Your login
    login: String,

    /// Prompt for a new password
    #[arg(long)]
    password: bool,

    /// New birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    birth_date: Option<NaiveDate>,
}

impl Settings {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        if !self.password && self.birth_date.is_none() {
            anyhow::bail!("Nothing to change: pass --password and/or --birth-date");
        }

        let mut data = DataDir::new(root).load()?;
        let login = authenticate(&data, &self.login)?;

        let new_password = if self.password {
            Some(
                dialoguer::Password::new()
                    .with_prompt("New password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?,
            )
        } else {
            None
        };

        let Some(user) = data.users_mut().iter_mut().find(|u| u.login == login) else {
            anyhow::bail!("User {login} not found");
        };
        if let Some(password) = new_password {
            user.password = password;
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = birth_date;
        }
        data.save_users()?;

        println!("{}", "✅ Settings updated".success());
        Ok(())
    }
}
