use std::path::PathBuf;

use quizkit::{domain::user, DataDir, Login, RenameError};
use tracing::instrument;

use super::{authenticate, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Your current login
    old_login: String,

    /// The new login
    new_login: Login,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut data = DataDir::new(root).load()?;
        let old_login = authenticate(&data, &self.old_login)?;

        let result_count = data
            .results()
            .iter()
            .filter(|result| result.user_login == old_login)
            .count();

        if !self.yes {
            println!("Renaming {old_login} → {}", self.new_login);
            if result_count > 0 {
                println!(
                    "{}",
                    format!("  {result_count} results will be moved to the new login").dim()
                );
            }

            let proceed = dialoguer::Confirm::new()
                .with_prompt("Proceed?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("Cancelled");
                std::process::exit(130);
            }
        }

        let (users, results) = data.records_mut();
        match user::rename_login(users, results, &old_login, self.new_login.clone()) {
            Ok(updated) => {
                data.flush()?;
                println!(
                    "{}",
                    format!("✅ Renamed {old_login} → {}", self.new_login).success()
                );
                if updated > 0 {
                    println!("{}", format!("   Updated {updated} results").dim());
                }
                Ok(())
            }
            Err(RenameError::DuplicateIdentifier(login)) => {
                anyhow::bail!("Login {login} already exists! Not changed.")
            }
            Err(e) => Err(e.into()),
        }
    }
}
