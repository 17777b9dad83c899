//! A filesystem backed store of users, results and question banks.
//!
//! The [`DataDir`] owns the in-memory user and result collections for one
//! process run. Domain operations borrow them and [`DataDir::flush`] writes
//! them back.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Bank, Config, Difficulty, QuizResult, User},
    storage::{
        bank_file::{load_bank, BankLoadError},
        records::{self, RecordsError},
    },
};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// State of a [`DataDir`] whose records have been read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    config: Config,
    users: Vec<User>,
    results: Vec<QuizResult>,
}

/// State of a [`DataDir`] before anything has been read.
#[derive(Debug, PartialEq, Eq)]
pub struct Unloaded;

/// A filesystem backed quiz data directory.
#[derive(Debug)]
pub struct DataDir<S> {
    /// The root of the data directory.
    root: PathBuf,
    state: S,
}

impl<S> DataDir<S> {
    /// The root of the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of a difficulty tier's question bank.
    #[must_use]
    pub fn bank_path(&self, difficulty: Difficulty) -> PathBuf {
        self.root.join(difficulty.bank_file_name())
    }

    /// Reads and parses the question bank for a difficulty tier.
    ///
    /// Banks are parsed afresh on every call.
    ///
    /// # Errors
    ///
    /// Returns [`BankLoadError::SourceNotFound`] if the tier has no bank file.
    pub fn bank(&self, difficulty: Difficulty) -> Result<Bank, BankLoadError> {
        load_bank(&self.bank_path(difficulty))
    }
}

impl DataDir<Unloaded> {
    /// Opens a data directory at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            state: Unloaded,
        }
    }

    /// Creates the directory, a default configuration file and an empty bank
    /// for each difficulty tier. Existing files are left untouched.
    ///
    /// Returns the paths of the files that were created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be created.
    pub fn init(&self) -> Result<Vec<PathBuf>, DataDirError> {
        fs::create_dir_all(&self.root)?;
        let mut created = Vec::new();

        let config_path = self.root.join(CONFIG_FILE);
        if !config_path.exists() {
            Config::default()
                .save(&config_path)
                .map_err(DataDirError::Config)?;
            created.push(config_path);
        }

        for difficulty in Difficulty::ALL {
            let path = self.bank_path(difficulty);
            if !path.exists() {
                fs::write(&path, "")?;
                created.push(path);
            }
        }

        Ok(created)
    }

    /// Loads the configuration and all user and result records.
    ///
    /// A missing configuration file falls back to the defaults, and missing
    /// record files load as empty collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file or a record file exists but
    /// cannot be read or parsed.
    pub fn load(self) -> Result<DataDir<Loaded>, DataDirError> {
        let config = load_config(&self.root)?;
        let users = records::load(&self.root.join(&config.users_file))?;
        let results = records::load(&self.root.join(&config.results_file))?;

        tracing::debug!(
            "Loaded {} users and {} results from {}",
            users.len(),
            results.len(),
            self.root.display()
        );

        Ok(DataDir {
            root: self.root,
            state: Loaded {
                config,
                users,
                results,
            },
        })
    }
}

impl DataDir<Loaded> {
    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.state.config
    }

    /// All registered users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// All recorded results.
    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.state.results
    }

    /// Mutable access to the user collection.
    pub const fn users_mut(&mut self) -> &mut Vec<User> {
        &mut self.state.users
    }

    /// Mutable access to the result collection.
    pub const fn results_mut(&mut self) -> &mut Vec<QuizResult> {
        &mut self.state.results
    }

    /// Mutable access to both collections at once, for operations that must
    /// keep them consistent.
    pub const fn records_mut(&mut self) -> (&mut Vec<User>, &mut Vec<QuizResult>) {
        (&mut self.state.users, &mut self.state.results)
    }

    /// Writes the user records to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_users(&self) -> Result<(), RecordsError> {
        records::save(&self.root.join(&self.state.config.users_file), &self.state.users)
    }

    /// Writes the result records to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_results(&self) -> Result<(), RecordsError> {
        records::save(
            &self.root.join(&self.state.config.results_file),
            &self.state.results,
        )
    }

    /// Writes all records to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn flush(&self) -> Result<(), RecordsError> {
        self.save_users()?;
        self.save_results()
    }
}

/// Errors that can occur when opening or initialising a data directory.
#[derive(Debug, thiserror::Error)]
pub enum DataDirError {
    /// A record file could not be read.
    #[error(transparent)]
    Records(#[from] RecordsError),
    /// An I/O error occurred.
    #[error("failed to access data directory: {0}")]
    Io(#[from] io::Error),
    /// The configuration file could not be read or written.
    #[error("{0}")]
    Config(String),
}

fn load_config(root: &Path) -> Result<Config, DataDirError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load(&path).map_err(DataDirError::Config)
}
