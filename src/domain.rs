//! Domain models for quizzes.
//!
//! This module contains the core quiz pipeline: parsing question banks,
//! sampling sessions, scoring responses, recording results and ranking them.

/// Question and answer types.
pub mod question;
pub use question::{Answer, Question};

/// Question bank parsing.
pub mod bank;
pub use bank::{Bank, MalformedLine, MalformedReason};

mod config;
pub use config::Config;

mod difficulty;
pub use difficulty::{Difficulty, UnknownDifficulty};

/// Parsing and scoring of multi-select responses.
pub mod response;
pub use response::{InvalidFormat, Submission};

/// Quiz sessions: sampling, shuffling and the running score.
pub mod session;
pub use session::{Session, SubmitError};

/// Completed quiz results.
pub mod result;
pub use result::QuizResult;

/// Leaderboard ranking of historical results.
pub mod leaderboard;
pub use leaderboard::{Leaderboard, NoResults};

/// User accounts and the login rename cascade.
pub mod user;
pub use user::{Login, RegisterError, RenameError, User};
