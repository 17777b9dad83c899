//! Plain-text Quiz Management
//!
//! Question banks are line-oriented text files; quiz sessions are sampled from
//! them, scored, and appended to a persistent leaderboard history.

pub mod domain;
pub use domain::{
    Answer, Bank, Config, Difficulty, InvalidFormat, Leaderboard, Login, NoResults, Question,
    QuizResult, RenameError, Session, Submission, User,
};

/// Filesystem storage for users, results and question banks.
pub mod storage;
pub use storage::{BankLoadError, DataDir};
