use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use nonempty::NonEmpty;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{result::QuizResult, user::Login};

/// Default maximum number of entries on a leaderboard.
pub const LEADERBOARD_SIZE: usize = 20;

/// Returned when no result matches a leaderboard query.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no results for quiz '{query}'")]
pub struct NoResults {
    /// The quiz title that was queried.
    pub query: String,
}

/// One ranked row of a [`Leaderboard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<'a> {
    /// 1-based position on the leaderboard. Equal scores never share a rank.
    pub rank: NonZeroUsize,
    /// Login of the user who achieved the result.
    pub user_login: &'a Login,
    /// The score achieved.
    pub score: u32,
    /// When the score was achieved.
    pub date: DateTime<Utc>,
}

/// The best results for one quiz.
///
/// Entries are ordered by score, highest first. Equal scores are ordered by
/// date, earliest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard<'a> {
    quiz_title: String,
    entries: NonEmpty<Entry<'a>>,
}

impl<'a> Leaderboard<'a> {
    /// Ranks the results for a quiz title, keeping at most `size` entries.
    ///
    /// Titles are matched exactly, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`NoResults`] if no result matches the title, or if `size` is
    /// zero.
    pub fn rank(results: &'a [QuizResult], quiz_title: &str, size: usize) -> Result<Self, NoResults> {
        let query = quiz_title.trim();

        let mut matching: Vec<&QuizResult> = results
            .iter()
            .filter(|result| matches_title(&result.quiz_title, query))
            .collect();

        matching.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.date.cmp(&b.date)));
        matching.truncate(size);

        let entries = matching
            .into_iter()
            .enumerate()
            .map(|(index, result)| Entry {
                rank: NonZeroUsize::MIN.saturating_add(index),
                user_login: &result.user_login,
                score: result.score,
                date: result.date,
            })
            .collect();

        let entries = NonEmpty::from_vec(entries).ok_or_else(|| NoResults {
            query: query.to_string(),
        })?;

        Ok(Self {
            quiz_title: query.to_string(),
            entries,
        })
    }

    /// The quiz title that was queried.
    #[must_use]
    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    /// The highest ranked entry.
    #[must_use]
    pub fn leader(&self) -> &Entry<'a> {
        self.entries.first()
    }

    /// All entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<'a>> {
        self.entries.iter()
    }

    /// The number of entries. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a leaderboard with no entries is reported as
    /// [`NoResults`] instead.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

fn matches_title(title: &str, query: &str) -> bool {
    title.trim().to_lowercase() == query.to_lowercase()
}
