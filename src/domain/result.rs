use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::user::Login;

/// The outcome of one completed quiz session.
///
/// Only [`QuizResult::user_login`] ever changes after creation, during a
/// login rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Login of the user who took the quiz.
    pub user_login: Login,
    /// Title of the quiz, e.g. `Quiz 2`.
    pub quiz_title: String,
    /// Number of fully correct questions.
    pub score: u32,
    /// When the session was completed.
    pub date: DateTime<Utc>,
}

/// Builds a result for a completed session and appends it to the history.
///
/// Returns a reference to the appended result.
pub fn record(
    results: &mut Vec<QuizResult>,
    user_login: Login,
    quiz_title: impl Into<String>,
    score: u32,
    date: DateTime<Utc>,
) -> &QuizResult {
    let result = QuizResult {
        user_login,
        quiz_title: quiz_title.into(),
        score,
        date,
    };
    info!(
        "Recorded {} for {} ({} points)",
        result.quiz_title, result.user_login, result.score
    );
    results.push(result);
    &results[results.len() - 1]
}

/// A user's results, most recent first.
#[must_use]
pub fn history_for<'a>(results: &'a [QuizResult], login: &str) -> Vec<&'a QuizResult> {
    let mut history: Vec<_> = results
        .iter()
        .filter(|result| result.user_login.as_str() == login)
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
    }

    fn login(s: &str) -> Login {
        Login::try_from(s).unwrap()
    }

    #[test]
    fn record_appends_to_history() {
        let mut results = Vec::new();

        let recorded = record(&mut results, login("alice"), "Quiz 1", 12, at(1)).clone();

        assert_eq!(results, vec![recorded.clone()]);
        assert_eq!(recorded.quiz_title, "Quiz 1");
        assert_eq!(recorded.score, 12);
    }

    #[test]
    fn history_is_newest_first_and_per_user() {
        let mut results = Vec::new();
        record(&mut results, login("alice"), "Quiz 1", 1, at(1));
        record(&mut results, login("bob"), "Quiz 1", 2, at(2));
        record(&mut results, login("alice"), "Quiz 2", 3, at(3));

        let history = history_for(&results, "alice");

        let scores: Vec<_> = history.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![3, 1]);
    }

    #[test]
    fn results_round_trip_through_json() {
        let result = QuizResult {
            user_login: login("alice"),
            quiz_title: "Quiz 3".to_string(),
            score: 20,
            date: at(5),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"user_login\":\"alice\""));
        assert_eq!(serde_json::from_str::<QuizResult>(&json).unwrap(), result);
    }
}
