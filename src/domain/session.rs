use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    question::Question,
    response::InvalidFormat,
    result::{self, QuizResult},
    user::Login,
};

/// Default number of questions in a session.
pub const SESSION_LENGTH: usize = 20;

/// Picks up to `target` distinct questions uniformly at random and shuffles
/// the answers of each.
///
/// If the bank holds fewer than `target` questions, all of them are returned
/// in random order.
pub fn sample<R: Rng + ?Sized>(bank: &[Question], target: usize, rng: &mut R) -> Vec<Question> {
    let mut questions: Vec<Question> = bank.choose_multiple(rng, target).cloned().collect();
    // choose_multiple does not randomise output order
    questions.shuffle(rng);
    for question in &mut questions {
        question.shuffle_answers(rng);
    }
    questions
}

/// Errors returned by [`Session::submit`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The response could not be parsed. The same question remains current.
    #[error(transparent)]
    Invalid(#[from] InvalidFormat),
    /// Every question has already been answered.
    #[error("the session is already complete")]
    Complete,
}

/// One run through a sampled set of questions.
///
/// Questions are answered in order. Each accepted response moves the session
/// on to the next question; the score is the number of fully correct answers.
#[derive(Debug, Clone)]
pub struct Session {
    quiz_title: String,
    questions: Vec<Question>,
    outcomes: Vec<bool>,
}

impl Session {
    /// Starts a session by sampling `target` questions from the bank.
    pub fn start<R: Rng + ?Sized>(
        quiz_title: impl Into<String>,
        bank: &[Question],
        target: usize,
        rng: &mut R,
    ) -> Self {
        let questions = sample(bank, target, rng);
        let quiz_title = quiz_title.into();
        debug!(
            "Started {quiz_title} with {} of {} questions",
            questions.len(),
            bank.len()
        );
        Self::from_questions(quiz_title, questions)
    }

    /// Starts a session over the given questions, in the given order.
    #[must_use]
    pub fn from_questions(quiz_title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            quiz_title: quiz_title.into(),
            outcomes: Vec::with_capacity(questions.len()),
            questions,
        }
    }

    /// The title results are recorded under.
    #[must_use]
    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    /// All questions in presentation order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.outcomes.len())
    }

    /// The 0-based position of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.outcomes.len()
    }

    /// The number of questions in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the session has no questions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Whether every question has been answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.questions.len()
    }

    /// Scores a raw response to the current question.
    ///
    /// On success the session advances and the correctness of the answer is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] if the response is malformed; the session
    ///   does not advance
    /// - [`SubmitError::Complete`] if there is no current question
    pub fn submit(&mut self, raw: &str) -> Result<bool, SubmitError> {
        let question = self.current().ok_or(SubmitError::Complete)?;
        let correct = question.check(raw)?;
        self.outcomes.push(correct);
        Ok(correct)
    }

    /// Correctness of each answered question, in order.
    #[must_use]
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    /// The number of fully correct answers so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        let correct = self.outcomes.iter().filter(|correct| **correct).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Records the session's result in the history.
    pub fn record(
        self,
        user_login: Login,
        date: DateTime<Utc>,
        results: &mut Vec<QuizResult>,
    ) -> &QuizResult {
        let score = self.score();
        result::record(results, user_login, self.quiz_title, score, date)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::domain::question::Answer;

    fn bank(size: usize) -> Vec<Question> {
        (0..size)
            .map(|i| {
                Question::new(
                    format!("Question {i}"),
                    vec![
                        Answer::new("a", true),
                        Answer::new("b", false),
                        Answer::new("c", true),
                        Answer::new("d", false),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn small_bank_is_returned_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        let questions = sample(&bank(5), SESSION_LENGTH, &mut rng);

        assert_eq!(questions.len(), 5);
        let texts: HashSet<_> = questions.iter().map(Question::text).collect();
        assert_eq!(texts.len(), 5);
    }

    #[test]
    fn large_bank_is_truncated_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(2);
        let questions = sample(&bank(50), SESSION_LENGTH, &mut rng);

        assert_eq!(questions.len(), SESSION_LENGTH);
        let texts: HashSet<_> = questions.iter().map(Question::text).collect();
        assert_eq!(texts.len(), SESSION_LENGTH);
    }

    #[test]
    fn answer_order_varies_between_sessions() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = bank(1);

        let orders: HashSet<Vec<String>> = (0..32)
            .map(|_| {
                sample(&source, 1, &mut rng)[0]
                    .answers()
                    .iter()
                    .map(|answer| answer.text().to_string())
                    .collect::<Vec<_>>()
            })
            .collect();

        assert!(orders.len() > 1);
    }

    #[test]
    fn scoring_advances_and_counts_correct_questions() {
        let mut session = Session::from_questions("Quiz 1", bank(3));

        assert_eq!(session.submit("1,3"), Ok(true));
        assert_eq!(
            session.submit("x"),
            Err(SubmitError::Invalid(InvalidFormat::NotANumber(
                "x".to_string()
            )))
        );
        assert_eq!(session.position(), 1);
        assert_eq!(session.submit("1"), Ok(false));
        assert_eq!(session.submit("3,1,1"), Ok(true));

        assert!(session.is_complete());
        assert_eq!(session.submit("1"), Err(SubmitError::Complete));
        assert_eq!(session.score(), 2);
        assert_eq!(session.outcomes(), &[true, false, true]);
    }

    #[test]
    fn record_uses_title_and_score() {
        let mut session = Session::from_questions("Quiz 2", bank(1));
        session.submit("1,3").unwrap();

        let mut results = Vec::new();
        let date = Utc::now();
        let login = Login::try_from("alice").unwrap();
        let recorded = session.record(login.clone(), date, &mut results).clone();

        assert_eq!(
            recorded,
            QuizResult {
                user_login: login,
                quiz_title: "Quiz 2".to_string(),
                score: 1,
                date,
            }
        );
        assert_eq!(results.len(), 1);
    }
}
