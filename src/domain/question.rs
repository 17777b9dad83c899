use rand::{seq::SliceRandom, Rng};

use crate::domain::response::{InvalidFormat, Submission};

/// A single selectable answer to a [`Question`].
///
/// Correctness is fixed when the answer is read from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    text: String,
    correct: bool,
}

impl Answer {
    /// Creates a new answer.
    #[must_use]
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }

    /// The text displayed to the user.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this answer belongs to the correct set.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.correct
    }
}

/// A multi-select question.
///
/// The order of [`Question::answers`] is the display order. Indices in a
/// [`Submission`] refer to this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<Answer>,
}

impl Question {
    /// Creates a question from its text and answers, in display order.
    #[must_use]
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }

    /// The question text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The answers in their current display order.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The 0-based positions of all correct answers, ascending.
    pub fn correct_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_correct())
            .map(|(index, _)| index)
    }

    /// Returns `true` if the submission selects exactly the correct set.
    ///
    /// There is no partial credit.
    #[must_use]
    pub fn is_correct(&self, submission: &Submission) -> bool {
        self.correct_set().eq(submission.indices())
    }

    /// Parses a raw response against this question and scores it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormat`] if the response cannot be parsed into a
    /// non-empty set of in-range answer numbers.
    pub fn check(&self, raw: &str) -> Result<bool, InvalidFormat> {
        let submission = Submission::parse(raw, self.answers.len())?;
        Ok(self.is_correct(&submission))
    }

    /// Randomises the display order of the answers.
    pub fn shuffle_answers<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.answers.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            "Which are even?",
            vec![
                Answer::new("2", true),
                Answer::new("3", false),
                Answer::new("4", true),
                Answer::new("5", false),
            ],
        )
    }

    #[test]
    fn correct_set_is_ascending_positions() {
        assert_eq!(question().correct_set().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn exact_match_is_required() {
        let question = question();

        assert!(question.check("1,3").unwrap());
        assert!(question.check("3, 1").unwrap());
        assert!(!question.check("1,2").unwrap());
        assert!(!question.check("1").unwrap());
        assert!(!question.check("1,2,3").unwrap());
    }

    #[test]
    fn duplicates_are_ignored() {
        let question = question();
        assert_eq!(question.check("1,1,3"), question.check("1,3"));
        assert!(question.check("1,1,3").unwrap());
    }

    #[test]
    fn question_without_correct_answers_never_matches() {
        let question = Question::new("?", vec![Answer::new("a", false)]);
        assert!(!question.check("1").unwrap());
    }

    #[test]
    fn shuffle_keeps_every_answer() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = question();
        shuffled.shuffle_answers(&mut rng);

        let mut texts: Vec<_> = shuffled.answers().iter().map(Answer::text).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["2", "3", "4", "5"]);
        assert_eq!(shuffled.correct_set().count(), 2);
    }
}
