//! Parsing of the line-oriented question bank format.
//!
//! Each line holds one question:
//!
//! ```text
//! <question text tokens> <answer1> <answer2> <answer3> <answer4>
//! ```
//!
//! Tokens are separated by single spaces. The last four tokens are answers, and
//! an answer ending in `*` is correct. Lines that do not describe a usable
//! question are dropped and reported through [`Bank::rejected`]; parsing a
//! bank never fails.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::domain::question::{Answer, Question};

/// Number of trailing tokens read as answers.
pub const ANSWER_TOKENS: usize = 4;

/// Minimum number of tokens on a valid line: one text token and four answers.
pub const MIN_TOKENS: usize = ANSWER_TOKENS + 1;

/// Suffix marking a correct answer.
pub const CORRECT_MARKER: char = '*';

/// The only character that separates tokens.
pub const DELIMITER: char = ' ';

/// Why a bank line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line has fewer than [`MIN_TOKENS`] tokens.
    TooFewTokens(usize),
    /// Every answer token was empty or a bare marker.
    NoAnswers,
    /// None of the answers is marked correct, so the question could never be
    /// answered correctly.
    NoCorrectAnswer,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTokens(found) => {
                write!(f, "expected at least {MIN_TOKENS} tokens, found {found}")
            }
            Self::NoAnswers => write!(f, "no answers"),
            Self::NoCorrectAnswer => write!(f, "no answer is marked with '{CORRECT_MARKER}'"),
        }
    }
}

/// A bank line that was dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct MalformedLine {
    /// 1-based line number in the bank source.
    pub line: usize,
    /// Why the line was dropped.
    pub reason: MalformedReason,
}

/// The parsed contents of a question bank.
///
/// Questions keep the answer order of the source; shuffling happens when a
/// [`Session`](crate::Session) is started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bank {
    questions: Vec<Question>,
    rejected: Vec<MalformedLine>,
}

impl Bank {
    /// Parses the full text of a bank.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::from_lines(source.lines())
    }

    /// Parses a bank from an iterator of lines.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut bank = Self::default();

        for (index, line) in lines.into_iter().enumerate() {
            match parse_line(line) {
                Ok(Some(question)) => bank.questions.push(question),
                Ok(None) => {}
                Err(reason) => {
                    let malformed = MalformedLine {
                        line: index + 1,
                        reason,
                    };
                    debug!("Skipping bank {malformed}");
                    bank.rejected.push(malformed);
                }
            }
        }

        bank
    }

    /// The questions parsed from the bank, in source order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Consumes the bank, returning its questions.
    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    /// Lines that were dropped, in source order.
    #[must_use]
    pub fn rejected(&self) -> &[MalformedLine] {
        &self.rejected
    }

    /// The number of usable questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank has no usable questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parses a single bank line.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns the [`MalformedReason`] if the line is not a usable question.
pub fn parse_line(line: &str) -> Result<Option<Question>, MalformedReason> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    // Only the space character delimits tokens; tabs stay inside a token.
    // Consecutive spaces yield empty tokens. They count towards the token
    // total but never become answers or text.
    let tokens: Vec<&str> = line.split(DELIMITER).collect();
    if tokens.len() < MIN_TOKENS {
        return Err(MalformedReason::TooFewTokens(tokens.len()));
    }

    let (text, answers) = tokens.split_at(tokens.len() - ANSWER_TOKENS);

    let text = text
        .iter()
        .filter(|token| !token.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let answers: Vec<Answer> = answers
        .iter()
        .filter_map(|token| parse_answer(token))
        .collect();

    if answers.is_empty() {
        return Err(MalformedReason::NoAnswers);
    }
    if !answers.iter().any(Answer::is_correct) {
        return Err(MalformedReason::NoCorrectAnswer);
    }

    Ok(Some(Question::new(text, answers)))
}

/// An answer token with nothing left after stripping the marker is dropped.
fn parse_answer(token: &str) -> Option<Answer> {
    let answer = token.strip_suffix(CORRECT_MARKER).map_or_else(
        || Answer::new(token, false),
        |text| Answer::new(text.trim_end_matches(CORRECT_MARKER), true),
    );
    (!answer.text().is_empty()).then_some(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(question: &Question) -> Vec<&str> {
        question.answers().iter().map(Answer::text).collect()
    }

    #[test]
    fn parses_question_and_marked_answer() {
        let question = parse_line("Capital of France Paris* London Berlin Madrid")
            .unwrap()
            .unwrap();

        assert_eq!(question.text(), "Capital of France");
        assert_eq!(texts(&question), vec!["Paris", "London", "Berlin", "Madrid"]);
        assert_eq!(question.correct_set().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn multiple_correct_answers() {
        let question = parse_line("Pick primes 2* 3* 4 9").unwrap().unwrap();
        assert_eq!(question.correct_set().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn blank_lines_are_skipped_silently() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t "), Ok(None));
    }

    #[test]
    fn short_lines_are_rejected() {
        assert_eq!(
            parse_line("Too short a* b"),
            Err(MalformedReason::TooFewTokens(4))
        );
        assert_eq!(parse_line("a* b c d"), Err(MalformedReason::TooFewTokens(4)));
    }

    #[test]
    fn empty_answer_tokens_are_discarded() {
        let question = parse_line("Pick one  a* b c").unwrap().unwrap();
        assert_eq!(question.text(), "Pick one");
        assert_eq!(texts(&question), vec!["a", "b", "c"]);
    }

    #[test]
    fn tabs_do_not_separate_tokens() {
        assert_eq!(
            parse_line("Q\ta*\tb\tc\td"),
            Err(MalformedReason::TooFewTokens(1))
        );

        let question = parse_line("Tab\tseparated question a* b c d")
            .unwrap()
            .unwrap();
        assert_eq!(question.text(), "Tab\tseparated question");
        assert_eq!(texts(&question), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn bare_markers_are_discarded() {
        assert_eq!(
            parse_line("Pick * b c d"),
            Err(MalformedReason::NoCorrectAnswer)
        );

        let question = parse_line("Pick ** b* c d").unwrap().unwrap();
        assert_eq!(texts(&question), vec!["b", "c", "d"]);
        assert_eq!(question.correct_set().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn lines_without_correct_answer_are_rejected() {
        assert_eq!(
            parse_line("No marker here a b c d"),
            Err(MalformedReason::NoCorrectAnswer)
        );
    }

    #[test]
    fn bank_collects_questions_and_rejections() {
        let source = "\
Capital of France Paris* London Berlin Madrid

too short
2 plus 2 equals 3 4* 5 22
nothing correct a b c d
";
        let bank = Bank::parse(source);

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].text(), "2 plus 2 equals");
        assert_eq!(
            bank.rejected(),
            &[
                MalformedLine {
                    line: 3,
                    reason: MalformedReason::TooFewTokens(2),
                },
                MalformedLine {
                    line: 5,
                    reason: MalformedReason::NoCorrectAnswer,
                },
            ]
        );
    }

    #[test]
    fn malformed_line_display() {
        let malformed = MalformedLine {
            line: 7,
            reason: MalformedReason::TooFewTokens(3),
        };
        assert_eq!(
            malformed.to_string(),
            "line 7: expected at least 5 tokens, found 3"
        );
    }
}
