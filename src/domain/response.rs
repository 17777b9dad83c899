use std::collections::BTreeSet;

use thiserror::Error;

/// Separator between answer numbers in a raw response.
const SEPARATOR: char = ',';

/// Reasons a raw response cannot be turned into a [`Submission`].
///
/// All variants are recoverable; the caller prompts for the answer again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidFormat {
    /// A comma-separated token is not an integer.
    #[error("'{0}' is not a number, separate answer numbers by commas")]
    NotANumber(String),

    /// An answer number does not refer to any answer.
    #[error("answer number {index} is out of range (1-{count})")]
    OutOfRange {
        /// The 1-based number given by the user.
        index: i64,
        /// The number of answers on the question.
        count: usize,
    },

    /// No answer numbers were given.
    #[error("select at least one answer")]
    Empty,
}

/// The set of answers selected by the user for one question.
///
/// Indices are 0-based, deduplicated and sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission(BTreeSet<usize>);

impl Submission {
    /// Parses a comma-separated list of 1-based answer numbers.
    ///
    /// Whitespace around each number is ignored and repeated numbers are
    /// collapsed. An out-of-range number rejects the whole response.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormat`] if a token is not an integer, if a number is
    /// outside `1..=answer_count`, or if no numbers are given.
    pub fn parse(raw: &str, answer_count: usize) -> Result<Self, InvalidFormat> {
        if raw.trim().is_empty() {
            return Err(InvalidFormat::Empty);
        }

        let mut indices = BTreeSet::new();
        for token in raw.split(SEPARATOR).map(str::trim) {
            let number: i64 = token
                .parse()
                .map_err(|_| InvalidFormat::NotANumber(token.to_string()))?;

            let index = usize::try_from(number)
                .ok()
                .filter(|n| (1..=answer_count).contains(n))
                .ok_or(InvalidFormat::OutOfRange {
                    index: number,
                    count: answer_count,
                })?;

            indices.insert(index - 1);
        }

        Ok(Self(indices))
    }

    /// The selected 0-based indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// The number of distinct answers selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a parsed submission.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trims_dedups_and_sorts() {
        let submission = Submission::parse(" 3 , 1,3 ", 4).unwrap();
        assert_eq!(submission.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(submission.len(), 2);
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            Submission::parse("1,b", 4),
            Err(InvalidFormat::NotANumber("b".to_string()))
        );
        assert_eq!(
            Submission::parse("1,,2", 4),
            Err(InvalidFormat::NotANumber(String::new()))
        );
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Submission::parse("0", 4),
            Err(InvalidFormat::OutOfRange { index: 0, count: 4 })
        );
        assert_eq!(
            Submission::parse("1,5", 4),
            Err(InvalidFormat::OutOfRange { index: 5, count: 4 })
        );
        assert_eq!(
            Submission::parse("-2", 4),
            Err(InvalidFormat::OutOfRange {
                index: -2,
                count: 4
            })
        );
    }

    #[test]
    fn rejects_empty_response() {
        assert_eq!(Submission::parse("", 4), Err(InvalidFormat::Empty));
        assert_eq!(Submission::parse("   ", 4), Err(InvalidFormat::Empty));
    }
}
