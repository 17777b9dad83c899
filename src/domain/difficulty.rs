use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A difficulty tier. Each tier has its own question bank and its own
/// leaderboard title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Tier 1.
    Easy,
    /// Tier 2.
    Medium,
    /// Tier 3.
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// The tier number, starting at 1.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// The file name of this tier's question bank.
    #[must_use]
    pub const fn bank_file_name(self) -> &'static str {
        match self {
            Self::Easy => "easy.txt",
            Self::Medium => "medium.txt",
            Self::Hard => "hard.txt",
        }
    }

    /// The quiz title that results for this tier are recorded under.
    #[must_use]
    pub fn quiz_title(self) -> String {
        format!("Quiz {}", self.level())
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no difficulty tier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty '{0}': expected easy, medium, hard or 1-3")]
pub struct UnknownDifficulty(String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s) || tier.level().to_string() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}
