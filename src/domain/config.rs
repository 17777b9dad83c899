use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{leaderboard::LEADERBOARD_SIZE, session::SESSION_LENGTH};

/// Configuration for a quiz data directory.
///
/// This struct holds settings that control session size, leaderboard size and
/// where user and result records are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The maximum number of questions sampled for one session.
    session_length: usize,

    /// The maximum number of entries shown on a leaderboard.
    leaderboard_size: usize,

    /// The file users are stored in, relative to the data directory.
    pub users_file: PathBuf,

    /// The file results are stored in, relative to the data directory.
    pub results_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_length: default_session_length(),
            leaderboard_size: default_leaderboard_size(),
            users_file: default_users_file(),
            results_file: default_results_file(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if the session or leaderboard size is zero.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of questions sampled for a session.
    #[must_use]
    pub const fn session_length(&self) -> usize {
        self.session_length
    }

    /// Returns the maximum number of leaderboard entries.
    #[must_use]
    pub const fn leaderboard_size(&self) -> usize {
        self.leaderboard_size
    }
}

const fn default_session_length() -> usize {
    SESSION_LENGTH
}

const fn default_leaderboard_size() -> usize {
    LEADERBOARD_SIZE
}

fn default_users_file() -> PathBuf {
    PathBuf::from("users.json")
}

fn default_results_file() -> PathBuf {
    PathBuf::from("results.json")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// The number of questions sampled for a session.
        #[serde(default = "default_session_length")]
        session_length: usize,

        #[serde(default = "default_leaderboard_size")]
        leaderboard_size: usize,

        #[serde(default = "default_users_file")]
        users_file: PathBuf,

        #[serde(default = "default_results_file")]
        results_file: PathBuf,
    },
}

impl TryFrom<Versions> for super::Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                session_length,
                leaderboard_size,
                users_file,
                results_file,
            } => {
                if session_length == 0 {
                    return Err("session_length must be at least 1".to_string());
                }
                if leaderboard_size == 0 {
                    return Err("leaderboard_size must be at least 1".to_string());
                }
                Ok(Self {
                    session_length,
                    leaderboard_size,
                    users_file,
                    results_file,
                })
            }
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            session_length: config.session_length,
            leaderboard_size: config.leaderboard_size,
            users_file: config.users_file,
            results_file: config.results_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nsession_length = 10\nleaderboard_size = 5\nusers_file = \"people.json\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.session_length(), 10);
        assert_eq!(config.leaderboard_size(), 5);
        assert_eq!(config.users_file, PathBuf::from("people.json"));
        assert_eq!(config.results_file, PathBuf::from("results.json"));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nsession_length = \"twenty\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        for (field, content) in [
            ("session_length", "_version = \"1\"\nsession_length = 0\n"),
            ("leaderboard_size", "_version = \"1\"\nleaderboard_size = 0\n"),
        ] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(content.as_bytes()).unwrap();

            let error = Config::load(file.path()).unwrap_err();
            assert!(error.starts_with("Failed to parse config file:"));
            assert!(error.contains(&format!("{field} must be at least 1")));
        }
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.session_length(), 20);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        Config::default().save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
