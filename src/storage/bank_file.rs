use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::Bank;

/// Errors that can occur when reading a question bank file.
#[derive(Debug, thiserror::Error)]
pub enum BankLoadError {
    /// The bank file does not exist.
    #[error("question bank {} not found", .0.display())]
    SourceNotFound(PathBuf),
    /// The bank file exists but could not be read.
    #[error("failed to read question bank {}: {source}", path.display())]
    Io {
        /// The bank file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// Reads and parses a question bank file.
///
/// Malformed lines are not errors; they are reported by
/// [`Bank::rejected`].
///
/// # Errors
///
/// Returns [`BankLoadError::SourceNotFound`] if the file does not exist, or
/// [`BankLoadError::Io`] if it cannot be read.
pub fn load_bank(path: &Path) -> Result<Bank, BankLoadError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => BankLoadError::SourceNotFound(path.to_path_buf()),
        _ => BankLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let bank = Bank::parse(&content);
    tracing::debug!(
        "Loaded {} questions from {} ({} lines rejected)",
        bank.len(),
        path.display(),
        bank.rejected().len()
    );
    Ok(bank)
}
