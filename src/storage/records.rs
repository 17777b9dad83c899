//! Loading and saving lists of records as pretty-printed JSON arrays.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};

/// Errors that can occur when reading or writing a record file.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    /// An I/O error occurred.
    #[error("failed to access record file: {0}")]
    Io(#[from] io::Error),
    /// The file content is not a valid list of records.
    #[error("invalid record file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a list of records from a JSON file.
///
/// A missing file is treated as an empty list.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RecordsError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No record file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Saves a list of records to a JSON file, replacing its contents.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save<T: Serialize>(path: &Path, records: &[T]) -> Result<(), RecordsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();

        let records: Vec<String> = load(&tmp.path().join("absent.json")).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/records.json");

        save(&path, &[1_u32, 2, 3]).unwrap();

        assert_eq!(load::<u32>(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.json");
        std::fs::write(&path, "{ not a list").unwrap();

        assert!(matches!(load::<u32>(&path), Err(RecordsError::Json(_))));
    }
}
