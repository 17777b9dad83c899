pub mod data_dir;
mod bank_file;
/// JSON record files.
pub mod records;

pub use bank_file::{load_bank, BankLoadError};
pub use data_dir::{DataDir, DataDirError, Loaded, Unloaded};
pub use records::RecordsError;
