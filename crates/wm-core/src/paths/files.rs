//! Locations of the files the marketplace reads and writes.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Blob file backing the ledger's key/value store.
pub fn ledger_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("ledger.json"))
}

/// Default directory that send requests resolve filenames against.
pub fn default_files_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("files"))
}

/// Location of the `.env` file that stores user overrides.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}
