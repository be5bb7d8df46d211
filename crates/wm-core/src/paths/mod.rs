//! Path utilities for marketplace data directories.
//!
//! - Data root (`WMARKET_DATA_DIR` or the platform data dir)
//! - Ledger blob file
//! - Files directory served by the relay
//! - `.env` overrides

mod ensure;
mod error;
mod files;
mod platform;

#[cfg(test)]
mod test_utils;

pub use ensure::ensure_directory;
pub use error::PathError;
pub use files::{default_files_dir, env_file_path, ledger_path};
pub use platform::{DATA_DIR_ENV, data_root};
