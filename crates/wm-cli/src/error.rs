//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use thiserror::Error;
use wm_core::{LedgerError, PathError, RepositoryError, SettingsError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error (blank code, not a file).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The balance does not cover the price.
    #[error("Insufficient balance: {balance} UNIT available, {price} UNIT required")]
    InsufficientBalance { balance: i64, price: u64 },

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger storage error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,              // EX_USAGE
            Self::InsufficientBalance { .. } => 1,
            Self::Io(_) => 74,                    // EX_IOERR
            Self::Config(_) => 78,                // EX_CONFIG
            Self::Storage(_) => 73,               // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<LedgerError> for CliError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { balance, price } => {
                Self::InsufficientBalance { balance, price }
            }
            LedgerError::Repository(repo_err) => repo_err.into(),
        }
    }
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
