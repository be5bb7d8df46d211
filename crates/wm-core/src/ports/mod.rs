//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No filesystem or process types in any signature
//! - Storage ports deal in opaque string blobs; the ledger owns the encoding
//! - Log sinks are synchronous and must never block the caller

pub mod kv_store;
pub mod transfer_log;

use thiserror::Error;

pub use kv_store::{InMemoryStore, KeyValueStore};
pub use transfer_log::TransferLogSink;

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (file I/O,
/// encodings) and provides a clean interface for the ledger to handle
/// storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
