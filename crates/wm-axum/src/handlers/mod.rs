//! HTTP request handlers for the relay server.
//!
//! Handlers are thin wrappers that delegate to `TransferRelay`.

pub mod logs;
pub mod transfer;
