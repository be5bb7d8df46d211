//! Terminal marketplace for wormhole file transfers.
//!
//! `wmarket serve` runs the transfer relay; the other commands are the
//! marketplace client: they price files, keep the synthetic contract ledger
//! and call the relay over HTTP.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by main.rs binary
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod relay_client;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ServeArgs};
pub use error::CliError;
pub use parser::Cli;
pub use relay_client::{RelayClient, RelayClientError, RelayReply};
