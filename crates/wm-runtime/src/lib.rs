//! Runtime adapters for the wormhole marketplace.
//!
//! Everything that touches the operating system lives here: spawning and
//! supervising the transfer tool, scanning its console output, the JSON file
//! store behind the ledger and the public IP lookup.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod ip;
mod kv_file;
pub mod process;
mod relay;
pub mod scan;

#[cfg(test)]
use tokio_test as _;

pub use ip::{FALLBACK_IP, IpLookupError, fetch_public_ip, lookup_public_ip};
pub use kv_file::FileKeyValueStore;
pub use process::{SessionId, SessionInfo, SessionRegistry};
pub use relay::TransferRelay;
pub use scan::{CaptureMatcher, LineScanner, OutputMatcher, PromptMatcher};
