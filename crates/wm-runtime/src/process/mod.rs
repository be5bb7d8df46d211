//! Process management for transfer tool sessions.
//!
//! # Structure
//!
//! - `spawn_output_pump` - chunked stdout/stderr reading into scanned events
//! - `SessionRegistry` - live session tracking for shutdown
//! - `shutdown_child` - SIGTERM → SIGKILL escalation with reaping

mod registry;
pub mod shutdown;
mod stream;
mod types;

pub use registry::SessionRegistry;
pub use shutdown::shutdown_child;
pub use stream::{OutputEvent, StreamKind, spawn_output_pump};
pub use types::{SessionId, SessionInfo, SessionReport};
