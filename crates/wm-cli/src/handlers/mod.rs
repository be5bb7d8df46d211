//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &mut CliContext, ...) -> Result<()>`
//!   (read-only commands take `&CliContext`, ledger-free ones take nothing)
//! - Thin wrappers that validate CLI input, call the ledger or the relay
//!   client, and format output for the terminal
//!
//! `sell` and `buy` also expose the step that produces their report so it can
//! be exercised without capturing stdout.

pub mod balance;
pub mod buy;
pub mod code;
pub mod contracts;
pub mod logs;
pub mod paths;
pub mod price;
pub mod sell;
pub mod serve;
pub mod status;
