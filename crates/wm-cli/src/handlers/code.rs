//! Code command handler.
//!
//! Prints a placeholder code in the same shape the ledger uses for optimistic
//! sales. It is not registered with the transfer tool.

use anyhow::Result;
use wm_core::random_transfer_code;

pub fn execute() -> Result<()> {
    println!("{}", random_transfer_code());
    Ok(())
}
