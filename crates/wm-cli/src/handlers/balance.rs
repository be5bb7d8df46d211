//! Balance command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("Balance: {} UNIT", ctx.ledger.balance());
    Ok(())
}
