//! Contracts command handler.
//!
//! Displays the ledger's contracts in a formatted table, newest first.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::tables::CONTRACT_TABLE_WIDTH;
use crate::presentation::{contract_header, contract_row, print_separator};

pub fn execute(ctx: &CliContext) -> Result<()> {
    let contracts = ctx.ledger.contracts();

    if contracts.is_empty() {
        println!("No contracts yet.");
        println!("Use 'wmarket sell <path>' to record your first sale.");
        return Ok(());
    }

    println!("{} contract(s):\n", contracts.len());
    println!("{}", contract_header());
    print_separator(CONTRACT_TABLE_WIDTH);
    for contract in contracts {
        println!("{}", contract_row(contract));
    }

    let pending = contracts.iter().filter(|c| !c.is_realized).count();
    println!();
    println!("Pending: {pending}  Balance: {} UNIT", ctx.ledger.balance());
    Ok(())
}
