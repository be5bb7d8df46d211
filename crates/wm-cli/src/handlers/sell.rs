//! Sell command handler.
//!
//! The sale is booked locally before the relay is asked to offer the file:
//! the contract and debit stand even when the relay is unreachable or
//! refuses, and the placeholder code is kept in that case.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use wm_core::{Contract, LedgerError, calculate_price, random_transfer_code};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::price::file_size;

/// Result of one sale.
#[derive(Debug)]
pub struct SaleReport {
    pub contract: Contract,
    /// Whether the contract carries the transfer tool's real code.
    pub relayed: bool,
    /// Why the relay did not provide a code.
    pub relay_error: Option<String>,
}

/// Book the sale of the file at `path` and offer it through the relay.
pub async fn sell(ctx: &mut CliContext, path: &Path) -> Result<SaleReport, CliError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Arguments(format!("unusable file name: {}", path.display())))?;

    let size = file_size(path)?;
    let price = calculate_price(size);
    info!(file = %path.display(), size, price, "Pricing sale");

    if !ctx.ledger.can_afford(price) {
        return Err(LedgerError::InsufficientBalance {
            balance: ctx.ledger.balance(),
            price,
        }
        .into());
    }

    let placeholder = random_transfer_code();
    let mut contract = ctx.ledger.initiate_send(size, placeholder.as_str()).await?;

    match ctx.relay.send(filename).await {
        Ok(code) => {
            ctx.ledger.rebind_code(&placeholder, &code).await?;
            contract.transfer_code = code;
            Ok(SaleReport {
                contract,
                relayed: true,
                relay_error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, code = %placeholder, "Relay send failed, keeping local code");
            Ok(SaleReport {
                contract,
                relayed: false,
                relay_error: Some(e.to_string()),
            })
        }
    }
}

pub async fn execute(ctx: &mut CliContext, path: &Path) -> Result<()> {
    let report = sell(ctx, path).await?;

    println!(
        "Sold {} for {} UNIT",
        path.display(),
        report.contract.price
    );
    if report.relayed {
        println!("Transfer code: {}", report.contract.transfer_code);
        println!("Share it with the buyer: wmarket buy {}", report.contract.transfer_code);
    } else {
        println!(
            "Local code: {} (the relay did not offer the file)",
            report.contract.transfer_code
        );
    }
    println!("Balance: {} UNIT", ctx.ledger.balance());
    Ok(())
}
