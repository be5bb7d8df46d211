//! Buy command handler.

use anyhow::Result;
use tracing::{info, warn};
use wm_core::RealizationPolicy;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::relay_client::RelayReply;

/// Result of one purchase.
#[derive(Debug)]
pub struct PurchaseReport {
    pub code: String,
    /// Contracts flipped to realized by this purchase.
    pub realized: usize,
    /// The relay's reply, when it produced one.
    pub reply: Option<RelayReply>,
    pub relay_error: Option<String>,
}

/// Realize matching contracts and ask the relay to receive `code`.
pub async fn buy(ctx: &mut CliContext, code: &str) -> Result<PurchaseReport, CliError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CliError::Arguments("code missing".into()));
    }

    let realized = if ctx.ledger.policy() == RealizationPolicy::OnReceive {
        ctx.ledger.mark_realized(code).await?
    } else {
        0
    };
    info!(code, realized, "Starting receive");

    let (reply, relay_error) = match ctx.relay.receive(code).await {
        Ok(reply) => (Some(reply), None),
        Err(e) => {
            warn!(error = %e, code, "Relay receive failed");
            (None, Some(e.to_string()))
        }
    };

    Ok(PurchaseReport {
        code: code.to_string(),
        realized,
        reply,
        relay_error,
    })
}

pub async fn execute(ctx: &mut CliContext, code: &str) -> Result<()> {
    let report = buy(ctx, code).await?;

    if report.realized > 0 {
        println!("Realized {} contract(s) for {}", report.realized, report.code);
    }
    match (&report.reply, &report.relay_error) {
        (Some(reply), _) => {
            println!("Receive finished for {}", report.code);
            if let Some(path) = &reply.saved_path {
                println!("Saved to: {path}");
            }
            if let Some(exit_code) = reply.exit_code.filter(|c| *c != 0) {
                println!("Transfer tool exited with code {exit_code}");
            }
        }
        (None, Some(error)) => println!("Receive not completed: {error}"),
        (None, None) => {}
    }
    Ok(())
}
