//! Status command handler.
//!
//! The marketplace header: public IP, a simulated latency figure, relay
//! reachability and the balance.

use anyhow::Result;
use wm_core::sample_latency_ms;
use wm_runtime::lookup_public_ip;

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext, bytes: u64) -> Result<()> {
    let latency = sample_latency_ms(bytes, &mut rand::thread_rng());
    let ip = lookup_public_ip(&ctx.settings.ip_lookup_url).await;
    let relay = if ctx.relay.is_healthy().await {
        "online"
    } else {
        "unreachable"
    };

    println!("IP:       {ip}");
    println!("Latency:  {latency} ms");
    println!("Relay:    {} ({relay})", ctx.relay.base_url());
    println!("Balance:  {} UNIT", ctx.ledger.balance());
    Ok(())
}
