//! Main CLI parser and top-level argument handling.
//!
//! Global options configure the marketplace client. Every option can also
//! be set through a `WMARKET_*` environment variable or the `.env` file in
//! the data directory.

use clap::Parser;
use wm_core::{DEFAULT_INITIAL_BALANCE, DEFAULT_IP_LOOKUP_URL, RealizationPolicy};

use crate::commands::Commands;

/// Default relay base URL.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8088";

/// Command-line interface definition for the wormhole marketplace.
#[derive(Parser)]
#[command(name = "wmarket")]
#[command(about = "Sell and buy file transfers over magic-wormhole")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Base URL of the transfer relay
    #[arg(long, env = "WMARKET_RELAY_URL", global = true, default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,

    /// Balance of a ledger that has never been written, in UNIT
    #[arg(long, env = "WMARKET_INITIAL_BALANCE", global = true, default_value_t = DEFAULT_INITIAL_BALANCE)]
    pub initial_balance: i64,

    /// When contracts are marked realized: "on-send" or "on-receive"
    #[arg(long, env = "WMARKET_REALIZATION", global = true, default_value = "on-receive")]
    pub realization: RealizationPolicy,

    /// Service answering with the caller's public IP as `{"ip": "..."}`
    #[arg(long, env = "WMARKET_IP_LOOKUP_URL", global = true, default_value = DEFAULT_IP_LOOKUP_URL)]
    pub ip_lookup_url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "wmarket",
            "--verbose",
            "--relay-url",
            "http://10.0.0.2:9000",
            "--realization",
            "on-send",
            "balance",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.relay_url, "http://10.0.0.2:9000");
        assert_eq!(cli.realization, RealizationPolicy::OnSend);
        assert!(matches!(cli.command, Some(Commands::Balance)));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wmarket", "contracts"]);
        assert_eq!(cli.initial_balance, 1_000_000);
        assert_eq!(cli.realization, RealizationPolicy::OnReceive);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["wmarket", "--realization", "never", "balance"]).is_err());
    }
}
