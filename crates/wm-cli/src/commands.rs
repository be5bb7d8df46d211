//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use wm_core::{
    DEFAULT_BIND_HOST, DEFAULT_CONFIRM_PATTERN, DEFAULT_CONFIRM_REPLY, DEFAULT_RELAY_PORT,
    DEFAULT_TOOL, ExitPolicy,
};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the transfer relay server
    Serve(ServeArgs),

    /// Sell a file: record a contract, debit the price and offer it through the relay
    ///
    /// The relay resolves the file's name against its own files directory.
    Sell {
        /// File to sell
        path: PathBuf,
    },

    /// Buy a transfer by its code
    Buy {
        /// Transfer code shared by the seller
        code: String,
    },

    /// List recorded contracts, most recent first
    Contracts,

    /// Show the current balance
    Balance,

    /// Price a file without selling it
    Price {
        /// File to price
        #[arg(required_unless_present = "bytes")]
        path: Option<PathBuf>,
        /// Price this many bytes instead of a file
        #[arg(long, conflicts_with = "path")]
        bytes: Option<u64>,
    },

    /// Generate a placeholder transfer code
    Code,

    /// Show public IP, simulated latency, relay health and balance
    Status {
        /// File size the latency figure is computed for
        #[arg(long, default_value_t = 0)]
        bytes: u64,
    },

    /// Follow the relay's live log stream
    Logs,

    /// Show resolved data paths
    Paths,
}

/// Options of `wmarket serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "WMARKET_PORT", default_value_t = DEFAULT_RELAY_PORT)]
    pub port: u16,

    /// Address to bind; the relay has no authentication
    #[arg(long, env = "WMARKET_BIND_HOST", default_value = DEFAULT_BIND_HOST)]
    pub host: String,

    /// Directory send requests resolve filenames against [default: <data dir>/files]
    #[arg(long, env = "WMARKET_FILES_DIR")]
    pub files_dir: Option<PathBuf>,

    /// Transfer tool binary
    #[arg(long, env = "WMARKET_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Seconds to wait for a send code before giving up [default: wait forever]
    #[arg(long, env = "WMARKET_SEND_TIMEOUT")]
    pub send_timeout: Option<u64>,

    /// Seconds to wait for a receive to finish before giving up [default: wait forever]
    #[arg(long, env = "WMARKET_RECEIVE_TIMEOUT")]
    pub receive_timeout: Option<u64>,

    /// Prompt fragment answered automatically on receive (case-insensitive)
    #[arg(long, env = "WMARKET_CONFIRM_PATTERN", default_value = DEFAULT_CONFIRM_PATTERN)]
    pub confirm_pattern: String,

    /// Answer written to the tool when the prompt appears
    #[arg(long, env = "WMARKET_CONFIRM_REPLY", default_value = DEFAULT_CONFIRM_REPLY)]
    pub confirm_reply: String,

    /// Report a failed receive ("fail") or only log it ("ignore")
    #[arg(long, env = "WMARKET_EXIT_POLICY", default_value = "ignore")]
    pub exit_policy: ExitPolicy,

    /// Comma-separated CORS origins [default: any]
    #[arg(long, env = "WMARKET_CORS_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_serve_args() {
        let cli = Cli::parse_from([
            "wmarket",
            "serve",
            "-p",
            "9099",
            "--tool",
            "/opt/wormhole",
            "--receive-timeout",
            "60",
            "--exit-policy",
            "fail",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 9099);
        assert_eq!(args.tool, "/opt/wormhole");
        assert_eq!(args.receive_timeout, Some(60));
        assert_eq!(args.send_timeout, None);
        assert_eq!(args.exit_policy, ExitPolicy::Fail);
        assert_eq!(args.allowed_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_price_needs_path_or_bytes() {
        assert!(Cli::try_parse_from(["wmarket", "price"]).is_err());
        assert!(Cli::try_parse_from(["wmarket", "price", "--bytes", "10"]).is_ok());
        assert!(Cli::try_parse_from(["wmarket", "price", "a.bin", "--bytes", "10"]).is_err());
    }
}
