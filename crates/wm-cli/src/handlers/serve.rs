//! Serve command handler.
//!
//! Runs the transfer relay in the foreground until Ctrl-C.

use anyhow::Result;
use wm_axum::{CorsConfig, ServerConfig, start_server};
use wm_core::{RelaySettings, default_files_dir};

use crate::commands::ServeArgs;

/// Translate `serve` options into the server configuration.
pub fn server_config(args: &ServeArgs) -> Result<ServerConfig> {
    let files_dir = match &args.files_dir {
        Some(dir) => dir.clone(),
        None => default_files_dir()?,
    };

    let relay = RelaySettings {
        port: args.port,
        bind_host: args.host.clone(),
        tool: args.tool.clone(),
        send_timeout_secs: args.send_timeout,
        receive_timeout_secs: args.receive_timeout,
        confirm_pattern: args.confirm_pattern.clone(),
        confirm_reply: args.confirm_reply.clone(),
        exit_policy: args.exit_policy,
        ..RelaySettings::with_defaults(files_dir)
    };

    let cors = if args.allowed_origins.is_empty() {
        CorsConfig::AllowAll
    } else {
        CorsConfig::AllowOrigins(args.allowed_origins.clone())
    };

    Ok(ServerConfig { relay, cors })
}

pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = server_config(args)?;
    println!(
        "Serving {} on http://{} (Ctrl-C to stop)",
        config.relay.files_dir.display(),
        config.relay.bind_addr()
    );
    start_server(config).await
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wm_core::ExitPolicy;

    use super::*;
    use crate::commands::Commands;
    use crate::parser::Cli;

    fn serve_args(extra: &[&str]) -> ServeArgs {
        let argv = ["wmarket", "serve"].into_iter().chain(extra.iter().copied());
        match Cli::parse_from(argv).command {
            Some(Commands::Serve(args)) => args,
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_server_config_from_args() {
        let args = serve_args(&[
            "--files-dir",
            "/srv/files",
            "--port",
            "9000",
            "--send-timeout",
            "30",
            "--exit-policy",
            "fail",
        ]);
        let config = server_config(&args).unwrap();
        assert_eq!(config.relay.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.relay.files_dir, std::path::PathBuf::from("/srv/files"));
        assert_eq!(config.relay.send_timeout_secs, Some(30));
        assert_eq!(config.relay.exit_policy, ExitPolicy::Fail);
        assert!(matches!(config.cors, CorsConfig::AllowAll));
    }

    #[test]
    fn test_origins_restrict_cors() {
        let args = serve_args(&["--files-dir", "/srv/files", "--allowed-origins", "http://ui.test"]);
        let config = server_config(&args).unwrap();
        assert!(matches!(
            config.cors,
            CorsConfig::AllowOrigins(ref origins) if origins == &["http://ui.test"]
        ));
    }
}
