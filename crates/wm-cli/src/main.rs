//! CLI entry point - the composition root.
//!
//! Loads `.env` overrides, initialises tracing, and dispatches commands.
//! Commands that touch the ledger or the relay client go through
//! [`bootstrap`]; `serve` builds the relay server instead.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use wm_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn load_env_files() {
    // Earlier files win; dotenvy never overrides variables already set
    dotenvy::dotenv().ok();
    if let Ok(path) = wm_core::env_file_path() {
        dotenvy::from_path(path).ok();
    }
}

/// `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Commands without ledger access
    match command {
        Commands::Serve(args) => return handlers::serve::execute(args).await,
        Commands::Paths => return handlers::paths::execute(),
        Commands::Price { path, bytes } => {
            return handlers::price::execute(path.as_deref(), *bytes);
        }
        Commands::Code => return handlers::code::execute(),
        _ => {}
    }

    let config = CliConfig::from_cli(&cli)?;
    let mut ctx = bootstrap(config).await?;

    match command {
        Commands::Sell { path } => handlers::sell::execute(&mut ctx, path).await,
        Commands::Buy { code } => handlers::buy::execute(&mut ctx, code).await,
        Commands::Contracts => handlers::contracts::execute(&ctx),
        Commands::Balance => handlers::balance::execute(&ctx),
        Commands::Status { bytes } => handlers::status::execute(&ctx, *bytes).await,
        Commands::Logs => handlers::logs::execute(&ctx).await,
        Commands::Serve(_) | Commands::Paths | Commands::Price { .. } | Commands::Code => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_env_files();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
