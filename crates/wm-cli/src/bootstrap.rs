//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the marketplace client is wired
//! together: the ledger over the JSON file store, and the relay client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;
use wm_core::{KeyValueStore, Ledger, MarketSettings, ledger_path, validate_market_settings};
use wm_runtime::FileKeyValueStore;

use crate::error::CliError;
use crate::parser::Cli;
use crate::relay_client::RelayClient;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub market: MarketSettings,
    /// File backing the ledger's key/value store.
    pub ledger_path: PathBuf,
}

impl CliConfig {
    /// Config from parsed global options.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let market = MarketSettings {
            relay_url: cli.relay_url.clone(),
            initial_balance: cli.initial_balance,
            realization_policy: cli.realization,
            ip_lookup_url: cli.ip_lookup_url.clone(),
        };
        validate_market_settings(&market).map_err(CliError::from)?;
        Ok(Self {
            market,
            ledger_path: ledger_path().map_err(CliError::from)?,
        })
    }
}

/// Fully composed context for marketplace commands.
pub struct CliContext {
    pub ledger: Ledger,
    pub relay: RelayClient,
    pub settings: MarketSettings,
}

impl CliContext {
    pub fn new(ledger: Ledger, relay: RelayClient, settings: MarketSettings) -> Self {
        Self {
            ledger,
            relay,
            settings,
        }
    }
}

/// Load the ledger and build the relay client.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    debug!(
        ledger = %config.ledger_path.display(),
        relay = %config.market.relay_url,
        policy = ?config.market.realization_policy,
        "CLI bootstrap"
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&config.ledger_path));
    let ledger = Ledger::load(
        store,
        config.market.initial_balance,
        config.market.realization_policy,
    )
    .await
    .map_err(CliError::from)?;
    let relay = RelayClient::new(&config.market.relay_url)?;

    Ok(CliContext::new(ledger, relay, config.market))
}
