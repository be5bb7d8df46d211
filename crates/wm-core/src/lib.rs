//! Core domain for the wormhole storage marketplace.
//!
//! Pure bookkeeping (pricing, placeholder codes, the contract ledger),
//! transfer request validation, settings, data paths, and the ports that
//! infrastructure crates implement. Nothing in here spawns processes or
//! opens sockets.
#![deny(unused_crate_dependencies)]

pub mod ledger;
pub mod paths;
pub mod ports;
pub mod settings;
pub mod transfer;

// Re-export commonly used types for convenience
pub use ledger::{
    BALANCE_KEY, CONTRACTS_KEY, Contract, DEFAULT_INITIAL_BALANCE, Ledger, LedgerError,
    RealizationPolicy, VOCABULARY, calculate_price, generate_transfer_code, is_generated_code,
    random_transfer_code, sample_latency_ms, simulated_latency_ms,
};
pub use paths::{
    DATA_DIR_ENV, PathError, data_root, default_files_dir, ensure_directory, env_file_path,
    ledger_path,
};
pub use ports::{InMemoryStore, KeyValueStore, RepositoryError, TransferLogSink};
pub use settings::{
    DEFAULT_BIND_HOST, DEFAULT_CONFIRM_PATTERN, DEFAULT_CONFIRM_REPLY, DEFAULT_IP_LOOKUP_URL,
    DEFAULT_RELAY_PORT, DEFAULT_TOOL, MarketSettings, RelaySettings, SettingsError,
    validate_market_settings, validate_relay_settings,
};
pub use transfer::{
    ExitPolicy, ReceiveOutcome, SendOutcome, TransferError, TransferMode, validate_code,
    validate_filename,
};
