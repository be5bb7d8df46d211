//! Settings domain types and validation.
//!
//! Plain configuration structs for the relay server and the marketplace
//! client. Adapters fill them from flags and environment; this module only
//! owns defaults and validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ledger::{DEFAULT_INITIAL_BALANCE, RealizationPolicy};
use crate::transfer::ExitPolicy;

/// Default port of the relay HTTP server.
pub const DEFAULT_RELAY_PORT: u16 = 8088;

/// Default bind address; the relay has no authentication.
pub const DEFAULT_BIND_HOST: &str = "127.0.0.1";

/// Default transfer tool binary.
pub const DEFAULT_TOOL: &str = "wormhole";

/// Prompt fragment that triggers the automatic confirmation.
pub const DEFAULT_CONFIRM_PATTERN: &str = "ok?";

/// Line written to the tool when the prompt is detected.
pub const DEFAULT_CONFIRM_REPLY: &str = "y";

/// Default public IP lookup service.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Relay server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySettings {
    /// HTTP port.
    pub port: u16,
    /// Bind address.
    pub bind_host: String,
    /// Directory send requests resolve filenames against.
    pub files_dir: PathBuf,
    /// Transfer tool binary (name on `PATH` or absolute path).
    pub tool: String,
    /// Give up waiting for a send code after this many seconds.
    pub send_timeout_secs: Option<u64>,
    /// Give up waiting for a receive to finish after this many seconds.
    pub receive_timeout_secs: Option<u64>,
    /// Case-insensitive prompt fragment answered automatically on receive.
    pub confirm_pattern: String,
    /// Answer written to the tool's stdin.
    pub confirm_reply: String,
    /// How a non-zero receive exit status is reported.
    pub exit_policy: ExitPolicy,
}

impl RelaySettings {
    /// Settings with defaults, serving files from `files_dir`.
    pub fn with_defaults(files_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_RELAY_PORT,
            bind_host: DEFAULT_BIND_HOST.to_string(),
            files_dir: files_dir.into(),
            tool: DEFAULT_TOOL.to_string(),
            send_timeout_secs: None,
            receive_timeout_secs: None,
            confirm_pattern: DEFAULT_CONFIRM_PATTERN.to_string(),
            confirm_reply: DEFAULT_CONFIRM_REPLY.to_string(),
            exit_policy: ExitPolicy::default(),
        }
    }

    /// `host:port` the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn send_timeout(&self) -> Option<Duration> {
        self.send_timeout_secs.map(Duration::from_secs)
    }

    pub fn receive_timeout(&self) -> Option<Duration> {
        self.receive_timeout_secs.map(Duration::from_secs)
    }
}

/// Marketplace client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSettings {
    /// Base URL of the relay server.
    pub relay_url: String,
    /// Balance of a ledger with nothing stored yet.
    pub initial_balance: i64,
    /// When contracts are marked realized.
    pub realization_policy: RealizationPolicy,
    /// Service returning `{"ip": "..."}`.
    pub ip_lookup_url: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            relay_url: format!("http://{DEFAULT_BIND_HOST}:{DEFAULT_RELAY_PORT}"),
            initial_balance: DEFAULT_INITIAL_BALANCE,
            realization_policy: RealizationPolicy::default(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Transfer tool cannot be empty")]
    EmptyTool,

    #[error("Confirmation pattern cannot be empty")]
    EmptyConfirmPattern,

    #[error("Timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("Initial balance cannot be negative, got {0}")]
    NegativeBalance(i64),

    #[error("Relay URL must start with http:// or https://, got {0}")]
    InvalidRelayUrl(String),
}

/// Validate relay settings values.
pub fn validate_relay_settings(settings: &RelaySettings) -> Result<(), SettingsError> {
    if settings.port == 0 {
        return Err(SettingsError::InvalidPort);
    }

    if settings.tool.trim().is_empty() {
        return Err(SettingsError::EmptyTool);
    }

    if settings.confirm_pattern.trim().is_empty() {
        return Err(SettingsError::EmptyConfirmPattern);
    }

    if settings.send_timeout_secs == Some(0) || settings.receive_timeout_secs == Some(0) {
        return Err(SettingsError::InvalidTimeout);
    }

    Ok(())
}

/// Validate marketplace settings values.
pub fn validate_market_settings(settings: &MarketSettings) -> Result<(), SettingsError> {
    if settings.initial_balance < 0 {
        return Err(SettingsError::NegativeBalance(settings.initial_balance));
    }

    if !(settings.relay_url.starts_with("http://") || settings.relay_url.starts_with("https://")) {
        return Err(SettingsError::InvalidRelayUrl(settings.relay_url.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_defaults() {
        let settings = RelaySettings::with_defaults("/srv/files");
        assert_eq!(settings.port, 8088);
        assert_eq!(settings.bind_addr(), "127.0.0.1:8088");
        assert_eq!(settings.tool, "wormhole");
        assert_eq!(settings.send_timeout(), None);
        assert_eq!(settings.exit_policy, ExitPolicy::Ignore);
        assert!(validate_relay_settings(&settings).is_ok());
    }

    #[test]
    fn test_relay_validation() {
        let mut settings = RelaySettings::with_defaults("/srv/files");
        settings.tool = "  ".to_string();
        assert!(matches!(
            validate_relay_settings(&settings),
            Err(SettingsError::EmptyTool)
        ));

        let mut settings = RelaySettings::with_defaults("/srv/files");
        settings.receive_timeout_secs = Some(0);
        assert!(matches!(
            validate_relay_settings(&settings),
            Err(SettingsError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_market_defaults() {
        let settings = MarketSettings::default();
        assert_eq!(settings.relay_url, "http://127.0.0.1:8088");
        assert_eq!(settings.initial_balance, 1_000_000);
        assert_eq!(settings.realization_policy, RealizationPolicy::OnReceive);
        assert!(validate_market_settings(&settings).is_ok());
    }

    #[test]
    fn test_market_validation() {
        let settings = MarketSettings {
            relay_url: "127.0.0.1:8088".to_string(),
            ..MarketSettings::default()
        };
        assert!(matches!(
            validate_market_settings(&settings),
            Err(SettingsError::InvalidRelayUrl(_))
        ));
    }
}
