//! Contract records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::pricing::calculate_price;

/// Buyer status recorded on every locally created contract.
pub const LOCAL_BUYER: &str = "Local";

/// Network status recorded on every locally created contract.
pub const STABLE_NETWORK: &str = "Stable";

/// A simulated sale of one file transfer.
///
/// Field names serialize in camelCase so the persisted list stays readable
/// by browser clients sharing the same blob layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Creation time in Unix milliseconds. Not guaranteed unique.
    pub id: i64,
    /// Human-readable local creation time, `YYYY-MM-DD HH:MM:SS`.
    pub time: String,
    pub transfer_code: String,
    pub buyer_status: String,
    pub network_status: String,
    /// Price in UNIT.
    pub price: u64,
    pub is_realized: bool,
}

impl Contract {
    /// Create a pending contract for a file of `file_size` bytes at `now`.
    pub fn new(file_size: u64, transfer_code: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            id: now.timestamp_millis(),
            time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            transfer_code: transfer_code.into(),
            buyer_status: LOCAL_BUYER.to_string(),
            network_status: STABLE_NETWORK.to_string(),
            price: calculate_price(file_size),
            is_realized: false,
        }
    }

    /// Create a pending contract stamped with the current time.
    pub fn create(file_size: u64, transfer_code: impl Into<String>) -> Self {
        Self::new(file_size, transfer_code, Local::now())
    }

    /// Clock portion of [`Contract::time`], for compact listings.
    pub fn clock_time(&self) -> &str {
        self.time.split(' ').nth(1).unwrap_or(&self.time)
    }
}

/// When a contract flips to realized.
///
/// Earlier clients disagreed: one marked contracts realized as soon as they
/// were sold, the other only once a matching receive was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RealizationPolicy {
    /// Realized at creation.
    OnSend,
    /// Realized when a receive with the same code is initiated.
    #[default]
    OnReceive,
}

impl std::str::FromStr for RealizationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-send" | "send" => Ok(Self::OnSend),
            "on-receive" | "receive" => Ok(Self::OnReceive),
            other => Err(format!("unknown realization policy: {other}")),
        }
    }
}
