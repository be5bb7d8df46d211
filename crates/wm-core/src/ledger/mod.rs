//! Synthetic marketplace bookkeeping.
//!
//! Pricing, transfer codes and the contract/balance ledger. The ledger keeps
//! its state in memory and writes both blobs through a [`KeyValueStore`] after
//! every mutation.

mod code;
mod contract;
mod pricing;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ports::{KeyValueStore, RepositoryError};

pub use code::{VOCABULARY, generate_transfer_code, is_generated_code, random_transfer_code};
pub use contract::{Contract, LOCAL_BUYER, RealizationPolicy, STABLE_NETWORK};
pub use pricing::{
    BASE_PRICE, BYTES_PER_MIB, calculate_price, sample_latency_ms, simulated_latency_ms,
};

/// Key of the JSON-encoded contract list.
pub const CONTRACTS_KEY: &str = "storage_contracts_db";

/// Key of the decimal-encoded balance.
pub const BALANCE_KEY: &str = "storage_balance";

/// Starting balance for a fresh ledger, in UNIT.
pub const DEFAULT_INITIAL_BALANCE: i64 = 1_000_000;

/// Ledger bookkeeping errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The balance does not cover the price.
    #[error("insufficient balance: {balance} UNIT available, {price} UNIT required")]
    InsufficientBalance { balance: i64, price: u64 },

    /// Persisting the ledger failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Contract list and balance, persisted through a key/value store.
pub struct Ledger {
    store: Arc<dyn KeyValueStore>,
    contracts: Vec<Contract>,
    balance: i64,
    policy: RealizationPolicy,
}

impl Ledger {
    /// Load the ledger from `store`.
    ///
    /// Missing keys fall back to an empty list and `initial_balance`. A blob
    /// that fails to decode is logged and treated as missing.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        initial_balance: i64,
        policy: RealizationPolicy,
    ) -> Result<Self, LedgerError> {
        let contracts = match store.get(CONTRACTS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to decode stored contracts, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let balance = match store.get(BALANCE_KEY).await? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                warn!(error = %e, raw = %raw, "Failed to decode stored balance, resetting");
                initial_balance
            }),
            None => initial_balance,
        };

        debug!(contracts = contracts.len(), balance, ?policy, "Ledger loaded");

        Ok(Self {
            store,
            contracts,
            balance,
            policy,
        })
    }

    /// Contracts, most recent first.
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Current balance in UNIT.
    pub const fn balance(&self) -> i64 {
        self.balance
    }

    /// Active realization policy.
    pub const fn policy(&self) -> RealizationPolicy {
        self.policy
    }

    /// Whether the balance covers `price`.
    pub fn can_afford(&self, price: u64) -> bool {
        i64::try_from(price).is_ok_and(|p| self.balance >= p)
    }

    /// Record a sale of a `file_size`-byte file under `code`.
    ///
    /// Fails without touching state when the balance does not cover the
    /// price. Otherwise the contract is prepended, the price debited and both
    /// blobs persisted.
    pub async fn initiate_send(
        &mut self,
        file_size: u64,
        code: impl Into<String>,
    ) -> Result<Contract, LedgerError> {
        let price = calculate_price(file_size);
        if !self.can_afford(price) {
            return Err(LedgerError::InsufficientBalance {
                balance: self.balance,
                price,
            });
        }

        let mut contract = Contract::create(file_size, code);
        contract.is_realized = self.policy == RealizationPolicy::OnSend;

        self.contracts.insert(0, contract.clone());
        self.balance -= i64::try_from(price).unwrap_or(i64::MAX);
        self.persist().await?;

        debug!(code = %contract.transfer_code, price, balance = self.balance, "Contract recorded");
        Ok(contract)
    }

    /// Mark every contract whose code equals `code` as realized.
    ///
    /// Returns how many contracts matched.
    pub async fn mark_realized(&mut self, code: &str) -> Result<usize, LedgerError> {
        let mut matched = 0;
        for contract in self.contracts.iter_mut().filter(|c| c.transfer_code == code) {
            contract.is_realized = true;
            matched += 1;
        }
        self.persist().await?;
        Ok(matched)
    }

    /// Replace a placeholder code with the code the transfer tool produced.
    ///
    /// Returns whether a contract carried `old`.
    pub async fn rebind_code(&mut self, old: &str, new: &str) -> Result<bool, LedgerError> {
        let Some(contract) = self.contracts.iter_mut().find(|c| c.transfer_code == old) else {
            return Ok(false);
        };
        contract.transfer_code = new.to_string();
        self.persist().await?;
        Ok(true)
    }

    async fn persist(&self) -> Result<(), LedgerError> {
        let contracts = serde_json::to_string(&self.contracts)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.store.set(CONTRACTS_KEY, &contracts).await?;
        self.store
            .set(BALANCE_KEY, &self.balance.to_string())
            .await?;
        Ok(())
    }
}
