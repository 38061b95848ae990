use crate::policy::PolicySource;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Simulated wallet ages span 1 day to 3 years
const MIN_WALLET_AGE_DAYS: u64 = 1;
const MAX_WALLET_AGE_DAYS: u64 = 365 * 3;

/// Base transaction count range before the age bonus
const MAX_BASE_TRANSACTIONS: u64 = 20;

/// One extra transaction per month of wallet age
const AGE_BONUS_PERIOD_DAYS: u32 = 30;

/// Account age and activity metadata for a wallet address.
///
/// Derived, read-only, recomputed on every verification attempt - nothing
/// here is cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub first_transaction_date: Option<DateTime<Utc>>,
    pub age_in_days: Option<u32>,
    /// True iff the wallet is older than the configured minimum age
    pub is_old_enough: bool,
    pub transaction_count: u32,
}

impl WalletInfo {
    /// Fallback metadata when the lookup fails or times out
    pub fn unknown() -> Self {
        Self {
            first_transaction_date: None,
            age_in_days: None,
            is_old_enough: false,
            transaction_count: 0,
        }
    }

    /// Metadata for a wallet of known age
    pub fn aged(age_in_days: u32, transaction_count: u32, min_age_days: u32) -> Self {
        Self {
            first_transaction_date: Some(Utc::now() - Duration::days(age_in_days as i64)),
            age_in_days: Some(age_in_days),
            is_old_enough: age_in_days > min_age_days,
            transaction_count,
        }
    }

    /// Established wallets get the attestation trust bonus
    pub fn is_trusted(&self, min_transactions: u32) -> bool {
        self.is_old_enough && self.transaction_count > min_transactions
    }
}

/// External wallet metadata source keyed by address.
///
/// Pluggable: the shipped implementation is a policy-driven simulation, a
/// real deployment would query a block-explorer API.
#[async_trait]
pub trait WalletLookup: Send + Sync {
    async fn wallet_info(&self, address: &str) -> Result<WalletInfo>;
}

/// Policy-driven stand-in for a block-explorer lookup.
///
/// Wallet age is uniform in `[1, 1095]` days; older wallets carry more
/// transactions (base `[1, 20]` plus one per month of age).
pub struct SimulatedExplorer {
    policy: Arc<dyn PolicySource>,
    min_age_days: u32,
}

impl SimulatedExplorer {
    pub fn new(policy: Arc<dyn PolicySource>, min_age_days: u32) -> Self {
        Self {
            policy,
            min_age_days,
        }
    }
}

#[async_trait]
impl WalletLookup for SimulatedExplorer {
    async fn wallet_info(&self, address: &str) -> Result<WalletInfo> {
        let age_in_days =
            (MIN_WALLET_AGE_DAYS + self.policy.pick(MAX_WALLET_AGE_DAYS)) as u32;
        let base_transactions = (1 + self.policy.pick(MAX_BASE_TRANSACTIONS)) as u32;
        let transaction_count = base_transactions + age_in_days / AGE_BONUS_PERIOD_DAYS;

        let info = WalletInfo::aged(age_in_days, transaction_count, self.min_age_days);
        debug!(
            %address,
            age_in_days,
            transaction_count,
            "Resolved wallet metadata"
        );
        Ok(info)
    }
}
