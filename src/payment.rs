//! Token payment service
//!
//! Balance lookups and payments in the platform token. Transactions are
//! simulated through the policy source and artifact generator; the hash in
//! a receipt is synthetic, not fetched from a chain.

use crate::policy::PolicySource;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Injected transaction failure rate
const PAYMENT_FAILURE_RATE: f64 = 0.1;

/// Simulated balance range
const MIN_BALANCE: u64 = 50;
const BALANCE_SPAN: u64 = 1950;

/// Payment transaction hash length in bytes (64 hex characters)
const PAYMENT_TX_HASH_BYTES: usize = 32;

/// Payment submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub from_address: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

/// Receipt for a completed payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub tx_hash: String,
}

/// Token balance lookups and payment submission
pub struct PaymentService {
    policy: Arc<dyn PolicySource>,
}

impl PaymentService {
    pub fn new(policy: Arc<dyn PolicySource>) -> Self {
        Self { policy }
    }

    /// Current token balance for an address, in whole tokens
    pub async fn token_balance(&self, address: &str, token: &str) -> u64 {
        let balance = MIN_BALANCE + self.policy.pick(BALANCE_SPAN);
        info!(%address, %token, balance, "Resolved token balance");
        balance
    }

    /// Submit a payment, returning the transaction receipt
    pub async fn make_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        if request.amount <= 0.0 {
            return Err(anyhow!("Payment amount must be positive"));
        }

        if self.policy.unit() < PAYMENT_FAILURE_RATE {
            return Err(anyhow!("The transaction failed. Please try again."));
        }

        let tx_hash = format!("0x{}", self.policy.hex_bytes(PAYMENT_TX_HASH_BYTES));
        info!(
            from = %request.from_address,
            amount = request.amount,
            currency = %request.currency,
            %tx_hash,
            "Payment completed"
        );

        Ok(PaymentReceipt { tx_hash })
    }
}
