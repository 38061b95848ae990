//! Simulated attestation network ("AVS" stand-in)
//!
//! Produces multi-validator endorsements of review authenticity. Outcomes
//! are policy draws shaped by wallet trust, not real validator queries; the
//! seam (`Attestor`) is where a real restaking-network client would plug in.

use crate::config::AttestationConfig;
use crate::policy::PolicySource;
use crate::review::Review;
use crate::wallet::WalletInfo;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Validator signature length in bytes (40 hex characters)
const VALIDATOR_SIG_BYTES: usize = 20;

/// Confidence span below the verified floor for unendorsed reviews
const UNVERIFIED_CONFIDENCE_SPAN: f64 = 0.4;

/// Confidence floor/span for endorsed reviews
const VERIFIED_CONFIDENCE_FLOOR: f64 = 0.5;
const VERIFIED_CONFIDENCE_SPAN: f64 = 0.5;

/// Multi-validator endorsement of a review's authenticity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationResult {
    pub is_verified: bool,
    /// Confidence in `[0, 1]`
    pub confidence_score: f64,
    /// Synthetic validator signatures, present only when verified
    pub validator_signatures: Vec<String>,
    /// True iff the signature count exceeds the quorum threshold
    pub quorum_reached: bool,
}

/// Attestation boundary; failures here degrade the pipeline result instead
/// of propagating to the caller
#[async_trait]
pub trait Attestor: Send + Sync {
    async fn attest(&self, review: &Review, wallet: &WalletInfo) -> Result<AttestationResult>;
}

/// Policy-driven attestation simulator.
///
/// Endorsement probability is the configured base chance plus a bonus for
/// trusted wallets; confidence lands in the verified or unverified band and
/// mature trusted wallets get a capped bonus on top.
pub struct AvsSimulator {
    policy: Arc<dyn PolicySource>,
    config: AttestationConfig,
}

impl AvsSimulator {
    pub fn new(policy: Arc<dyn PolicySource>, config: AttestationConfig) -> Self {
        Self { policy, config }
    }
}

#[async_trait]
impl Attestor for AvsSimulator {
    async fn attest(&self, review: &Review, wallet: &WalletInfo) -> Result<AttestationResult> {
        let trusted = wallet.is_trusted(self.config.trusted_min_transactions);

        let chance = self.config.base_verification_chance
            + if trusted {
                self.config.trusted_wallet_bonus
            } else {
                0.0
            };
        let is_verified = self.policy.unit() < chance;

        let confidence_draw = self.policy.unit();
        let mut confidence_score = if is_verified {
            VERIFIED_CONFIDENCE_FLOOR + confidence_draw * VERIFIED_CONFIDENCE_SPAN
        } else {
            confidence_draw * UNVERIFIED_CONFIDENCE_SPAN
        };

        let mature = wallet
            .age_in_days
            .map(|age| age > self.config.mature_age_days)
            .unwrap_or(false);
        if trusted && mature {
            confidence_score = (confidence_score + self.config.mature_confidence_bonus)
                .min(self.config.max_confidence);
        }

        let validator_signatures = if is_verified {
            let span = (self.config.max_validators - self.config.min_validators + 1) as u64;
            let count = self.config.min_validators as u64 + self.policy.pick(span);
            (0..count)
                .map(|_| format!("0x{}", self.policy.hex_bytes(VALIDATOR_SIG_BYTES)))
                .collect()
        } else {
            Vec::new()
        };

        let quorum_reached = validator_signatures.len() > self.config.quorum_threshold;

        debug!(
            review_id = %review.review_id,
            is_verified,
            confidence = confidence_score,
            validators = validator_signatures.len(),
            quorum_reached,
            "Attested review"
        );

        Ok(AttestationResult {
            is_verified,
            confidence_score,
            validator_signatures,
            quorum_reached,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerifierConfig;
    use crate::policy::{FixedPolicy, SeededPolicy};

    fn simulator(draw: f64) -> AvsSimulator {
        AvsSimulator::new(
            Arc::new(FixedPolicy::new(draw)),
            VerifierConfig::default().attestation,
        )
    }

    fn review() -> Review {
        Review::new(
            "rev_1",
            "biz_1",
            "0xabc",
            5,
            "A reliably great experience every single visit.",
            1_700_000_000_000,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_verified_attestation_with_low_draw() {
        // draw 0.2 < 0.8 base chance
        let result = simulator(0.2)
            .attest(&review(), &WalletInfo::aged(60, 2, 30))
            .await
            .unwrap();

        assert!(result.is_verified);
        // 0.5 + 0.2 * 0.5
        assert!((result.confidence_score - 0.6).abs() < 1e-9);
        // count = 3 + pick(5) = 3 + 1 = 4 validators -> quorum
        assert_eq!(result.validator_signatures.len(), 4);
        assert!(result.quorum_reached);
        for sig in &result.validator_signatures {
            assert!(sig.starts_with("0x"));
            assert_eq!(sig.len(), 42);
        }
    }

    #[tokio::test]
    async fn test_unverified_attestation_with_high_draw() {
        // draw 0.9 >= 0.8 and the wallet is not trusted
        let result = simulator(0.9)
            .attest(&review(), &WalletInfo::aged(10, 1, 30))
            .await
            .unwrap();

        assert!(!result.is_verified);
        // 0.9 * 0.4
        assert!((result.confidence_score - 0.36).abs() < 1e-9);
        assert!(result.validator_signatures.is_empty());
        assert!(!result.quorum_reached);
    }

    #[tokio::test]
    async fn test_trusted_wallet_raises_chance() {
        // draw 0.9 fails the 0.8 base chance but passes 0.95 with the bonus
        let result = simulator(0.9)
            .attest(&review(), &WalletInfo::aged(60, 10, 30))
            .await
            .unwrap();

        assert!(result.is_verified);
    }

    #[tokio::test]
    async fn test_mature_wallet_bonus() {
        // Verified at draw 0.2 -> 0.6, then +0.2 mature bonus
        let result = simulator(0.2)
            .attest(&review(), &WalletInfo::aged(200, 10, 30))
            .await
            .unwrap();

        assert!((result.confidence_score - 0.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_mature_bonus_is_capped() {
        // 0.5 + 0.7 * 0.5 = 0.85, +0.2 would exceed the 0.99 ceiling
        let result = simulator(0.7)
            .attest(&review(), &WalletInfo::aged(200, 10, 30))
            .await
            .unwrap();

        assert!(result.is_verified);
        assert!((result.confidence_score - 0.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_young_wallet_gets_no_mature_bonus() {
        let result = simulator(0.2)
            .attest(&review(), &WalletInfo::aged(60, 10, 30))
            .await
            .unwrap();

        assert!((result.confidence_score - 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_validator_count_range() {
        let simulator = AvsSimulator::new(
            Arc::new(SeededPolicy::new(3)),
            VerifierConfig::default().attestation,
        );

        for _ in 0..64 {
            let result = simulator
                .attest(&review(), &WalletInfo::aged(60, 2, 30))
                .await
                .unwrap();

            if result.is_verified {
                let count = result.validator_signatures.len();
                assert!((3..=7).contains(&count));
                assert_eq!(result.quorum_reached, count > 3);
            } else {
                assert!(result.validator_signatures.is_empty());
            }
            assert!((0.0..=1.0).contains(&result.confidence_score));
        }
    }
}
