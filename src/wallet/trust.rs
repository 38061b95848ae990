use crate::config::WalletTrustConfig;
use crate::policy::PolicySource;
use crate::wallet::provider::WalletInfo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Age at which the trust score stops growing
const TRUST_AGE_CAP_DAYS: u32 = 365;

/// Trust score floor/span for established wallets
const ESTABLISHED_BASE_SCORE: f64 = 0.7;
const ESTABLISHED_AGE_SPAN: f64 = 0.3;

/// Neutral score for young wallets
const YOUNG_WALLET_SCORE: f64 = 0.5;

/// Scores for the injected failure tiers
const MISMATCH_SCORE: f64 = 0.2;
const SUSPICIOUS_SCORE: f64 = 0.4;

/// Trust verdict for a wallet, produced once per verification attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletVerification {
    pub is_valid: bool,
    /// Confidence in `[0, 1]`
    pub confidence_score: f64,
    pub message: String,
}

/// Tiered trust policy over wallet metadata.
///
/// Two failure-injection tiers (records mismatch, unusual activity) fire at
/// configured rates through the policy source; every other validation gets
/// a deterministic age-based score.
pub struct TrustValidator {
    policy: Arc<dyn PolicySource>,
    config: WalletTrustConfig,
}

impl TrustValidator {
    pub fn new(policy: Arc<dyn PolicySource>, config: WalletTrustConfig) -> Self {
        Self { policy, config }
    }

    /// Validate wallet metadata into a trust verdict. Side-effect-free.
    pub async fn validate(&self, address: &str, info: &WalletInfo) -> WalletVerification {
        let draw = self.policy.unit();

        if draw < self.config.mismatch_rate {
            warn!(%address, "Wallet metadata does not match attestation records");
            return WalletVerification {
                is_valid: false,
                confidence_score: MISMATCH_SCORE,
                message: "Wallet information does not match attestation records.".to_string(),
            };
        }

        if draw < self.config.mismatch_rate + self.config.suspicious_rate {
            warn!(%address, "Wallet shows unusual activity patterns");
            return WalletVerification {
                is_valid: true,
                confidence_score: SUSPICIOUS_SCORE,
                message: "Wallet shows unusual activity patterns. Verified with reduced confidence."
                    .to_string(),
            };
        }

        let verification = if info.is_old_enough {
            let age = info.age_in_days.unwrap_or(0).min(TRUST_AGE_CAP_DAYS);
            let confidence_score = ESTABLISHED_BASE_SCORE
                + (age as f64 / TRUST_AGE_CAP_DAYS as f64) * ESTABLISHED_AGE_SPAN;
            WalletVerification {
                is_valid: true,
                confidence_score,
                message: format!(
                    "Wallet verified with {} days of history.",
                    info.age_in_days.unwrap_or(0)
                ),
            }
        } else {
            WalletVerification {
                is_valid: true,
                confidence_score: YOUNG_WALLET_SCORE,
                message: "Wallet verified, but it is relatively new.".to_string(),
            }
        };

        debug!(
            %address,
            confidence = verification.confidence_score,
            "Validated wallet trust"
        );
        verification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerifierConfig;
    use crate::policy::FixedPolicy;

    fn validator(draw: f64) -> TrustValidator {
        TrustValidator::new(
            Arc::new(FixedPolicy::new(draw)),
            VerifierConfig::default().wallet,
        )
    }

    #[tokio::test]
    async fn test_mismatch_tier() {
        let verdict = validator(0.05)
            .validate("0xabc", &WalletInfo::aged(200, 10, 30))
            .await;

        assert!(!verdict.is_valid);
        assert_eq!(verdict.confidence_score, 0.2);
        assert!(verdict.message.contains("does not match"));
    }

    #[tokio::test]
    async fn test_suspicious_tier() {
        let verdict = validator(0.15)
            .validate("0xabc", &WalletInfo::aged(200, 10, 30))
            .await;

        assert!(verdict.is_valid);
        assert_eq!(verdict.confidence_score, 0.4);
        assert!(verdict.message.contains("unusual activity"));
    }

    #[tokio::test]
    async fn test_established_wallet_score() {
        let verdict = validator(0.5)
            .validate("0xabc", &WalletInfo::aged(365, 10, 30))
            .await;

        assert!(verdict.is_valid);
        assert!((verdict.confidence_score - 1.0).abs() < 1e-9);
        assert!(verdict.message.contains("365 days"));
    }

    #[tokio::test]
    async fn test_age_is_capped_at_one_year() {
        let old = validator(0.5)
            .validate("0xabc", &WalletInfo::aged(1000, 10, 30))
            .await;
        let one_year = validator(0.5)
            .validate("0xabc", &WalletInfo::aged(365, 10, 30))
            .await;

        assert_eq!(old.confidence_score, one_year.confidence_score);
    }

    #[tokio::test]
    async fn test_young_wallet_gets_neutral_score() {
        let verdict = validator(0.5)
            .validate("0xabc", &WalletInfo::aged(10, 3, 30))
            .await;

        assert!(verdict.is_valid);
        assert_eq!(verdict.confidence_score, 0.5);
        assert!(verdict.message.contains("relatively new"));
    }

    #[tokio::test]
    async fn test_unknown_wallet_gets_neutral_score() {
        let verdict = validator(0.9)
            .validate("0xabc", &WalletInfo::unknown())
            .await;

        assert!(verdict.is_valid);
        assert_eq!(verdict.confidence_score, 0.5);
    }

    #[tokio::test]
    async fn test_scores_stay_in_unit_interval() {
        for draw in [0.0, 0.05, 0.15, 0.25, 0.5, 0.99] {
            for age in [0u32, 15, 31, 180, 365, 2000] {
                let verdict = validator(draw)
                    .validate("0xabc", &WalletInfo::aged(age, 10, 30))
                    .await;
                assert!((0.0..=1.0).contains(&verdict.confidence_score));
            }
        }
    }
}
