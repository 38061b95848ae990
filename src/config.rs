use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Configuration for the review verification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Content rules applied to reviews
    pub review: ReviewRulesConfig,
    /// Wallet lookup and trust validation
    pub wallet: WalletTrustConfig,
    /// Attestation network simulation
    pub attestation: AttestationConfig,
    /// Confidence score blending
    pub scoring: ScoringConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRulesConfig {
    /// Reviews shorter than this are rejected for insufficient content
    pub min_review_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTrustConfig {
    /// Wallets older than this many days count as established
    pub min_age_days: u32,
    /// Deadline for the wallet metadata lookup; a timeout degrades to an
    /// unknown wallet rather than failing the pipeline
    pub lookup_timeout_secs: u64,
    /// Fraction of validations reported as a records mismatch
    pub mismatch_rate: f64,
    /// Fraction of validations reported as unusual activity
    pub suspicious_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationConfig {
    /// Base probability that the validator set endorses a review
    pub base_verification_chance: f64,
    /// Additional chance granted to trusted wallets
    pub trusted_wallet_bonus: f64,
    /// Minimum transaction count for a wallet to count as trusted
    pub trusted_min_transactions: u32,
    /// Wallet age (days) above which the confidence bonus applies
    pub mature_age_days: u32,
    /// Confidence bonus for mature trusted wallets
    pub mature_confidence_bonus: f64,
    /// Ceiling applied after the mature-wallet bonus
    pub max_confidence: f64,
    /// Validator signature count range (inclusive)
    pub min_validators: u32,
    pub max_validators: u32,
    /// Signature count that must be exceeded to reach quorum
    pub quorum_threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the attestation confidence in the blended score
    pub attestation_weight: f64,
    /// Weight of the wallet trust confidence in the blended score
    pub wallet_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    pub level: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            review: ReviewRulesConfig {
                min_review_chars: 20,
            },
            wallet: WalletTrustConfig {
                min_age_days: 30,
                lookup_timeout_secs: 5,
                mismatch_rate: 0.10,
                suspicious_rate: 0.10,
            },
            attestation: AttestationConfig {
                base_verification_chance: 0.8,
                trusted_wallet_bonus: 0.15,
                trusted_min_transactions: 5,
                mature_age_days: 180,
                mature_confidence_bonus: 0.2,
                max_confidence: 0.99,
                min_validators: 3,
                max_validators: 7,
                quorum_threshold: 3,
            },
            scoring: ScoringConfig {
                attestation_weight: 0.7,
                wallet_weight: 0.3,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl VerifierConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults, then validate
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(chars) = env::var("ALETHEUM_MIN_REVIEW_CHARS") {
            config.review.min_review_chars = chars
                .parse()
                .context("Invalid ALETHEUM_MIN_REVIEW_CHARS value")?;
        }

        if let Ok(days) = env::var("ALETHEUM_WALLET_MIN_AGE_DAYS") {
            config.wallet.min_age_days = days
                .parse()
                .context("Invalid ALETHEUM_WALLET_MIN_AGE_DAYS value")?;
        }

        if let Ok(secs) = env::var("ALETHEUM_WALLET_LOOKUP_TIMEOUT_SECS") {
            config.wallet.lookup_timeout_secs = secs
                .parse()
                .context("Invalid ALETHEUM_WALLET_LOOKUP_TIMEOUT_SECS value")?;
        }

        if let Ok(rate) = env::var("ALETHEUM_WALLET_MISMATCH_RATE") {
            config.wallet.mismatch_rate = rate
                .parse()
                .context("Invalid ALETHEUM_WALLET_MISMATCH_RATE value")?;
        }

        if let Ok(rate) = env::var("ALETHEUM_WALLET_SUSPICIOUS_RATE") {
            config.wallet.suspicious_rate = rate
                .parse()
                .context("Invalid ALETHEUM_WALLET_SUSPICIOUS_RATE value")?;
        }

        if let Ok(chance) = env::var("ALETHEUM_ATTESTATION_BASE_CHANCE") {
            config.attestation.base_verification_chance = chance
                .parse()
                .context("Invalid ALETHEUM_ATTESTATION_BASE_CHANCE value")?;
        }

        if let Ok(bonus) = env::var("ALETHEUM_ATTESTATION_TRUSTED_BONUS") {
            config.attestation.trusted_wallet_bonus = bonus
                .parse()
                .context("Invalid ALETHEUM_ATTESTATION_TRUSTED_BONUS value")?;
        }

        if let Ok(weight) = env::var("ALETHEUM_SCORE_ATTESTATION_WEIGHT") {
            config.scoring.attestation_weight = weight
                .parse()
                .context("Invalid ALETHEUM_SCORE_ATTESTATION_WEIGHT value")?;
        }

        if let Ok(weight) = env::var("ALETHEUM_SCORE_WALLET_WEIGHT") {
            config.scoring.wallet_weight = weight
                .parse()
                .context("Invalid ALETHEUM_SCORE_WALLET_WEIGHT value")?;
        }

        if let Ok(level) = env::var("ALETHEUM_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        info!(
            min_review_chars = config.review.min_review_chars,
            lookup_timeout_secs = config.wallet.lookup_timeout_secs,
            "Loaded verifier configuration"
        );

        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.wallet.lookup_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Wallet lookup timeout must be non-zero"));
        }

        for (name, value) in [
            ("mismatch_rate", self.wallet.mismatch_rate),
            ("suspicious_rate", self.wallet.suspicious_rate),
            (
                "base_verification_chance",
                self.attestation.base_verification_chance,
            ),
            ("trusted_wallet_bonus", self.attestation.trusted_wallet_bonus),
            (
                "mature_confidence_bonus",
                self.attestation.mature_confidence_bonus,
            ),
            ("max_confidence", self.attestation.max_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow::anyhow!(
                    "{} must be within [0, 1], got {}",
                    name,
                    value
                ));
            }
        }

        if self.wallet.mismatch_rate + self.wallet.suspicious_rate > 1.0 {
            return Err(anyhow::anyhow!(
                "mismatch_rate + suspicious_rate must not exceed 1.0"
            ));
        }

        if self.attestation.min_validators > self.attestation.max_validators {
            return Err(anyhow::anyhow!(
                "min_validators {} exceeds max_validators {}",
                self.attestation.min_validators,
                self.attestation.max_validators
            ));
        }

        let weight_sum = self.scoring.attestation_weight + self.scoring.wallet_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(anyhow::anyhow!(
                "scoring weights must sum to 1.0, got {}",
                weight_sum
            ));
        }

        Ok(())
    }
}
