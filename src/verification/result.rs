use crate::attestation::AttestationResult;
use crate::wallet::{WalletInfo, WalletVerification};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a review verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Rejected,
    Unverified,
}

/// Outcome of one verification attempt.
///
/// Created fresh on every call and never mutated after return; the optional
/// fields are populated only on the full verification path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub message: String,
    /// Epoch milliseconds at which the verdict was produced
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_verified: Option<bool>,
    /// Blended confidence (attestation weighted with wallet trust)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_validator_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_quorum_reached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_info: Option<WalletInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_verification: Option<WalletVerification>,
}

impl VerificationResult {
    fn bare(status: VerificationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
            transaction_hash: None,
            block_number: None,
            attestation_verified: None,
            attestation_confidence_score: None,
            attestation_validator_count: None,
            attestation_quorum_reached: None,
            wallet_info: None,
            wallet_verification: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::bare(VerificationStatus::Rejected, message)
    }

    pub fn pending(message: impl Into<String>) -> Self {
        Self::bare(VerificationStatus::Pending, message)
    }

    /// Degraded success: the attestation stage failed but the review is
    /// still treated as verified, with no attestation or wallet payload
    pub fn verified_degraded(
        message: impl Into<String>,
        transaction_hash: String,
        block_number: u64,
    ) -> Self {
        let mut result = Self::bare(VerificationStatus::Verified, message);
        result.transaction_hash = Some(transaction_hash);
        result.block_number = Some(block_number);
        result
    }

    /// Full verification with attestation and wallet trust payloads
    #[allow(clippy::too_many_arguments)]
    pub fn verified(
        message: impl Into<String>,
        transaction_hash: String,
        block_number: u64,
        attestation: &AttestationResult,
        blended_confidence: f64,
        wallet_info: WalletInfo,
        wallet_verification: WalletVerification,
    ) -> Self {
        let mut result = Self::bare(VerificationStatus::Verified, message);
        result.transaction_hash = Some(transaction_hash);
        result.block_number = Some(block_number);
        result.attestation_verified = Some(attestation.is_verified);
        result.attestation_confidence_score = Some(blended_confidence);
        result.attestation_validator_count = Some(attestation.validator_signatures.len());
        result.attestation_quorum_reached = Some(attestation.quorum_reached);
        result.wallet_info = Some(wallet_info);
        result.wallet_verification = Some(wallet_verification);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Verified).unwrap(),
            "\"verified\""
        );
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_bare_results_omit_optional_fields() {
        let result = VerificationResult::rejected("invalid");
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("transaction_hash").is_none());
        assert!(json.get("wallet_info").is_none());
        assert_eq!(json["status"], "rejected");
    }

    #[test]
    fn test_degraded_result_carries_artifacts_only() {
        let result =
            VerificationResult::verified_degraded("degraded", "0xdead".to_string(), 42);

        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(result.transaction_hash.as_deref(), Some("0xdead"));
        assert_eq!(result.block_number, Some(42));
        assert!(result.attestation_verified.is_none());
        assert!(result.wallet_verification.is_none());
    }
}
