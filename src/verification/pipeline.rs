use crate::attestation::{Attestor, AvsSimulator};
use crate::config::VerifierConfig;
use crate::crypto::{ReviewSigner, SignatureService};
use crate::error::VerifyError;
use crate::policy::{ArtifactGenerator, OsPolicy, PolicyArtifacts, PolicySource};
use crate::review::{Review, SignedReview};
use crate::verification::result::VerificationResult;
use crate::wallet::{SimulatedExplorer, TrustValidator, WalletInfo, WalletLookup};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Mid ratings are held for additional confirmations before a verdict
const HELD_FOR_CONFIRMATION_RATING: u8 = 3;

/// Orchestrates signature validation, content rules, wallet trust, and
/// attestation into a final [`VerificationResult`].
///
/// Each verification call is an independent, bounded computation over value
/// objects; no state is shared between concurrent invocations.
pub struct ReviewVerificationPipeline {
    signatures: SignatureService,
    lookup: Arc<dyn WalletLookup>,
    trust: TrustValidator,
    attestor: Arc<dyn Attestor>,
    artifacts: Arc<dyn ArtifactGenerator>,
    config: VerifierConfig,
}

impl ReviewVerificationPipeline {
    /// Pipeline with simulated collaborators on OS entropy
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_policy(config, Arc::new(OsPolicy))
    }

    /// Pipeline with simulated collaborators drawing from `policy`
    pub fn with_policy(config: VerifierConfig, policy: Arc<dyn PolicySource>) -> Self {
        let lookup = Arc::new(SimulatedExplorer::new(
            policy.clone(),
            config.wallet.min_age_days,
        ));
        let trust = TrustValidator::new(policy.clone(), config.wallet.clone());
        let attestor = Arc::new(AvsSimulator::new(
            policy.clone(),
            config.attestation.clone(),
        ));
        let artifacts = Arc::new(PolicyArtifacts::new(policy));

        Self {
            signatures: SignatureService::without_signer(),
            lookup,
            trust,
            attestor,
            artifacts,
            config,
        }
    }

    /// Inject the signing capability (browser wallet or equivalent)
    pub fn with_signer(mut self, signer: Arc<dyn ReviewSigner>) -> Self {
        self.signatures = SignatureService::new(signer);
        self
    }

    /// Replace the wallet metadata source
    pub fn with_lookup(mut self, lookup: Arc<dyn WalletLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Replace the attestation backend
    pub fn with_attestor(mut self, attestor: Arc<dyn Attestor>) -> Self {
        self.attestor = attestor;
        self
    }

    /// Replace the synthetic chain artifact generator
    pub fn with_artifacts(mut self, artifacts: Arc<dyn ArtifactGenerator>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Sign a review with the injected capability.
    ///
    /// The only failures that cross this boundary are
    /// [`VerifyError::SigningUnavailable`] and [`VerifyError::AddressMismatch`].
    pub async fn sign_review(&self, review: &Review) -> Result<String, VerifyError> {
        self.signatures.sign(review)
    }

    /// Verify a signed review. Rules are evaluated in order, first match
    /// wins; sub-verifier failures degrade the result instead of surfacing.
    pub async fn verify_on_chain(&self, signed: &SignedReview) -> VerificationResult {
        let review = &signed.review;

        // Invalid signatures short-circuit: no wallet or attestation calls
        if !SignatureService::verify(signed) {
            warn!(review_id = %review.review_id, "Rejected review with invalid signature");
            return VerificationResult::rejected("The digital signature is not valid.");
        }

        if review.rating == HELD_FOR_CONFIRMATION_RATING {
            debug!(review_id = %review.review_id, "Review held pending confirmations");
            return VerificationResult::pending(
                "Verification in progress. Awaiting confirmations.",
            );
        }

        if review.review_text.chars().count() < self.config.review.min_review_chars {
            debug!(review_id = %review.review_id, "Rejected review for insufficient content");
            return VerificationResult::rejected(
                "The review does not meet the minimum content requirements.",
            );
        }

        let wallet = self.wallet_info_bounded(&review.reviewer_address).await;

        // Trust validation and attestation are pure over the same wallet
        // snapshot, so they run concurrently
        let (wallet_verification, attested) = tokio::join!(
            self.trust.validate(&review.reviewer_address, &wallet),
            self.attestor.attest(review, &wallet),
        );

        let attestation = match attested {
            Ok(attestation) => attestation,
            Err(err) => {
                let err = VerifyError::AttestationUnavailable(err.to_string());
                warn!(review_id = %review.review_id, error = %err, "Degrading to reduced verification");
                return VerificationResult::verified_degraded(
                    "Verified on blockchain. The attestation network is currently unavailable.",
                    self.artifacts.transaction_hash(),
                    self.artifacts.block_number(),
                );
            }
        };

        let blended = (attestation.confidence_score * self.config.scoring.attestation_weight
            + wallet_verification.confidence_score * self.config.scoring.wallet_weight)
            .clamp(0.0, 1.0);

        let mut message =
            String::from("Verified on blockchain and validated by the attestation network.");
        if wallet.is_old_enough {
            message.push_str(&format!(
                " Wallet verified with {} days of history.",
                wallet.age_in_days.unwrap_or(0)
            ));
        } else {
            message.push_str(" Wallet verified, but it is relatively new.");
        }

        info!(
            review_id = %review.review_id,
            confidence = blended,
            quorum_reached = attestation.quorum_reached,
            "Review verified"
        );

        VerificationResult::verified(
            message,
            self.artifacts.transaction_hash(),
            self.artifacts.block_number(),
            &attestation,
            blended,
            wallet,
            wallet_verification,
        )
    }

    /// Whether a user has previously interacted with a business.
    ///
    /// Placeholder heuristic: addresses whose final hex digit is even count
    /// as having interacted; a non-hex final character counts as no.
    pub async fn verify_user_interaction(&self, address: &str, business_id: &str) -> bool {
        let interacted = address
            .chars()
            .last()
            .and_then(|c| c.to_digit(16))
            .map(|digit| digit % 2 == 0)
            .unwrap_or(false);

        debug!(%address, %business_id, interacted, "Checked user interaction");
        interacted
    }

    /// Bounded wallet lookup; errors and timeouts degrade to an unknown
    /// wallet, never to pipeline failure
    async fn wallet_info_bounded(&self, address: &str) -> WalletInfo {
        let deadline = Duration::from_secs(self.config.wallet.lookup_timeout_secs);

        match tokio::time::timeout(deadline, self.lookup.wallet_info(address)).await {
            Ok(Ok(info)) => info,
            Ok(Err(err)) => {
                let err = VerifyError::LookupFailure(err.to_string());
                warn!(%address, error = %err, "Falling back to unknown wallet");
                WalletInfo::unknown()
            }
            Err(_) => {
                warn!(%address, timeout_secs = deadline.as_secs(), "Wallet lookup timed out");
                WalletInfo::unknown()
            }
        }
    }
}
