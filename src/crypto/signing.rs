use crate::error::VerifyError;
use crate::review::{Review, SignedReview};
use anyhow::Result;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

/// Signature wire format: hex(verifying_key || signature), `0x`-prefixed.
/// Embedding the key lets the signer address be recovered from the
/// signature alone.
const PUBLIC_KEY_BYTES: usize = 32;
const SIGNATURE_BYTES: usize = 64;

/// Address length in bytes (40 hex characters after the `0x` prefix)
const ADDRESS_BYTES: usize = 20;

/// External signing capability supplied by the hosting environment
/// (a browser wallet extension or equivalent)
pub trait ReviewSigner: Send + Sync {
    /// Address the capability signs as
    fn address(&self) -> String;

    /// Detached signature over an arbitrary message
    fn sign_message(&self, message: &str) -> Result<String>;
}

/// Derive the wallet address for a verifying key:
/// `0x` + hex of the trailing 20 bytes of SHA-256(key)
pub fn derive_address(key: &VerifyingKey) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("0x{}", hex::encode(&digest[digest.len() - ADDRESS_BYTES..]))
}

/// Recover the signer address from a signature over `message`.
///
/// Returns `None` for malformed signatures or when the signature does not
/// validate against the embedded key.
pub fn recover_address(message: &str, signature: &str) -> Option<String> {
    let raw = hex::decode(signature.strip_prefix("0x").unwrap_or(signature)).ok()?;
    if raw.len() != PUBLIC_KEY_BYTES + SIGNATURE_BYTES {
        return None;
    }

    let key_bytes: [u8; PUBLIC_KEY_BYTES] = raw[..PUBLIC_KEY_BYTES].try_into().ok()?;
    let sig_bytes: [u8; SIGNATURE_BYTES] = raw[PUBLIC_KEY_BYTES..].try_into().ok()?;

    let key = VerifyingKey::from_bytes(&key_bytes).ok()?;
    let sig = Signature::from_bytes(&sig_bytes);

    key.verify(message.as_bytes(), &sig).ok()?;
    Some(derive_address(&key))
}

/// In-process Ed25519 wallet implementing the signing capability
#[derive(Debug, Clone)]
pub struct LocalWallet {
    signing_key: SigningKey,
}

impl LocalWallet {
    /// Generate a wallet from OS entropy
    pub fn generate() -> Self {
        let mut secret_bytes = [0u8; 32];
        OsRng.fill_bytes(&mut secret_bytes);
        Self {
            signing_key: SigningKey::from_bytes(&secret_bytes),
        }
    }

    /// Deterministic wallet for reproducible tests
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }
}

impl ReviewSigner for LocalWallet {
    fn address(&self) -> String {
        derive_address(&self.signing_key.verifying_key())
    }

    fn sign_message(&self, message: &str) -> Result<String> {
        let sig = self.signing_key.sign(message.as_bytes());

        let mut raw = Vec::with_capacity(PUBLIC_KEY_BYTES + SIGNATURE_BYTES);
        raw.extend_from_slice(self.signing_key.verifying_key().as_bytes());
        raw.extend_from_slice(&sig.to_bytes());
        Ok(format!("0x{}", hex::encode(raw)))
    }
}

/// Signs reviews with the injected capability and validates signatures
/// against the claimed reviewer address
pub struct SignatureService {
    signer: Option<Arc<dyn ReviewSigner>>,
}

impl SignatureService {
    pub fn new(signer: Arc<dyn ReviewSigner>) -> Self {
        Self {
            signer: Some(signer),
        }
    }

    /// Service with no signing capability; `sign` fails, `verify` still works
    pub fn without_signer() -> Self {
        Self { signer: None }
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    /// Sign a review's canonical message.
    ///
    /// Fails with `SigningUnavailable` when no capability is present and
    /// `AddressMismatch` when the capability signs for a different address
    /// than the review claims.
    pub fn sign(&self, review: &Review) -> Result<String, VerifyError> {
        let signer = self.signer.as_ref().ok_or(VerifyError::SigningUnavailable)?;

        let signer_address = signer.address();
        if !signer_address.eq_ignore_ascii_case(&review.reviewer_address) {
            warn!(
                signer = %signer_address,
                reviewer = %review.reviewer_address,
                "Refusing to sign review for a different address"
            );
            return Err(VerifyError::AddressMismatch {
                signer: signer_address,
                reviewer: review.reviewer_address.clone(),
            });
        }

        let message = review.canonical_message();
        let signature = signer
            .sign_message(&message)
            .map_err(|_| VerifyError::SigningUnavailable)?;

        debug!(review_id = %review.review_id, "Signed review");
        Ok(signature)
    }

    /// Check that the signature recovers to the claimed reviewer address.
    ///
    /// Pure function: no side effects, malformed signatures return `false`.
    pub fn verify(signed: &SignedReview) -> bool {
        match recover_address(&signed.review.canonical_message(), &signed.signature) {
            Some(address) => address.eq_ignore_ascii_case(&signed.review.reviewer_address),
            None => false,
        }
    }
}
