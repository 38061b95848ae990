use thiserror::Error;

/// Failure taxonomy for the verification pipeline.
///
/// Only `SigningUnavailable` and `AddressMismatch` ever reach the consumer
/// boundary. `LookupFailure` and `AttestationUnavailable` are recovered
/// inside the pipeline: a failed wallet lookup degrades to an unknown
/// wallet, a failed attestation degrades to a reduced verification result.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("no signing capability is available")]
    SigningUnavailable,

    #[error("signer address {signer} does not match reviewer address {reviewer}")]
    AddressMismatch { signer: String, reviewer: String },

    #[error("wallet metadata lookup failed: {0}")]
    LookupFailure(String),

    #[error("attestation service unavailable: {0}")]
    AttestationUnavailable(String),
}
