//! Aletheum Verifier
//!
//! Review authenticity verification for a business-review platform:
//! reviewers sign their reviews with a wallet capability, and a pipeline of
//! policy stages (signature validation, content rules, wallet trust,
//! attestation) produces a confidence-scored verification verdict.
//!
//! The attestation network and wallet metadata source are simulated behind
//! injectable seams; a real deployment would plug a restaking-network
//! client and a block-explorer API into the same traits.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          - Crate root with re-exports
//! ├── config.rs       - Configuration management
//! ├── error.rs        - Verification failure taxonomy
//! ├── review.rs       - Review model & canonical signing message
//! ├── policy.rs       - Injectable randomness & synthetic chain artifacts
//! ├── crypto/         - Signing capability boundary
//! │   └── signing.rs  - Ed25519 signing, address derivation & recovery
//! ├── wallet/         - Wallet trust signals
//! │   ├── provider.rs - Metadata lookup boundary (simulated explorer)
//! │   └── trust.rs    - Tiered trust validation
//! ├── attestation.rs  - Simulated multi-validator attestation network
//! ├── verification/   - The verification pipeline
//! │   ├── pipeline.rs - Orchestration & state machine
//! │   └── result.rs   - Verification verdicts
//! ├── business.rs     - Business registry
//! └── payment.rs      - Token payments
//! ```

pub mod attestation;
pub mod business;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payment;
pub mod policy;
pub mod review;
pub mod verification;
pub mod wallet;

// Re-export main types for convenience
pub use attestation::{AttestationResult, Attestor, AvsSimulator};
pub use business::{BusinessProfile, BusinessRegistration, BusinessRegistry};
pub use config::VerifierConfig;
pub use crypto::{LocalWallet, ReviewSigner, SignatureService};
pub use error::VerifyError;
pub use payment::{PaymentReceipt, PaymentRequest, PaymentService};
pub use policy::{
    ArtifactGenerator, FixedArtifacts, FixedPolicy, OsPolicy, PolicyArtifacts, PolicySource,
    SeededPolicy,
};
pub use review::{Review, SignedReview};
pub use verification::{ReviewVerificationPipeline, VerificationResult, VerificationStatus};
pub use wallet::{SimulatedExplorer, TrustValidator, WalletInfo, WalletLookup, WalletVerification};
