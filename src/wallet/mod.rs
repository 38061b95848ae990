//! Wallet metadata and trust validation
//!
//! Account age and activity are the trust signals behind review
//! verification: an established wallet raises attestation confidence, an
//! unknown one falls back to a neutral score.
//!
//! - `provider` - the pluggable metadata lookup boundary (simulated
//!   explorer vs. real block-explorer API)
//! - `trust` - the tiered trust verdict over looked-up metadata

pub mod provider;
pub mod trust;

pub use provider::{SimulatedExplorer, WalletInfo, WalletLookup};
pub use trust::{TrustValidator, WalletVerification};
