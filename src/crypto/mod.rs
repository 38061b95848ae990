//! Cryptographic utilities for review authentication
//!
//! Provides:
//! - The signing capability boundary (`ReviewSigner`) supplied by the
//!   hosting environment; the verifier never manages reviewer keys itself
//! - An Ed25519 `LocalWallet` for tests and embedded deployments
//! - `SignatureService`: canonical-message signing and signer recovery

pub mod signing;

pub use signing::{derive_address, recover_address, LocalWallet, ReviewSigner, SignatureService};
