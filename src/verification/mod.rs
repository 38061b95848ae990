//! Review verification pipeline
//!
//! Orchestrates signature validation, deterministic content rules, wallet
//! trust, and attestation into a final verification verdict:
//!
//! ```text
//!                    ┌─────────────────────┐
//!   SignedReview ───►│ signature check     │── invalid ──► Rejected
//!                    ├─────────────────────┤
//!                    │ content rules       │── rating 3 ─► Pending
//!                    │                     │── too short ► Rejected
//!                    ├─────────────────────┤
//!                    │ wallet lookup       │ (bounded, degrades to unknown)
//!                    ├──────────┬──────────┤
//!                    │ trust    │ attest   │ (concurrent, pure over the
//!                    ├──────────┴──────────┤  same wallet snapshot)
//!                    │ blend scores        │──► Verified
//!                    └─────────────────────┘
//! ```

pub mod pipeline;
pub mod result;

pub use pipeline::ReviewVerificationPipeline;
pub use result::{VerificationResult, VerificationStatus};
