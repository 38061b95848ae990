//! Injectable randomness and synthetic chain artifacts
//!
//! Every probabilistic decision in the verifier (trust tiers, attestation
//! outcomes, synthetic transaction hashes) flows through a [`PolicySource`]
//! so deployments can run on OS entropy while tests pin exact outcomes.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Arc, Mutex};

/// Source of policy draws for probabilistic verification outcomes
pub trait PolicySource: Send + Sync {
    /// Uniform draw in `[0, 1)`
    fn unit(&self) -> f64;

    /// Uniform integer in `[0, bound)`; `bound` must be non-zero
    fn pick(&self, bound: u64) -> u64;

    /// `n` random bytes, hex encoded
    fn hex_bytes(&self, n: usize) -> String;
}

/// Production policy source backed by OS entropy
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPolicy;

impl PolicySource for OsPolicy {
    fn unit(&self) -> f64 {
        OsRng.gen::<f64>()
    }

    fn pick(&self, bound: u64) -> u64 {
        OsRng.gen_range(0..bound)
    }

    fn hex_bytes(&self, n: usize) -> String {
        let mut bytes = vec![0u8; n];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic policy source for reproducible runs and tests
pub struct SeededPolicy {
    rng: Mutex<StdRng>,
}

impl SeededPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PolicySource for SeededPolicy {
    fn unit(&self) -> f64 {
        self.rng.lock().expect("policy rng poisoned").gen::<f64>()
    }

    fn pick(&self, bound: u64) -> u64 {
        self.rng
            .lock()
            .expect("policy rng poisoned")
            .gen_range(0..bound)
    }

    fn hex_bytes(&self, n: usize) -> String {
        let mut bytes = vec![0u8; n];
        self.rng
            .lock()
            .expect("policy rng poisoned")
            .fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Policy source that returns the same draw every time.
///
/// Lets tests assert exact scores: `unit()` is the configured value, `pick`
/// scales it into the requested range, and `hex_bytes` repeats one byte.
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy {
    value: f64,
}

impl FixedPolicy {
    /// `value` must be in `[0, 1)`
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 0.999_999),
        }
    }
}

impl PolicySource for FixedPolicy {
    fn unit(&self) -> f64 {
        self.value
    }

    fn pick(&self, bound: u64) -> u64 {
        ((self.value * bound as f64) as u64).min(bound.saturating_sub(1))
    }

    fn hex_bytes(&self, n: usize) -> String {
        let byte = (self.value * 255.0) as u8;
        hex::encode(vec![byte; n])
    }
}

/// Generator for synthetic on-chain artifacts attached to verified reviews.
///
/// The transaction hash and block number are placeholders, not fetched from
/// any chain. Injected so tests can assert on fixed values.
pub trait ArtifactGenerator: Send + Sync {
    /// `0x`-prefixed synthetic transaction hash
    fn transaction_hash(&self) -> String;

    /// Synthetic block number in `[0, 1_000_000)`
    fn block_number(&self) -> u64;
}

/// Transaction hash length in bytes (40 hex characters)
const TX_HASH_BYTES: usize = 20;

/// Upper bound for synthetic block numbers
const MAX_BLOCK_NUMBER: u64 = 1_000_000;

/// Artifact generator drawing from a policy source
pub struct PolicyArtifacts {
    policy: Arc<dyn PolicySource>,
}

impl PolicyArtifacts {
    pub fn new(policy: Arc<dyn PolicySource>) -> Self {
        Self { policy }
    }
}

impl ArtifactGenerator for PolicyArtifacts {
    fn transaction_hash(&self) -> String {
        format!("0x{}", self.policy.hex_bytes(TX_HASH_BYTES))
    }

    fn block_number(&self) -> u64 {
        self.policy.pick(MAX_BLOCK_NUMBER)
    }
}

/// Fixed artifacts for exact-value assertions in tests
#[derive(Debug, Clone)]
pub struct FixedArtifacts {
    pub hash: String,
    pub block: u64,
}

impl ArtifactGenerator for FixedArtifacts {
    fn transaction_hash(&self) -> String {
        self.hash.clone()
    }

    fn block_number(&self) -> u64 {
        self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_policy_is_deterministic() {
        let a = SeededPolicy::new(7);
        let b = SeededPolicy::new(7);

        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
        assert_eq!(a.pick(1000), b.pick(1000));
        assert_eq!(a.hex_bytes(20), b.hex_bytes(20));
    }

    #[test]
    fn test_seeded_policy_unit_in_range() {
        let policy = SeededPolicy::new(42);
        for _ in 0..256 {
            let draw = policy.unit();
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn test_fixed_policy_draws() {
        let policy = FixedPolicy::new(0.5);
        assert_eq!(policy.unit(), 0.5);
        assert_eq!(policy.pick(10), 5);
        assert_eq!(policy.hex_bytes(2), "7f7f");
    }

    #[test]
    fn test_fixed_policy_pick_stays_below_bound() {
        let policy = FixedPolicy::new(0.999_999);
        assert_eq!(policy.pick(5), 4);
    }

    #[test]
    fn test_policy_artifacts_shape() {
        let artifacts = PolicyArtifacts::new(Arc::new(SeededPolicy::new(1)));
        let hash = artifacts.transaction_hash();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 2 + TX_HASH_BYTES * 2);
        assert!(artifacts.block_number() < MAX_BLOCK_NUMBER);
    }
}
