//! # Test Support
//!
//! Deterministic signing fixtures shared by unit tests and the workspace
//! integration suite. Not for production use: keys are derived from small
//! counters so failures reproduce exactly.

use crate::domain::recover::address_from_pubkey;
use k256::ecdsa::{SigningKey, VerifyingKey};
use starport_types::{Address, Hash};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEED: AtomicU64 = AtomicU64::new(1);

/// Generate a fresh deterministic keypair (process-unique seed).
pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
    let seed = NEXT_SEED.fetch_add(1, Ordering::Relaxed);
    keypair_from_seed(seed)
}

/// Derive a keypair from a fixed nonzero seed.
pub fn keypair_from_seed(seed: u64) -> (SigningKey, VerifyingKey) {
    assert!(seed != 0, "seed must be a nonzero scalar");
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&seed.to_be_bytes());
    let signing_key = SigningKey::from_slice(&bytes).expect("nonzero seed is a valid scalar");
    let verifying_key = *signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// Ethereum-style address of a verifying key.
pub fn address_of(verifying_key: &VerifyingKey) -> Address {
    address_from_pubkey(verifying_key)
}

/// Sign a prehashed message, producing the 65-byte `r || s || v` wire form
/// with `v` in the 27/28 convention.
pub fn sign_hash(message_hash: &Hash, signing_key: &SigningKey) -> Vec<u8> {
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(message_hash)
        .expect("signing a 32-byte prehash");
    let mut out = Vec::with_capacity(65);
    out.extend_from_slice(&signature.to_bytes());
    out.push(27 + recovery_id.to_byte());
    out
}
