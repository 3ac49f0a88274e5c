//! # Starport Crypto
//!
//! Signature recovery and quorum authorization for authority-signed notices.
//!
//! ## Purpose
//!
//! Notices produced by the consensus chain carry a list of 65-byte
//! `r || s || v` signatures over the keccak-256 hash of the notice bytes.
//! This crate recovers the signing addresses and enforces the supermajority
//! rule against the current authority set:
//!
//! - [`recover`]: pure address recovery from a prehashed message
//! - [`authorize`]: deduplication, membership, and quorum threshold
//! - [`quorum_threshold`]: `floor(n / 3) + 1`, strictly more than one third
//!
//! ## Module Structure
//!
//! ```text
//! starport-crypto/
//! ├── domain/          # recovery, quorum, errors
//! └── test_support/    # deterministic signing fixtures for tests
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod test_support;

// Re-exports
pub use domain::{
    authorize, keccak256, quorum_threshold, recover, CryptoError, SIGNATURE_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
