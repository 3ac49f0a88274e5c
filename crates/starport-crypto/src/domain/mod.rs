//! # Crypto Domain
//!
//! Pure recovery and quorum logic. No state, no I/O.

pub mod errors;
pub mod quorum;
pub mod recover;

pub use errors::CryptoError;
pub use quorum::{authorize, quorum_threshold};
pub use recover::{keccak256, recover, SIGNATURE_LENGTH};
