//! # Crypto Domain Errors
//!
//! Authorization failures reported by recovery and quorum checks.

use starport_types::Address;
use thiserror::Error;

/// Signature and quorum authorization errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature is not exactly 65 bytes.
    #[error("invalid signature length: {0} (expected 65)")]
    InvalidSignatureLength(usize),

    /// Recovery failed: bad v, malformed r/s, or the zero address recovered.
    #[error("invalid signature recovery")]
    InvalidSignatureRecovery,

    /// The same authority signed more than once in a single submission.
    #[error("duplicate signer: {0:?}")]
    DuplicateSigner(Address),

    /// A recovered signer is not a member of the authority set.
    #[error("unauthorized signer: {0:?}")]
    UnauthorizedSigner(Address),

    /// Fewer valid unique authorized signatures than the quorum threshold.
    #[error("below quorum: {signers}/{quorum} authorized signatures")]
    BelowQuorum {
        /// Unique authorized signers recovered.
        signers: usize,
        /// Required threshold for the current authority set.
        quorum: usize,
    },
}
