//! # Quorum Authorization
//!
//! Checks a list of signatures over a notice hash against the current
//! authority set. The quorum rule is strictly more than one third of the
//! authorities: `floor(n / 3) + 1`. This is the Byzantine-fault-style
//! threshold the protocol is built around, deliberately NOT a majority.
//!
//! The check is pure: marking a notice as used afterwards is the caller's
//! responsibility.

use super::errors::CryptoError;
use super::recover::recover;
use starport_types::{Address, Hash};
use tracing::debug;

/// Minimum number of distinct authorized signatures required.
///
/// `quorum_threshold(1) == 1`, `quorum_threshold(3) == 2`,
/// `quorum_threshold(5) == 2`, `quorum_threshold(6) == 3`.
pub fn quorum_threshold(authority_count: usize) -> usize {
    authority_count / 3 + 1
}

/// Authorize a notice hash against the authority set.
///
/// Each signature is recovered to a signer address. A signer appearing twice
/// in one submission fails [`CryptoError::DuplicateSigner`]; a signer outside
/// the authority set fails [`CryptoError::UnauthorizedSigner`]. Once all
/// signatures are accounted for, the count of unique authorized signers must
/// meet [`quorum_threshold`] or the check fails [`CryptoError::BelowQuorum`].
pub fn authorize(
    notice_hash: &Hash,
    authorities: &[Address],
    signatures: &[Vec<u8>],
) -> Result<(), CryptoError> {
    let mut seen: Vec<Address> = Vec::with_capacity(signatures.len());

    for signature in signatures {
        let signer = recover(notice_hash, signature)?;
        if seen.contains(&signer) {
            return Err(CryptoError::DuplicateSigner(signer));
        }
        if !authorities.contains(&signer) {
            return Err(CryptoError::UnauthorizedSigner(signer));
        }
        seen.push(signer);
    }

    let quorum = quorum_threshold(authorities.len());
    if seen.len() < quorum {
        return Err(CryptoError::BelowQuorum {
            signers: seen.len(),
            quorum,
        });
    }

    debug!(
        signers = seen.len(),
        quorum,
        authorities = authorities.len(),
        "notice authorized"
    );
    Ok(())
}
