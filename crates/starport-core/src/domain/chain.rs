//! # Notice Chain Resolution
//!
//! Every notice carries the hash of its predecessor, so the emission stream
//! forms a hash chain. A notice whose signatures were lost can still be
//! authorized by exhibiting the chain of descendants connecting it to a
//! notice the Starport has already accepted: forging such a chain would
//! require a keccak preimage.

use starport_types::Hash;

use super::errors::StarportError;
use super::notice::{notice_hash, parse_notice};

/// Verifies that `descendants` hash-links `head_hash` to an accepted tail.
///
/// `descendants` runs oldest to newest: the first entry's parent hash must
/// be `head_hash`, each later entry's parent hash must be the hash of the
/// entry before it, and the final entry must already be accepted. The
/// intermediate links need not have been accepted themselves.
pub fn resolve_chain(
    head_hash: &Hash,
    descendants: &[Vec<u8>],
    is_accepted: impl Fn(&Hash) -> bool,
) -> Result<(), StarportError> {
    let tail = match descendants.last() {
        Some(tail) => tail,
        None => return Err(StarportError::TailNotAccepted),
    };
    if !is_accepted(&notice_hash(tail)) {
        return Err(StarportError::TailNotAccepted);
    }

    let mut expected_parent = *head_hash;
    for notice in descendants {
        let header = parse_notice(notice)?;
        if header.parent_hash != expected_parent {
            return Err(StarportError::NoticeHashMismatch);
        }
        expected_parent = notice_hash(notice);
    }
    Ok(())
}
