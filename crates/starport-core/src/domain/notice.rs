//! # Notice Codec
//!
//! Wire format for authority-signed notices. Every notice is a fixed
//! 99-byte header followed by a selector-tagged instruction payload:
//!
//! ```text
//! offset  size  field
//! 0       3     chain-type tag, ASCII "ETH"
//! 3       32    era id, big-endian word (upper 24 bytes zero)
//! 35      32    era index, big-endian word (upper 24 bytes zero)
//! 67      32    parent notice hash
//! 99      ..    instruction payload (4-byte selector + 32-byte words)
//! ```
//!
//! A notice is identified everywhere by the keccak-256 hash of its full
//! byte string, header included.

use starport_crypto::keccak256;
use starport_types::{EraId, EraIndex, Hash};

use super::errors::StarportError;

/// Chain-type tag expected at the head of every notice.
pub const CHAIN_TYPE_TAG: [u8; 3] = *b"ETH";

/// Fixed byte length of the notice header.
pub const NOTICE_HEADER_LENGTH: usize = 99;

const ERA_ID_RANGE: core::ops::Range<usize> = 3..35;
const ERA_INDEX_RANGE: core::ops::Range<usize> = 35..67;
const PARENT_HASH_RANGE: core::ops::Range<usize> = 67..99;

/// Decoded notice header plus a copy of the instruction payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeHeader {
    /// Era the notice declares.
    pub era_id: EraId,
    /// Position of the notice within its era.
    pub era_index: EraIndex,
    /// Hash of the preceding notice in the emission chain.
    pub parent_hash: Hash,
    /// Selector-tagged instruction payload.
    pub body: Vec<u8>,
}

/// Computes the identifying hash of a notice from its full byte string.
pub fn notice_hash(notice: &[u8]) -> Hash {
    keccak256(notice)
}

/// Parses notice bytes into a [`NoticeHeader`].
///
/// Rejects short inputs, a wrong chain-type tag, and era words that do not
/// fit in 64 bits. The payload is not decoded here; selector dispatch
/// happens in the instruction module.
pub fn parse_notice(notice: &[u8]) -> Result<NoticeHeader, StarportError> {
    if notice.len() < NOTICE_HEADER_LENGTH {
        return Err(StarportError::MalformedNotice);
    }
    if notice[0..3] != CHAIN_TYPE_TAG {
        return Err(StarportError::InvalidChainType);
    }

    let era_id = decode_era_word(&notice[ERA_ID_RANGE])?;
    let era_index = decode_era_word(&notice[ERA_INDEX_RANGE])?;

    let mut parent_hash = [0u8; 32];
    parent_hash.copy_from_slice(&notice[PARENT_HASH_RANGE]);

    Ok(NoticeHeader {
        era_id,
        era_index,
        parent_hash,
        body: notice[NOTICE_HEADER_LENGTH..].to_vec(),
    })
}

/// Assembles notice bytes from header fields and an instruction payload.
pub fn encode_notice(era_id: EraId, era_index: EraIndex, parent_hash: &Hash, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(NOTICE_HEADER_LENGTH + body.len());
    out.extend_from_slice(&CHAIN_TYPE_TAG);
    out.extend_from_slice(&encode_era_word(era_id));
    out.extend_from_slice(&encode_era_word(era_index));
    out.extend_from_slice(parent_hash);
    out.extend_from_slice(body);
    out
}

/// Decodes a 32-byte big-endian era word, rejecting values above `u64::MAX`.
fn decode_era_word(word: &[u8]) -> Result<u64, StarportError> {
    debug_assert_eq!(word.len(), 32);
    if word[..24].iter().any(|b| *b != 0) {
        return Err(StarportError::MalformedNotice);
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[24..32]);
    Ok(u64::from_be_bytes(raw))
}

fn encode_era_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}
