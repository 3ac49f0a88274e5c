//! # Instruction Union
//!
//! The closed set of operations a notice may carry. Payloads are a 4-byte
//! keccak selector followed by 32-byte words: addresses occupy the first 20
//! bytes of their word (right-padded), unsigned integers are big-endian
//! (left-padded). Unknown selectors are malformed; a payload whose length
//! is not selector + whole words has excess bytes.

use cash_ledger::Apr;
use starport_crypto::keccak256;
use starport_types::{Address, AssetAmount, CashIndex, CashPrincipal, Timestamp};

use super::errors::StarportError;

const SELECTOR_LENGTH: usize = 4;
const WORD_LENGTH: usize = 32;

const SIG_UNLOCK: &[u8] = b"unlock(address,uint256,address)";
const SIG_UNLOCK_CASH: &[u8] = b"unlockCash(address,uint128)";
const SIG_CHANGE_AUTHORITIES: &[u8] = b"changeAuthorities(address[])";
const SIG_SET_SUPPLY_CAP: &[u8] = b"setSupplyCap(address,uint256)";
const SIG_SET_FUTURE_YIELD: &[u8] = b"setFutureYield(uint128,uint128,uint256)";
const SIG_EXECUTE_PROPOSAL: &[u8] = b"executeProposal(string,bytes32[])";

/// Operations the authority set may instruct the Starport to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Release a locked asset to a local account.
    Unlock {
        /// Asset to release (the native sentinel for native value).
        asset: Address,
        /// Amount to release.
        amount: AssetAmount,
        /// Local recipient.
        account: Address,
    },
    /// Mint Cash principal to a local account.
    UnlockCash {
        /// Local recipient.
        account: Address,
        /// Principal to credit.
        principal: CashPrincipal,
    },
    /// Replace the authority set. The only instruction allowed to start an era.
    ChangeAuthorities {
        /// The incoming authority set.
        authorities: Vec<Address>,
    },
    /// Set or clear (cap of zero) the supply cap for an asset.
    SetSupplyCap {
        /// Asset to cap.
        asset: Address,
        /// New cap; zero clears.
        cap: AssetAmount,
    },
    /// Schedule the next Cash yield generation.
    SetFutureYield {
        /// Rate of the next generation.
        next_rate: Apr,
        /// Index the next generation starts from.
        next_index: CashIndex,
        /// Unix time the next generation takes effect.
        next_start_at: Timestamp,
    },
    /// Record a governance proposal. Extrinsics are opaque 32-byte words.
    ExecuteProposal {
        /// Human-readable title.
        title: String,
        /// Opaque encoded extrinsics, one word each.
        extrinsics: Vec<[u8; 32]>,
    },
}

impl Instruction {
    /// Whether this instruction may declare the next era and rotate into it.
    pub fn may_start_era(&self) -> bool {
        matches!(self, Instruction::ChangeAuthorities { .. })
    }
}

fn selector(signature: &[u8]) -> [u8; 4] {
    let digest = keccak256(signature);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Decodes an instruction payload (selector + words).
pub fn decode_instruction(body: &[u8]) -> Result<Instruction, StarportError> {
    if body.len() < SELECTOR_LENGTH {
        return Err(StarportError::MalformedNotice);
    }
    let (sel, payload) = body.split_at(SELECTOR_LENGTH);
    if payload.len() % WORD_LENGTH != 0 {
        return Err(StarportError::ExcessBytes);
    }
    let words: Vec<&[u8]> = payload.chunks(WORD_LENGTH).collect();

    if sel == selector(SIG_UNLOCK) {
        let [asset, amount, account] = fixed_words(&words)?;
        Ok(Instruction::Unlock {
            asset: decode_address(asset)?,
            amount: decode_u128(amount)?,
            account: decode_address(account)?,
        })
    } else if sel == selector(SIG_UNLOCK_CASH) {
        let [account, principal] = fixed_words(&words)?;
        Ok(Instruction::UnlockCash {
            account: decode_address(account)?,
            principal: decode_u128(principal)?,
        })
    } else if sel == selector(SIG_CHANGE_AUTHORITIES) {
        let authorities = words
            .iter()
            .map(|w| decode_address(w))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Instruction::ChangeAuthorities { authorities })
    } else if sel == selector(SIG_SET_SUPPLY_CAP) {
        let [asset, cap] = fixed_words(&words)?;
        Ok(Instruction::SetSupplyCap {
            asset: decode_address(asset)?,
            cap: decode_u128(cap)?,
        })
    } else if sel == selector(SIG_SET_FUTURE_YIELD) {
        let [rate, index, start] = fixed_words(&words)?;
        Ok(Instruction::SetFutureYield {
            next_rate: Apr(decode_u128(rate)?),
            next_index: decode_u128(index)?,
            next_start_at: decode_u64(start)?,
        })
    } else if sel == selector(SIG_EXECUTE_PROPOSAL) {
        decode_proposal(&words)
    } else {
        Err(StarportError::MalformedNotice)
    }
}

/// Encodes an instruction into a payload (selector + words).
pub fn encode_instruction(instruction: &Instruction) -> Vec<u8> {
    match instruction {
        Instruction::Unlock {
            asset,
            amount,
            account,
        } => {
            let mut out = selector(SIG_UNLOCK).to_vec();
            out.extend_from_slice(&encode_address(asset));
            out.extend_from_slice(&encode_u128(*amount));
            out.extend_from_slice(&encode_address(account));
            out
        }
        Instruction::UnlockCash { account, principal } => {
            let mut out = selector(SIG_UNLOCK_CASH).to_vec();
            out.extend_from_slice(&encode_address(account));
            out.extend_from_slice(&encode_u128(*principal));
            out
        }
        Instruction::ChangeAuthorities { authorities } => {
            let mut out = selector(SIG_CHANGE_AUTHORITIES).to_vec();
            for authority in authorities {
                out.extend_from_slice(&encode_address(authority));
            }
            out
        }
        Instruction::SetSupplyCap { asset, cap } => {
            let mut out = selector(SIG_SET_SUPPLY_CAP).to_vec();
            out.extend_from_slice(&encode_address(asset));
            out.extend_from_slice(&encode_u128(*cap));
            out
        }
        Instruction::SetFutureYield {
            next_rate,
            next_index,
            next_start_at,
        } => {
            let mut out = selector(SIG_SET_FUTURE_YIELD).to_vec();
            out.extend_from_slice(&encode_u128(next_rate.0));
            out.extend_from_slice(&encode_u128(*next_index));
            out.extend_from_slice(&encode_u64(*next_start_at));
            out
        }
        Instruction::ExecuteProposal { title, extrinsics } => {
            let mut out = selector(SIG_EXECUTE_PROPOSAL).to_vec();
            out.extend_from_slice(&encode_u64(title.len() as u64));
            for chunk in title.as_bytes().chunks(WORD_LENGTH) {
                let mut word = [0u8; WORD_LENGTH];
                word[..chunk.len()].copy_from_slice(chunk);
                out.extend_from_slice(&word);
            }
            for extrinsic in extrinsics {
                out.extend_from_slice(extrinsic);
            }
            out
        }
    }
}

/// Proposal layout: length word, right-padded title words, then one word per
/// extrinsic.
fn decode_proposal(words: &[&[u8]]) -> Result<Instruction, StarportError> {
    let (length_word, rest) = words.split_first().ok_or(StarportError::ExcessBytes)?;
    let title_len = decode_u64(length_word)? as usize;
    let title_words = title_len.div_ceil(WORD_LENGTH);
    if rest.len() < title_words {
        return Err(StarportError::ExcessBytes);
    }

    let mut title_bytes = Vec::with_capacity(title_words * WORD_LENGTH);
    for word in &rest[..title_words] {
        title_bytes.extend_from_slice(word);
    }
    if title_bytes[title_len..].iter().any(|b| *b != 0) {
        return Err(StarportError::MalformedNotice);
    }
    title_bytes.truncate(title_len);
    let title = String::from_utf8(title_bytes).map_err(|_| StarportError::MalformedNotice)?;

    let extrinsics = rest[title_words..]
        .iter()
        .map(|w| {
            let mut word = [0u8; WORD_LENGTH];
            word.copy_from_slice(w);
            word
        })
        .collect();

    Ok(Instruction::ExecuteProposal { title, extrinsics })
}

/// Expects exactly `N` words; a different count means stray or missing words.
fn fixed_words<'a, const N: usize>(words: &[&'a [u8]]) -> Result<[&'a [u8]; N], StarportError> {
    if words.len() != N {
        return Err(StarportError::ExcessBytes);
    }
    let mut out = [&[] as &[u8]; N];
    out.copy_from_slice(words);
    Ok(out)
}

fn decode_address(word: &[u8]) -> Result<Address, StarportError> {
    if word[20..].iter().any(|b| *b != 0) {
        return Err(StarportError::MalformedNotice);
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[..20]);
    Ok(address)
}

fn decode_u128(word: &[u8]) -> Result<u128, StarportError> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(StarportError::MalformedNotice);
    }
    let mut raw = [0u8; 16];
    raw.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(raw))
}

fn decode_u64(word: &[u8]) -> Result<u64, StarportError> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(StarportError::MalformedNotice);
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(raw))
}

fn encode_address(address: &Address) -> [u8; WORD_LENGTH] {
    let mut word = [0u8; WORD_LENGTH];
    word[..20].copy_from_slice(address);
    word
}

fn encode_u128(value: u128) -> [u8; WORD_LENGTH] {
    let mut word = [0u8; WORD_LENGTH];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_u64(value: u64) -> [u8; WORD_LENGTH] {
    let mut word = [0u8; WORD_LENGTH];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
