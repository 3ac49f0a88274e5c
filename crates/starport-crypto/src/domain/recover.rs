//! # Signature Recovery (secp256k1)
//!
//! Recovers the Ethereum-style signing address from a 65-byte
//! `r(32) || s(32) || v(1)` signature over a prehashed message.
//!
//! The recovery bit `v` must be 27 or 28, the pre-EIP-155 convention the
//! consensus chain's signers emit. Uses the `k256` crate for the curve math
//! and keccak-256 for address derivation.

use super::errors::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use starport_types::{Address, Hash, ZERO_ADDRESS};

/// Exact wire length of a recoverable signature: r(32) || s(32) || v(1).
pub const SIGNATURE_LENGTH: usize = 65;

/// Keccak256 hash function, Ethereum-style.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Recover the signer address from a message hash and a 65-byte signature.
///
/// Fails with [`CryptoError::InvalidSignatureLength`] if the signature is not
/// exactly 65 bytes, and [`CryptoError::InvalidSignatureRecovery`] if `v` is
/// not 27 or 28, the curve math rejects `r`/`s`, or the recovered address is
/// the zero address.
pub fn recover(message_hash: &Hash, signature: &[u8]) -> Result<Address, CryptoError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(CryptoError::InvalidSignatureLength(signature.len()));
    }

    let recovery_id = parse_recovery_bit(signature[64])?;
    let sig = Signature::from_slice(&signature[..64])
        .map_err(|_| CryptoError::InvalidSignatureRecovery)?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| CryptoError::InvalidSignatureRecovery)?;

    let address = address_from_pubkey(&recovered_key);
    if address == ZERO_ADDRESS {
        return Err(CryptoError::InvalidSignatureRecovery);
    }
    Ok(address)
}

/// Derive the Ethereum-style address from a public key:
/// last 20 bytes of keccak256 of the uncompressed point (without 0x04 prefix).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Parse the recovery bit. Only the 27/28 convention is accepted on the wire.
fn parse_recovery_bit(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        27 => 0,
        28 => 1,
        _ => return Err(CryptoError::InvalidSignatureRecovery),
    };
    RecoveryId::try_from(id).map_err(|_| CryptoError::InvalidSignatureRecovery)
}
