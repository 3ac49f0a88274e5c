//! # Starport Shared Types
//!
//! Primitive types shared by every Starport crate: addresses, hashes,
//! amounts, eras, and timestamps.
//!
//! These mirror the receiving chain's native widths: 20-byte accounts and
//! asset addresses, 32-byte keccak hashes, 128-bit amounts and principal.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// 20-byte account or asset address.
pub type Address = [u8; 20];

/// 32-byte keccak-256 hash.
pub type Hash = [u8; 32];

/// Face-value amount of an asset (smallest unit).
pub type AssetAmount = u128;

/// Stored, yield-index-independent unit of Cash balance.
pub type CashPrincipal = u128;

/// Fixed-point yield index raw value (see `cash-ledger` for the base unit).
pub type CashIndex = u128;

/// Annualized interest rate raw value (4 decimals).
pub type AprRate = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Monotonically increasing epoch identifying the valid authority set.
pub type EraId = u64;

/// Sequence index of a notice within its era.
pub type EraIndex = u64;

/// The zero address. Recovering it from a signature is always an error.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Pseudo-address standing in for the chain's native currency.
///
/// Locking against this address must go through the dedicated native-lock
/// entry point, never the ERC-20 path.
pub const NATIVE_ASSET: Address = [0xEE; 20];

/// Render an address as a 0x-prefixed lowercase hex string.
pub fn format_address(address: &Address) -> String {
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for byte in address {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Render a hash as a 0x-prefixed lowercase hex string.
pub fn format_hash(hash: &Hash) -> String {
    let mut out = String::with_capacity(66);
    out.push_str("0x");
    for byte in hash {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
