//! # Starport Errors
//!
//! Failure taxonomy for notice handling and bridge operations. Signature
//! failures surface transparently from the crypto crate, ledger failures
//! from the Cash ledger, and token-call failures from the asset port.

use cash_ledger::CashError;
use starport_crypto::CryptoError;
use starport_types::{Address, AssetAmount, EraId};
use thiserror::Error;

use crate::ports::AssetError;

/// Errors produced by notice handling and bridge operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StarportError {
    // --- Encoding ---
    /// Notice bytes too short, badly padded, or carrying an unknown selector.
    #[error("malformed notice")]
    MalformedNotice,

    /// Notice chain-type tag is not the expected target-chain tag.
    #[error("invalid chain type tag")]
    InvalidChainType,

    /// Instruction payload length is not aligned to the expected word size.
    #[error("excess bytes in instruction payload")]
    ExcessBytes,

    // --- Authorization ---
    /// Signature recovery or quorum failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    // --- Sequencing ---
    /// Declared era is neither the current era nor a legal era start.
    #[error("invalid era: declared {declared}, current {current}")]
    InvalidEra {
        /// Era the notice declared.
        declared: EraId,
        /// Era the Starport is in.
        current: EraId,
    },

    /// A link in a presented notice chain does not hash to its child's parent.
    #[error("notice hash mismatch in chain")]
    NoticeHashMismatch,

    /// The tail of a presented notice chain has never been accepted.
    #[error("chain tail was never accepted")]
    TailNotAccepted,

    // --- Scope ---
    /// Unlock entry points may only be reached through an invoked notice.
    #[error("call must originate from an invoked notice")]
    MustOriginateLocally,

    /// Caller lacks the admin capability for this operation.
    #[error("caller is not authorized")]
    Unauthorized,

    /// An authority rotation may not install an empty set.
    #[error("authority set may not be empty")]
    EmptyAuthoritySet,

    /// The Cash token is never supply-capped.
    #[error("supply caps may not be set on cash")]
    CashSupplyCapNotAllowed,

    // --- Accounting ---
    /// A lock would push held balance past the asset's supply cap.
    #[error("supply cap exceeded for {asset}: cap {cap}, would hold {held}", asset = starport_types::format_address(.asset))]
    SupplyCapExceeded {
        /// Capped asset.
        asset: Address,
        /// Configured cap.
        cap: AssetAmount,
        /// Balance the lock would have produced.
        held: AssetAmount,
    },

    /// Native value must be locked through the native entry point.
    #[error("use the native lock entry point for native value")]
    UseNativeLockEntryPoint,

    /// Checked arithmetic overflow in custody accounting.
    #[error("arithmetic overflow")]
    MathOverflow,

    /// Unlock of more native value than the Starport holds.
    #[error("insufficient native value held: have {held}, need {need}")]
    InsufficientNativeValue {
        /// Native value in custody.
        held: AssetAmount,
        /// Amount the unlock asked for.
        need: AssetAmount,
    },

    /// Cash ledger failure.
    #[error(transparent)]
    Cash(#[from] CashError),

    /// External token call failure.
    #[error(transparent)]
    Asset(#[from] AssetError),
}
