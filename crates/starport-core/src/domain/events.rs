//! # Starport Events
//!
//! Event records appended by every successful bridge operation. Relayers on
//! the companion chain consume these to mirror locks and to track which
//! notices have landed.

use serde::{Deserialize, Serialize};
use starport_types::{Address, AssetAmount, CashIndex, CashPrincipal, EraId, EraIndex, Hash};

/// Events emitted by the Starport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarportEvent {
    /// An external or native asset was locked into custody.
    Lock {
        /// Locked asset (the native sentinel for native value).
        asset: Address,
        /// Account that supplied the asset.
        sender: Address,
        /// Companion chain the lock is destined for.
        chain: String,
        /// Recipient on the companion chain.
        recipient: Address,
        /// Measured amount actually received into custody.
        amount: AssetAmount,
    },
    /// Cash was locked (burned locally) for transport to the companion chain.
    LockCash {
        /// Account whose Cash was burned.
        sender: Address,
        /// Recipient on the companion chain.
        recipient: Address,
        /// Face amount burned.
        amount: AssetAmount,
        /// Principal the burn removed.
        principal: CashPrincipal,
        /// Yield index at the time of the burn.
        yield_index: CashIndex,
    },
    /// An asset left custody under an authorized unlock notice.
    Unlock {
        /// Unlocked asset.
        asset: Address,
        /// Local recipient.
        account: Address,
        /// Amount released.
        amount: AssetAmount,
    },
    /// Cash was minted under an authorized unlock notice.
    UnlockCash {
        /// Local recipient.
        account: Address,
        /// Face amount minted at the current index.
        amount: AssetAmount,
        /// Principal credited.
        principal: CashPrincipal,
    },
    /// The authority set was replaced.
    ChangeAuthorities {
        /// The new authority set.
        authorities: Vec<Address>,
    },
    /// A supply cap was set or cleared for an asset.
    NewSupplyCap {
        /// Capped asset.
        asset: Address,
        /// New cap; zero clears the cap.
        supply_cap: AssetAmount,
    },
    /// A notice passed all gates and its instruction executed.
    NoticeInvoked {
        /// Era the notice declared.
        era_id: EraId,
        /// Position within the era.
        era_index: EraIndex,
        /// Keccak hash of the full notice bytes.
        notice_hash: Hash,
        /// Opaque result bytes of the executed instruction.
        result: Vec<u8>,
    },
    /// A notice was re-presented after acceptance; nothing was executed.
    NoticeReplay {
        /// Keccak hash of the replayed notice.
        notice_hash: Hash,
    },
    /// A governance proposal was recorded for off-chain execution.
    ExecuteProposal {
        /// Human-readable title.
        title: String,
        /// Opaque encoded extrinsics.
        extrinsics: Vec<Vec<u8>>,
    },
    /// A free-form transaction request was recorded for the companion chain.
    ExecTrxRequest {
        /// Requesting account.
        account: Address,
        /// Encoded request string.
        request: String,
    },
}
