//! # Cash Events
//!
//! ERC-20-compatible event records appended by every successful mutator.
//! Mints are transfers from the zero address, burns transfers to it.

use serde::{Deserialize, Serialize};
use starport_types::{Address, AssetAmount};

/// Events emitted by the Cash ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashEvent {
    /// Face-value transfer between accounts (zero address for mint/burn).
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Face amount moved.
        amount: AssetAmount,
    },
    /// Allowance granted from owner to spender.
    Approval {
        /// Granting account.
        owner: Address,
        /// Approved spender.
        spender: Address,
        /// Face-value allowance.
        amount: AssetAmount,
    },
}
