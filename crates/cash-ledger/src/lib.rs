//! # Cash Ledger
//!
//! Principal ledger plus time-indexed yield compounding for the Cash token.
//!
//! ## Purpose
//!
//! Cash balances are stored as *principal*, a yield-index-independent unit.
//! Face value is `principal * index / INDEX_ONE`, where the index is a
//! monotonically increasing fixed-point accumulator driven by a
//! continuously-compounding annualized rate:
//!
//! - [`CashLedger`]: principal map, allowances, mint/burn/transfer
//! - [`YieldSchedule`]: current and scheduled-next yield generations with
//!   lazy read-time rollover
//! - [`compound`]: bounded-error fixed-point `exp(rate * dt)`
//!
//! ## Module Structure
//!
//! ```text
//! cash-ledger/
//! └── domain/          # ledger, yield index, events, errors
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

// Re-exports
pub use domain::{
    amount_to_principal, compound, invariant_principal_conservation, principal_to_amount, Apr,
    CashError, CashEvent, CashLedger, MathError, YieldGeneration, YieldSchedule, APR_ONE,
    INDEX_ONE, SECONDS_PER_YEAR,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
