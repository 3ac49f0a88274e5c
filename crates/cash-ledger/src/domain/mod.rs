//! # Cash Domain
//!
//! Pure accounting logic: the yield index and the principal ledger.

pub mod errors;
pub mod events;
pub mod index;
pub mod ledger;

pub use errors::{CashError, MathError};
pub use events::CashEvent;
pub use index::{
    amount_to_principal, compound, principal_to_amount, Apr, YieldGeneration, YieldSchedule,
    APR_ONE, INDEX_ONE, SECONDS_PER_YEAR,
};
pub use ledger::{invariant_principal_conservation, CashLedger};
