//! # Cash Domain Errors
//!
//! Accounting failures. Every error aborts the enclosing operation before any
//! ledger state is mutated.

use thiserror::Error;

/// Failures from raw fixed-point calculations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MathError {
    /// Result does not fit the target width.
    #[error("arithmetic overflow")]
    Overflow,

    /// Result would be negative.
    #[error("arithmetic underflow")]
    Underflow,
}

/// Cash accounting errors.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CashError {
    /// Converted principal exceeds the 128-bit principal width.
    #[error("principal overflow")]
    PrincipalOverflow,

    /// Account holds less principal than a burn requires.
    #[error("insufficient principal")]
    InsufficientPrincipal,

    /// Account holds less than the transfer amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Face-value allowance is smaller than the transfer amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Transfers from an account to itself are disallowed.
    #[error("self transfer invalid")]
    SelfTransferInvalid,

    /// Scheduled yield start is not strictly after the current generation's start.
    #[error("invalid yield start")]
    InvalidYieldStart,

    /// Scheduled yield rate exceeds the protocol ceiling.
    #[error("yield rate above maximum")]
    YieldRateTooHigh,

    /// A fixed-point calculation failed.
    #[error("math error: {0}")]
    Math(#[from] MathError),
}
