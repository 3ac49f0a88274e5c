//! # Asset Client Port
//!
//! External token contracts are not trusted to report transfer amounts
//! honestly: fee-on-transfer and rebasing tokens deliver less than asked.
//! Callers must therefore measure their own balance before and after a
//! pull and trust only the observed delta. The port only promises that a
//! returned `Ok` means the token call did not revert.

use starport_types::{Address, AssetAmount};
use thiserror::Error;

/// Errors surfaced by external token calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The asset is not a known token contract.
    #[error("unknown asset {}", starport_types::format_address(.0))]
    UnknownAsset(Address),

    /// The token call reverted.
    #[error("token transfer reverted")]
    TransferFailed,
}

/// Client-side view of ERC-20-shaped token contracts.
pub trait AssetClient {
    /// Current balance of `holder` in `asset`.
    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<AssetAmount, AssetError>;

    /// Transfer from the caller's own holdings.
    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError>;

    /// Transfer against a previously granted allowance.
    fn transfer_from(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError>;
}
