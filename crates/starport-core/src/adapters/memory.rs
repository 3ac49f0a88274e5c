//! # In-Memory Asset Registry
//!
//! A map-backed [`AssetClient`] for tests and demos. Tokens can be
//! registered with a transfer fee in basis points to model fee-on-transfer
//! behavior: the recipient receives `amount - fee` while the sender is
//! debited the full amount, exactly the shape that makes reported transfer
//! amounts untrustworthy.

use std::collections::BTreeMap;

use starport_types::{Address, AssetAmount};

use crate::ports::{AssetClient, AssetError};

const BPS_DENOMINATOR: u128 = 10_000;

#[derive(Clone, Debug, Default)]
struct TokenState {
    balances: BTreeMap<Address, AssetAmount>,
    fee_bps: u16,
}

/// Map-backed token registry implementing [`AssetClient`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssets {
    tokens: BTreeMap<Address, TokenState>,
}

impl InMemoryAssets {
    /// Empty registry with no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a well-behaved token.
    pub fn register(&mut self, asset: Address) {
        self.register_with_fee(asset, 0);
    }

    /// Registers a fee-on-transfer token charging `fee_bps` per transfer.
    pub fn register_with_fee(&mut self, asset: Address, fee_bps: u16) {
        self.tokens.insert(
            asset,
            TokenState {
                balances: BTreeMap::new(),
                fee_bps,
            },
        );
    }

    /// Credits `amount` of `asset` to `holder` out of thin air.
    pub fn mint(&mut self, asset: &Address, holder: &Address, amount: AssetAmount) {
        if let Some(token) = self.tokens.get_mut(asset) {
            let balance = token.balances.entry(*holder).or_insert(0);
            *balance = balance.saturating_add(amount);
        }
    }

    fn move_balance(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError> {
        let token = self
            .tokens
            .get_mut(asset)
            .ok_or(AssetError::UnknownAsset(*asset))?;
        let from_balance = token.balances.get(from).copied().unwrap_or(0);
        if from_balance < amount {
            return Err(AssetError::TransferFailed);
        }
        let fee = amount * u128::from(token.fee_bps) / BPS_DENOMINATOR;
        let delivered = amount - fee;

        token.balances.insert(*from, from_balance - amount);
        let to_balance = token.balances.entry(*to).or_insert(0);
        *to_balance += delivered;
        Ok(())
    }
}

impl AssetClient for InMemoryAssets {
    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<AssetAmount, AssetError> {
        let token = self
            .tokens
            .get(asset)
            .ok_or(AssetError::UnknownAsset(*asset))?;
        Ok(token.balances.get(holder).copied().unwrap_or(0))
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError> {
        self.move_balance(asset, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: AssetAmount,
    ) -> Result<(), AssetError> {
        self.move_balance(asset, from, to, amount)
    }
}
