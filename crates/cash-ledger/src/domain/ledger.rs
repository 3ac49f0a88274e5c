//! # Principal Ledger
//!
//! Per-account principal balances, total principal, and face-value
//! allowances. Face value is derived from principal through the yield index
//! at read time; only principal is stored.
//!
//! Structural invariant: the sum of all account principal equals
//! `total_principal` after every public mutator. All principal movement goes
//! through two private helpers (`credit`/`debit`) to keep that single path.
//!
//! The ledger has no stored admin address: the Starport owns it exclusively,
//! so mint, burn, and yield scheduling are reachable only through Starport
//! methods. That ownership is the admin capability.

use super::errors::CashError;
use super::events::CashEvent;
use super::index::{amount_to_principal, principal_to_amount, Apr, YieldSchedule};
use serde::{Deserialize, Serialize};
use starport_types::{Address, AssetAmount, CashIndex, CashPrincipal, Timestamp, ZERO_ADDRESS};
use std::collections::BTreeMap;
use tracing::debug;

/// The Cash token's principal ledger and yield schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CashLedger {
    principal: BTreeMap<Address, CashPrincipal>,
    total_principal: CashPrincipal,
    /// Face-value allowances, keyed (owner, spender).
    allowances: BTreeMap<(Address, Address), AssetAmount>,
    schedule: YieldSchedule,
    events: Vec<CashEvent>,
}

impl CashLedger {
    /// Create an empty ledger with the yield schedule seeded at `start_at`.
    pub fn new(initial_rate: Apr, start_at: Timestamp) -> Self {
        Self {
            principal: BTreeMap::new(),
            total_principal: 0,
            allowances: BTreeMap::new(),
            schedule: YieldSchedule::new(initial_rate, start_at),
            events: Vec::new(),
        }
    }

    /// Current yield index, promoting a due next generation first.
    pub fn index_at(&mut self, now: Timestamp) -> Result<CashIndex, CashError> {
        self.schedule.index_at(now)
    }

    /// Stored principal of an account.
    pub fn principal_of(&self, account: &Address) -> CashPrincipal {
        self.principal.get(account).copied().unwrap_or(0)
    }

    /// Face-value balance of an account at `now`.
    pub fn balance_of(&mut self, account: &Address, now: Timestamp) -> Result<AssetAmount, CashError> {
        let index = self.index_at(now)?;
        principal_to_amount(self.principal_of(account), index)
    }

    /// Total principal across all accounts.
    pub fn total_principal(&self) -> CashPrincipal {
        self.total_principal
    }

    /// Remaining face-value allowance from owner to spender.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> AssetAmount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// The yield schedule (read-only).
    pub fn schedule(&self) -> &YieldSchedule {
        &self.schedule
    }

    /// Mint `principal` to an account, returning the face amount created.
    ///
    /// Reachable only through the Starport (ledger ownership is the admin
    /// gate). Note that the caller-visible amount is derived from principal,
    /// so minting a tiny principal at a large index reports a floored amount.
    pub fn mint(
        &mut self,
        account: Address,
        principal: CashPrincipal,
        now: Timestamp,
    ) -> Result<AssetAmount, CashError> {
        let index = self.index_at(now)?;
        let amount = principal_to_amount(principal, index)?;
        let new_total = self
            .total_principal
            .checked_add(principal)
            .ok_or(CashError::PrincipalOverflow)?;

        self.credit(account, principal)?;
        self.total_principal = new_total;
        self.events.push(CashEvent::Transfer {
            from: ZERO_ADDRESS,
            to: account,
            amount,
        });
        debug!(principal, amount, "cash minted");
        Ok(amount)
    }

    /// Burn `amount` of face value from an account, returning the principal
    /// destroyed. Fails `InsufficientPrincipal` when the account holds less
    /// principal than the amount converts to.
    pub fn burn(
        &mut self,
        account: Address,
        amount: AssetAmount,
        now: Timestamp,
    ) -> Result<CashPrincipal, CashError> {
        let index = self.index_at(now)?;
        let principal = amount_to_principal(amount, index)?;
        if self.principal_of(&account) < principal {
            return Err(CashError::InsufficientPrincipal);
        }

        self.debit(account, principal);
        self.total_principal -= principal;
        self.events.push(CashEvent::Transfer {
            from: account,
            to: ZERO_ADDRESS,
            amount,
        });
        debug!(principal, amount, "cash burned");
        Ok(principal)
    }

    /// Move `amount` of face value from sender to recipient. The amount is
    /// converted to principal exactly once.
    pub fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: AssetAmount,
        now: Timestamp,
    ) -> Result<(), CashError> {
        if sender == recipient {
            return Err(CashError::SelfTransferInvalid);
        }
        let index = self.index_at(now)?;
        let principal = amount_to_principal(amount, index)?;
        if self.principal_of(&sender) < principal {
            return Err(CashError::InsufficientBalance);
        }

        self.debit(sender, principal);
        self.credit(recipient, principal)?;
        self.events.push(CashEvent::Transfer {
            from: sender,
            to: recipient,
            amount,
        });
        Ok(())
    }

    /// Move `amount` from `sender` to `recipient` on behalf of `spender`,
    /// consuming face-value allowance.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        sender: Address,
        recipient: Address,
        amount: AssetAmount,
        now: Timestamp,
    ) -> Result<(), CashError> {
        if sender == recipient {
            return Err(CashError::SelfTransferInvalid);
        }
        let allowance = self.allowance(&sender, &spender);
        if allowance < amount {
            return Err(CashError::InsufficientAllowance);
        }
        let index = self.index_at(now)?;
        let principal = amount_to_principal(amount, index)?;
        if self.principal_of(&sender) < principal {
            return Err(CashError::InsufficientBalance);
        }

        self.allowances.insert((sender, spender), allowance - amount);
        self.debit(sender, principal);
        self.credit(recipient, principal)?;
        self.events.push(CashEvent::Transfer {
            from: sender,
            to: recipient,
            amount,
        });
        Ok(())
    }

    /// Set the face-value allowance from owner to spender.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: AssetAmount) {
        self.allowances.insert((owner, spender), amount);
        self.events.push(CashEvent::Approval {
            owner,
            spender,
            amount,
        });
    }

    /// Schedule the next yield generation (Starport-only via ownership).
    pub fn set_future_yield(
        &mut self,
        next_rate: Apr,
        next_index: CashIndex,
        next_start_at: Timestamp,
        now: Timestamp,
    ) -> Result<(), CashError> {
        self.schedule
            .set_future_yield(next_rate, next_index, next_start_at, now)
    }

    /// Drain the accumulated events.
    pub fn take_events(&mut self) -> Vec<CashEvent> {
        std::mem::take(&mut self.events)
    }

    /// Accumulated events since the last drain.
    pub fn events(&self) -> &[CashEvent] {
        &self.events
    }

    fn credit(&mut self, account: Address, principal: CashPrincipal) -> Result<(), CashError> {
        let entry = self.principal.entry(account).or_insert(0);
        *entry = entry
            .checked_add(principal)
            .ok_or(CashError::PrincipalOverflow)?;
        Ok(())
    }

    fn debit(&mut self, account: Address, principal: CashPrincipal) {
        // Callers check sufficiency; underflow here is a logic bug.
        let entry = self.principal.entry(account).or_insert(0);
        *entry -= principal;
        if *entry == 0 {
            self.principal.remove(&account);
        }
    }
}

/// Structural invariant: stored principal sums to the total.
pub fn invariant_principal_conservation(ledger: &CashLedger) -> bool {
    let sum: CashPrincipal = ledger.principal.values().copied().sum();
    sum == ledger.total_principal
}
