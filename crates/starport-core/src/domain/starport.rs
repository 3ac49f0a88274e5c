//! # Starport Orchestrator
//!
//! Owns custody state (supply caps, native value held), the era/replay
//! sequencing state, the authority set, and the Cash ledger, and wires them
//! to the notice codec and quorum verifier.
//!
//! All entry points run to completion atomically in a serialized execution
//! environment; every path validates fully before mutating local state, and
//! external token calls are checked before any ledger update. The one
//! deliberate exception is `lock`, where the external pull is itself the
//! measured step: the balance delta is read after the call returns and no
//! local state is touched until it succeeds.

use cash_ledger::{Apr, CashLedger};
use starport_crypto::{authorize, quorum_threshold};
use starport_types::{
    format_address, format_hash, Address, AssetAmount, CashPrincipal, EraId, Hash, Timestamp,
    NATIVE_ASSET,
};
use std::collections::BTreeMap;

use super::chain::resolve_chain;
use super::errors::StarportError;
use super::events::StarportEvent;
use super::instruction::{decode_instruction, Instruction};
use super::notice::{notice_hash, parse_notice, NoticeHeader};
use super::sequencing::SequencingState;
use crate::ports::AssetClient;

/// Construction parameters for a [`Starport`].
#[derive(Clone, Debug)]
pub struct StarportConfig {
    /// Local admin account.
    pub admin: Address,
    /// The Starport's own address; unlock entry points require this caller.
    pub address: Address,
    /// Address under which the Cash token is known to lockers.
    pub cash_address: Address,
    /// Initial authority set.
    pub authorities: Vec<Address>,
    /// Initial Cash yield rate.
    pub initial_yield: Apr,
    /// Unix time the yield index starts accruing.
    pub genesis_time: Timestamp,
}

/// Outcome of presenting a notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// First acceptance; the instruction executed.
    Applied {
        /// Hash of the accepted notice.
        notice_hash: Hash,
        /// Return data of the executed instruction.
        result: Vec<u8>,
    },
    /// The notice had been accepted before; nothing executed.
    Replayed {
        /// Hash of the replayed notice.
        notice_hash: Hash,
    },
}

/// The bridge contract: custody, sequencing, authorities, and Cash.
#[derive(Clone, Debug)]
pub struct Starport {
    admin: Address,
    address: Address,
    cash_address: Address,
    authorities: Vec<Address>,
    sequencing: SequencingState,
    /// Cap of zero means uncapped; absent assets are uncapped too.
    supply_caps: BTreeMap<Address, AssetAmount>,
    native_held: AssetAmount,
    cash: CashLedger,
    events: Vec<StarportEvent>,
}

impl Starport {
    /// Builds a Starport, seeding the Cash ledger at index 1.0.
    pub fn new(config: StarportConfig) -> Result<Self, StarportError> {
        if config.authorities.is_empty() {
            return Err(StarportError::EmptyAuthoritySet);
        }
        tracing::info!(
            authorities = config.authorities.len(),
            quorum = quorum_threshold(config.authorities.len()),
            "starport constructed"
        );
        Ok(Self {
            admin: config.admin,
            address: config.address,
            cash_address: config.cash_address,
            authorities: config.authorities,
            sequencing: SequencingState::new(),
            supply_caps: BTreeMap::new(),
            native_held: 0,
            cash: CashLedger::new(config.initial_yield, config.genesis_time),
            events: Vec::new(),
        })
    }

    /// Local admin account.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// The Starport's own address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Address the Cash token is locked under.
    pub fn cash_address(&self) -> &Address {
        &self.cash_address
    }

    /// Current authority set.
    pub fn authorities(&self) -> &[Address] {
        &self.authorities
    }

    /// Era the Starport is currently in.
    pub fn current_era(&self) -> EraId {
        self.sequencing.current_era()
    }

    /// Whether a notice hash has been accepted.
    pub fn is_notice_used(&self, hash: &Hash) -> bool {
        self.sequencing.is_used(hash)
    }

    /// Configured supply cap for an asset, if any (zero means uncapped).
    pub fn supply_cap(&self, asset: &Address) -> AssetAmount {
        self.supply_caps.get(asset).copied().unwrap_or(0)
    }

    /// Native value currently in custody.
    pub fn native_held(&self) -> AssetAmount {
        self.native_held
    }

    /// The Cash ledger (read-only).
    pub fn cash(&self) -> &CashLedger {
        &self.cash
    }

    /// The Cash ledger, for user-level token operations.
    ///
    /// Transfers, approvals, and balance reads go straight to the ledger;
    /// only mint, burn, and yield scheduling are gated behind the bridge.
    pub fn cash_mut(&mut self) -> &mut CashLedger {
        &mut self.cash
    }

    /// Drains accumulated events.
    pub fn take_events(&mut self) -> Vec<StarportEvent> {
        std::mem::take(&mut self.events)
    }

    /// Accumulated events since the last drain.
    pub fn events(&self) -> &[StarportEvent] {
        &self.events
    }

    // --- Outbound: locking ---

    /// Locks an asset for the caller's own account on the companion chain.
    pub fn lock(
        &mut self,
        caller: Address,
        amount: AssetAmount,
        asset: Address,
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<(), StarportError> {
        self.lock_to(caller, amount, asset, "ETH", caller, assets, now)
    }

    /// Locks an asset for an arbitrary recipient on a companion chain.
    ///
    /// Cash is burned rather than custodied. Any other asset is pulled via
    /// `transfer_from` and the locked amount is the measured balance delta,
    /// so fee-on-transfer tokens lock what actually arrived.
    pub fn lock_to(
        &mut self,
        caller: Address,
        amount: AssetAmount,
        asset: Address,
        chain: &str,
        recipient: Address,
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<(), StarportError> {
        if asset == NATIVE_ASSET {
            return Err(StarportError::UseNativeLockEntryPoint);
        }
        if asset == self.cash_address {
            return self.lock_cash(caller, amount, recipient, now);
        }

        let before = assets.balance_of(&asset, &self.address)?;
        assets.transfer_from(&asset, &caller, &self.address, amount)?;
        let after = assets.balance_of(&asset, &self.address)?;
        let delta = after.saturating_sub(before);

        self.check_supply_cap(&asset, after)?;

        tracing::info!(
            asset = %format_address(&asset),
            nominal = amount,
            measured = delta,
            "asset locked"
        );
        self.events.push(StarportEvent::Lock {
            asset,
            sender: caller,
            chain: chain.to_string(),
            recipient,
            amount: delta,
        });
        Ok(())
    }

    /// Locks native value carried with the call.
    pub fn lock_native(
        &mut self,
        caller: Address,
        amount: AssetAmount,
        chain: &str,
        recipient: Address,
    ) -> Result<(), StarportError> {
        let after = self
            .native_held
            .checked_add(amount)
            .ok_or(StarportError::MathOverflow)?;
        self.check_supply_cap(&NATIVE_ASSET, after)?;

        self.native_held = after;
        self.events.push(StarportEvent::Lock {
            asset: NATIVE_ASSET,
            sender: caller,
            chain: chain.to_string(),
            recipient,
            amount,
        });
        Ok(())
    }

    fn lock_cash(
        &mut self,
        caller: Address,
        amount: AssetAmount,
        recipient: Address,
        now: Timestamp,
    ) -> Result<(), StarportError> {
        let principal = self.cash.burn(caller, amount, now)?;
        let yield_index = self.cash.index_at(now)?;
        self.events.push(StarportEvent::LockCash {
            sender: caller,
            recipient,
            amount,
            principal,
            yield_index,
        });
        Ok(())
    }

    fn check_supply_cap(
        &self,
        asset: &Address,
        would_hold: AssetAmount,
    ) -> Result<(), StarportError> {
        let cap = self.supply_cap(asset);
        if cap != 0 && would_hold > cap {
            return Err(StarportError::SupplyCapExceeded {
                asset: *asset,
                cap,
                held: would_hold,
            });
        }
        Ok(())
    }

    // --- Inbound: notice invocation ---

    /// Presents a notice with authority signatures.
    ///
    /// Pipeline: parse, verify quorum against the current authority set,
    /// short-circuit replays, validate the era, execute, mark used.
    pub fn invoke(
        &mut self,
        notice: &[u8],
        signatures: &[Vec<u8>],
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<InvokeOutcome, StarportError> {
        let header = parse_notice(notice)?;
        let hash = notice_hash(notice);
        authorize(&hash, &self.authorities, signatures)?;
        self.apply_authorized(header, hash, assets, now)
    }

    /// Presents a notice authorized by hash linkage instead of signatures.
    ///
    /// `descendants` must connect the notice to an already-accepted tail;
    /// only the head notice is applied.
    pub fn invoke_chain(
        &mut self,
        notice: &[u8],
        descendants: &[Vec<u8>],
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<InvokeOutcome, StarportError> {
        let header = parse_notice(notice)?;
        let hash = notice_hash(notice);
        if self.sequencing.is_used(&hash) {
            return Ok(self.replay(hash));
        }
        resolve_chain(&hash, descendants, |h| self.sequencing.is_used(h))?;
        self.apply_authorized(header, hash, assets, now)
    }

    fn apply_authorized(
        &mut self,
        header: NoticeHeader,
        hash: Hash,
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<InvokeOutcome, StarportError> {
        if self.sequencing.is_used(&hash) {
            return Ok(self.replay(hash));
        }
        let instruction = decode_instruction(&header.body)?;
        let transition = self
            .sequencing
            .validate_era(header.era_id, instruction.may_start_era())?;
        let result = self.apply_instruction(&instruction, assets, now)?;
        self.sequencing.accept(hash, transition);
        tracing::info!(
            notice = %format_hash(&hash),
            era_id = header.era_id,
            era_index = header.era_index,
            "notice invoked"
        );
        self.events.push(StarportEvent::NoticeInvoked {
            era_id: header.era_id,
            era_index: header.era_index,
            notice_hash: hash,
            result: result.clone(),
        });
        Ok(InvokeOutcome::Applied {
            notice_hash: hash,
            result,
        })
    }

    fn replay(&mut self, hash: Hash) -> InvokeOutcome {
        tracing::debug!(notice = %format_hash(&hash), "notice replayed");
        self.events.push(StarportEvent::NoticeReplay { notice_hash: hash });
        InvokeOutcome::Replayed { notice_hash: hash }
    }

    fn apply_instruction(
        &mut self,
        instruction: &Instruction,
        assets: &mut dyn AssetClient,
        now: Timestamp,
    ) -> Result<Vec<u8>, StarportError> {
        match instruction {
            Instruction::Unlock {
                asset,
                amount,
                account,
            } => self.unlock_internal(*asset, *amount, *account, assets),
            Instruction::UnlockCash { account, principal } => {
                self.unlock_cash_internal(*account, *principal, now)
            }
            Instruction::ChangeAuthorities { authorities } => {
                self.change_authorities_internal(authorities.clone())
            }
            Instruction::SetSupplyCap { asset, cap } => self.set_supply_cap_internal(*asset, *cap),
            Instruction::SetFutureYield {
                next_rate,
                next_index,
                next_start_at,
            } => {
                self.cash
                    .set_future_yield(*next_rate, *next_index, *next_start_at, now)?;
                Ok(Vec::new())
            }
            Instruction::ExecuteProposal { title, extrinsics } => {
                self.events.push(StarportEvent::ExecuteProposal {
                    title: title.clone(),
                    extrinsics: extrinsics.iter().map(|w| w.to_vec()).collect(),
                });
                Ok(Vec::new())
            }
        }
    }

    // --- Inbound: instruction targets ---

    /// Releases a locked asset. Only reachable through an invoked notice.
    pub fn unlock(
        &mut self,
        caller: Address,
        asset: Address,
        amount: AssetAmount,
        account: Address,
        assets: &mut dyn AssetClient,
    ) -> Result<(), StarportError> {
        self.require_self(caller)?;
        self.unlock_internal(asset, amount, account, assets)?;
        Ok(())
    }

    /// Mints Cash principal. Only reachable through an invoked notice.
    pub fn unlock_cash(
        &mut self,
        caller: Address,
        account: Address,
        principal: CashPrincipal,
        now: Timestamp,
    ) -> Result<(), StarportError> {
        self.require_self(caller)?;
        self.unlock_cash_internal(account, principal, now)?;
        Ok(())
    }

    /// Replaces the authority set. Admin directly, or self via notice.
    pub fn change_authorities(
        &mut self,
        caller: Address,
        authorities: Vec<Address>,
    ) -> Result<(), StarportError> {
        self.require_admin_or_self(caller)?;
        self.change_authorities_internal(authorities)?;
        Ok(())
    }

    /// Sets or clears a supply cap. Admin directly, or self via notice.
    pub fn set_supply_cap(
        &mut self,
        caller: Address,
        asset: Address,
        cap: AssetAmount,
    ) -> Result<(), StarportError> {
        self.require_admin_or_self(caller)?;
        self.set_supply_cap_internal(asset, cap)?;
        Ok(())
    }

    /// Records a governance proposal. Admin only; moves no funds.
    pub fn execute_proposal(
        &mut self,
        caller: Address,
        title: String,
        extrinsics: Vec<Vec<u8>>,
    ) -> Result<(), StarportError> {
        if caller != self.admin {
            return Err(StarportError::Unauthorized);
        }
        self.events
            .push(StarportEvent::ExecuteProposal { title, extrinsics });
        Ok(())
    }

    /// Records a free-form request for the companion chain. Open to anyone.
    pub fn exec_trx_request(&mut self, caller: Address, request: &str) {
        self.events.push(StarportEvent::ExecTrxRequest {
            account: caller,
            request: request.to_string(),
        });
    }

    fn require_self(&self, caller: Address) -> Result<(), StarportError> {
        if caller != self.address {
            return Err(StarportError::MustOriginateLocally);
        }
        Ok(())
    }

    fn require_admin_or_self(&self, caller: Address) -> Result<(), StarportError> {
        if caller != self.admin && caller != self.address {
            return Err(StarportError::Unauthorized);
        }
        Ok(())
    }

    fn unlock_internal(
        &mut self,
        asset: Address,
        amount: AssetAmount,
        account: Address,
        assets: &mut dyn AssetClient,
    ) -> Result<Vec<u8>, StarportError> {
        if asset == NATIVE_ASSET {
            if self.native_held < amount {
                return Err(StarportError::InsufficientNativeValue {
                    held: self.native_held,
                    need: amount,
                });
            }
            self.native_held -= amount;
        } else {
            assets.transfer(&asset, &self.address, &account, amount)?;
        }
        tracing::info!(
            asset = %format_address(&asset),
            account = %format_address(&account),
            amount,
            "asset unlocked"
        );
        self.events.push(StarportEvent::Unlock {
            asset,
            account,
            amount,
        });
        Ok(Vec::new())
    }

    fn unlock_cash_internal(
        &mut self,
        account: Address,
        principal: CashPrincipal,
        now: Timestamp,
    ) -> Result<Vec<u8>, StarportError> {
        let amount = self.cash.mint(account, principal, now)?;
        self.events.push(StarportEvent::UnlockCash {
            account,
            amount,
            principal,
        });
        Ok(Vec::new())
    }

    fn change_authorities_internal(
        &mut self,
        authorities: Vec<Address>,
    ) -> Result<Vec<u8>, StarportError> {
        if authorities.is_empty() {
            return Err(StarportError::EmptyAuthoritySet);
        }
        tracing::info!(
            count = authorities.len(),
            quorum = quorum_threshold(authorities.len()),
            "authority set replaced"
        );
        self.authorities = authorities.clone();
        self.events
            .push(StarportEvent::ChangeAuthorities { authorities });
        Ok(Vec::new())
    }

    fn set_supply_cap_internal(
        &mut self,
        asset: Address,
        cap: AssetAmount,
    ) -> Result<Vec<u8>, StarportError> {
        if asset == self.cash_address {
            return Err(StarportError::CashSupplyCapNotAllowed);
        }
        if cap == 0 {
            self.supply_caps.remove(&asset);
        } else {
            self.supply_caps.insert(asset, cap);
        }
        self.events.push(StarportEvent::NewSupplyCap {
            asset,
            supply_cap: cap,
        });
        Ok(Vec::new())
    }
}
