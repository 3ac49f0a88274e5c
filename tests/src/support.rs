//! # Test World
//!
//! A self-contained bridge environment: a Starport with a deterministic
//! authority set, an in-memory token registry, and a movable clock.
//! Signatures come from seeded keypairs so every run is reproducible.

use k256::ecdsa::SigningKey;
use starport_core::{
    encode_instruction, encode_notice, notice_hash, InMemoryAssets, Instruction, InvokeOutcome,
    Starport, StarportConfig, StarportError,
};
use starport_crypto::test_support::{address_of, keypair_from_seed, sign_hash};
use starport_types::{Address, EraId, EraIndex, Hash, Timestamp};

/// Well-known admin account.
pub const ADMIN: Address = [0xAD; 20];
/// The Starport's own address.
pub const STARPORT_ADDRESS: Address = [0x57; 20];
/// Address the Cash token is locked under.
pub const CASH_ADDRESS: Address = [0xCA; 20];
/// A registered test token.
pub const TOKEN: Address = [0x10; 20];
/// Test account.
pub const ALICE: Address = [0xA1; 20];
/// Test account.
pub const BOB: Address = [0xB2; 20];

/// A Starport, its tokens, its authority keys, and a clock.
#[derive(Clone)]
pub struct TestWorld {
    /// The bridge under test.
    pub starport: Starport,
    /// External token registry.
    pub assets: InMemoryAssets,
    /// Authority signing keys, aligned with the configured set.
    pub keys: Vec<(SigningKey, Address)>,
    /// Current block time.
    pub now: Timestamp,
}

impl TestWorld {
    /// A world with `authority_count` seeded authorities and one registered
    /// token, yield at zero.
    pub fn new(authority_count: u64) -> Self {
        let keys: Vec<(SigningKey, Address)> = (1..=authority_count)
            .map(|seed| {
                let (signing, verifying) = keypair_from_seed(seed);
                let address = address_of(&verifying);
                (signing, address)
            })
            .collect();
        let starport = Starport::new(StarportConfig {
            admin: ADMIN,
            address: STARPORT_ADDRESS,
            cash_address: CASH_ADDRESS,
            authorities: keys.iter().map(|(_, a)| *a).collect(),
            initial_yield: cash_ledger::Apr::ZERO,
            genesis_time: 0,
        })
        .expect("non-empty authority set");

        let mut assets = InMemoryAssets::new();
        assets.register(TOKEN);

        Self {
            starport,
            assets,
            keys,
            now: 0,
        }
    }

    /// Builds a notice around an instruction.
    pub fn notice(
        &self,
        era_id: EraId,
        era_index: EraIndex,
        parent: &Hash,
        instruction: &Instruction,
    ) -> Vec<u8> {
        encode_notice(era_id, era_index, parent, &encode_instruction(instruction))
    }

    /// Signs a notice hash with the authorities at `signers`.
    pub fn sign(&self, notice: &[u8], signers: &[usize]) -> Vec<Vec<u8>> {
        let hash = notice_hash(notice);
        signers
            .iter()
            .map(|i| sign_hash(&hash, &self.keys[*i].0))
            .collect()
    }

    /// Invokes a notice signed by the authorities at `signers`.
    pub fn invoke(
        &mut self,
        notice: &[u8],
        signers: &[usize],
    ) -> Result<InvokeOutcome, StarportError> {
        let signatures = self.sign(notice, signers);
        let now = self.now;
        self.starport
            .invoke(notice, &signatures, &mut self.assets, now)
    }

    /// Invokes a notice authorized by a descendant chain.
    pub fn invoke_chain(
        &mut self,
        notice: &[u8],
        descendants: &[Vec<u8>],
    ) -> Result<InvokeOutcome, StarportError> {
        let now = self.now;
        self.starport
            .invoke_chain(notice, descendants, &mut self.assets, now)
    }

    /// Runs an operation with transaction semantics: a failure restores the
    /// world to its state before the call, mirroring a serialized execution
    /// environment where a reverted transaction leaves nothing behind.
    pub fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut TestWorld) -> Result<T, StarportError>,
    ) -> Result<T, StarportError> {
        let snapshot = self.clone();
        match op(self) {
            Ok(value) => Ok(value),
            Err(error) => {
                *self = snapshot;
                Err(error)
            }
        }
    }
}
