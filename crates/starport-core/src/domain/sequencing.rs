//! # Era and Replay Sequencing
//!
//! Tracks the current era and the set of notice hashes that have already
//! been accepted. Eras advance only through accepted era-start notices, one
//! at a time; accepted notices are never accepted twice.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use starport_types::{format_hash, EraId, Hash};

use super::errors::StarportError;

/// How a validated notice relates to the current era.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EraTransition {
    /// Notice declares the current era; nothing advances.
    Ordinary,
    /// Notice declares the next era and will advance it on success.
    EraStart,
}

/// Current era plus the used-notice set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencingState {
    current_era: EraId,
    used: BTreeSet<Hash>,
}

impl SequencingState {
    /// Fresh state at era 0 with no accepted notices.
    pub fn new() -> Self {
        Self::default()
    }

    /// The era the Starport is currently in.
    pub fn current_era(&self) -> EraId {
        self.current_era
    }

    /// Whether a notice hash has already been accepted.
    pub fn is_used(&self, notice_hash: &Hash) -> bool {
        self.used.contains(notice_hash)
    }

    /// Validates a declared era against the current one.
    ///
    /// The current era is always acceptable. The next era is acceptable only
    /// when the instruction kind may start one; eras never skip or regress.
    pub fn validate_era(
        &self,
        declared: EraId,
        may_start_era: bool,
    ) -> Result<EraTransition, StarportError> {
        if declared == self.current_era {
            return Ok(EraTransition::Ordinary);
        }
        if may_start_era && declared == self.current_era.wrapping_add(1) {
            return Ok(EraTransition::EraStart);
        }
        Err(StarportError::InvalidEra {
            declared,
            current: self.current_era,
        })
    }

    /// Records a notice as accepted, advancing the era for an era start.
    pub fn accept(&mut self, notice_hash: Hash, transition: EraTransition) {
        if transition == EraTransition::EraStart {
            self.current_era = self.current_era.wrapping_add(1);
            tracing::info!(era = self.current_era, "era started");
        }
        tracing::debug!(notice = %format_hash(&notice_hash), "notice accepted");
        self.used.insert(notice_hash);
    }

    /// Number of notices accepted so far.
    pub fn accepted_count(&self) -> usize {
        self.used.len()
    }
}
