//! # Starport Domain
//!
//! Pure bridge logic: the notice codec, the closed instruction union, era
//! and replay sequencing, chained-notice resolution, and the [`Starport`]
//! orchestrator that ties them to asset custody and the Cash ledger.

pub mod chain;
pub mod errors;
pub mod events;
pub mod instruction;
pub mod notice;
pub mod sequencing;
pub mod starport;

pub use chain::resolve_chain;
pub use errors::StarportError;
pub use events::StarportEvent;
pub use instruction::{decode_instruction, encode_instruction, Instruction};
pub use notice::{
    encode_notice, notice_hash, parse_notice, NoticeHeader, CHAIN_TYPE_TAG, NOTICE_HEADER_LENGTH,
};
pub use sequencing::{EraTransition, SequencingState};
pub use starport::{InvokeOutcome, Starport, StarportConfig};
