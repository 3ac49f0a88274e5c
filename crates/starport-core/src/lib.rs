//! # Starport Core
//!
//! The receiving side of the bridge: notice parsing, era/replay sequencing,
//! quorum-gated instruction execution, and supply-capped asset custody.
//!
//! ## Control flow
//!
//! An authority-signed notice arrives at [`Starport::invoke`]:
//!
//! 1. the notice codec parses the 99-byte header and keccak hash,
//! 2. quorum is verified against the current authority set,
//! 3. an already-used notice short-circuits to a replay no-op,
//! 4. the era is validated (current era, or current+1 for rotations),
//! 5. the embedded instruction executes against the Starport itself,
//! 6. the notice is marked used and `NoticeInvoked` is recorded.
//!
//! [`Starport::invoke_chain`] is the alternate entry path: it authorizes a
//! missed notice by hash-linking it to an already-accepted descendant
//! instead of re-presenting signatures.
//!
//! ## Module Structure
//!
//! ```text
//! starport-core/
//! ├── domain/          # notice codec, instructions, eras, chain walk, Starport
//! ├── ports/           # AssetClient (external ERC-20-shaped tokens)
//! └── adapters/        # in-memory asset registry for tests
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemoryAssets;
pub use domain::{
    decode_instruction, encode_instruction, encode_notice, notice_hash, parse_notice,
    EraTransition, Instruction, InvokeOutcome,
    NoticeHeader, SequencingState, Starport, StarportConfig, StarportError, StarportEvent,
    CHAIN_TYPE_TAG, NOTICE_HEADER_LENGTH,
};
pub use ports::{AssetClient, AssetError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
