//! # Starport Test Suite
//!
//! Unified test crate containing cross-crate integration scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # TestWorld fixture: starport + tokens + authority keys
//! │
//! └── integration/      # Cross-crate choreography
//!     ├── bridge_lifecycle.rs   # end-to-end invoke/replay/rotation scenario
//!     ├── chain_resolution.rs   # hash-linked notice chain recovery
//!     ├── custody.rs            # supply caps, fee tokens, atomicity
//!     └── cash_flows.rs         # principal conservation under yield
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p starport-tests
//!
//! # By category
//! cargo test -p starport-tests integration::custody
//! ```

pub mod support;
