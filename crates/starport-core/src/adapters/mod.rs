//! # Starport Adapters
//!
//! Concrete implementations of the ports. Only the in-memory asset registry
//! lives here; it stands in for real token contracts in tests and demos.

pub mod memory;

pub use memory::InMemoryAssets;
