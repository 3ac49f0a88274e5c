//! # Starport Ports
//!
//! Seams to the world outside the bridge state machine. The only external
//! collaborators are ERC-20-shaped token contracts, reached through
//! [`AssetClient`].

pub mod asset;

pub use asset::{AssetClient, AssetError};
