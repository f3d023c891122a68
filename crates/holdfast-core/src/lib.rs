//! # holdfast-core — Foundational Types
//!
//! Domain primitives shared across the Holdfast anchor registry:
//!
//! - **Identity** ([`identity`]): [`PartyId`] caller identities and
//!   [`AnchorId`] registry identifiers, each a distinct validated newtype.
//!
//! - **Digests** ([`digest`]): [`AssetHash`] opaque content-hash strings,
//!   with a SHA-256 convenience constructor for callers holding the asset
//!   bytes.
//!
//! - **Errors** ([`error`]): [`ValidationError`] for construction-time
//!   rejection of malformed values.
//!
//! ## Design Principle
//!
//! Invalid values are unrepresentable past the constructor. Serde
//! deserialization routes through the same validation, so a malformed
//! identity or an empty hash is rejected at the boundary rather than
//! stored.

pub mod digest;
pub mod error;
pub mod identity;

// Re-export primary types.
pub use digest::AssetHash;
pub use error::ValidationError;
pub use identity::{AnchorId, PartyId};
