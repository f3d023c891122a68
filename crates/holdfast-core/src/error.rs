//! # Validation Errors
//!
//! Construction-time failures for the domain-primitive newtypes. Every
//! newtype constructor in this crate returns one of these variants instead
//! of accepting a malformed value.

use thiserror::Error;

/// Errors from validating domain-primitive values at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Party identity was empty, blank, or contained control characters.
    #[error("invalid party id: {0:?}")]
    InvalidPartyId(String),

    /// Asset hash string was empty.
    #[error("asset hash must be non-empty")]
    EmptyAssetHash,

    /// Anchor id zero is never allocated; ids start at 1.
    #[error("anchor id must be positive")]
    ZeroAnchorId,
}
