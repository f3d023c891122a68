//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the two identifier kinds in the registry.
//! Each identifier is a distinct type: you cannot pass a [`PartyId`] where
//! an [`AnchorId`] is expected.
//!
//! ## Validation
//!
//! [`PartyId`] validates at construction time; a null/blank identity is
//! unrepresentable, which is what lets the registry guarantee its admin
//! slot is never null. [`AnchorId`] is positive by construction; the
//! registry allocates ids densely starting at 1 and never reuses one.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for newtypes that must validate
/// their contents. Deserializes the raw representation, then routes through
/// the type's `new()` constructor so that invalid values are rejected at
/// deserialization time, not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident, $raw:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <$raw>::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Authenticated caller identity.
///
/// The registry never authenticates callers itself; every operation
/// receives a `PartyId` that an external identity primitive has already
/// authenticated. The value is opaque to the registry (a DID, a public-key
/// fingerprint, an account name).
///
/// # Validation
///
/// - Must be non-empty and not all whitespace
/// - Must not contain ASCII control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartyId(String);

impl_validating_deserialize!(PartyId, String);

impl PartyId {
    /// Create a party identity from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPartyId`] if the value is empty,
    /// blank, or contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() || s.chars().any(|c| c.is_ascii_control()) {
            return Err(ValidationError::InvalidPartyId(s));
        }
        Ok(Self(s))
    }

    /// Access the identity string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PartyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Registry anchor identifier.
///
/// Allocated sequentially in creation order (1, 2, 3, ...) and never
/// reused. Zero is not a valid id, so `Option<AnchorId>` and "id 0 means
/// absent" conventions never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AnchorId(u64);

impl_validating_deserialize!(AnchorId, u64);

impl AnchorId {
    /// Create an anchor id from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroAnchorId`] for zero.
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::ZeroAnchorId);
        }
        Ok(Self(value))
    }

    /// Access the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
