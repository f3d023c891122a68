//! # Asset Hashes
//!
//! Opaque content-digest strings for the assets being anchored. The
//! registry stores and returns these verbatim; it never fetches asset
//! content and never verifies that a hash matches anything. The only
//! constraint the registry imposes is non-emptiness.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Opaque content hash of an external digital asset.
///
/// The format is caller-defined (multihash, `sha256:<hex>`, bare hex, an
/// IPFS CID). Anchoring a hash asserts nothing about the content behind it.
///
/// # Validation
///
/// - Must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssetHash(String);

impl AssetHash {
    /// Create an asset hash from an existing digest string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAssetHash`] for the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::EmptyAssetHash);
        }
        Ok(Self(s))
    }

    /// Digest raw content into a `sha256:<hex>` asset hash.
    ///
    /// Convenience for callers that hold the asset bytes at anchoring
    /// time. The registry itself never recomputes or checks this binding.
    pub fn from_content(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("sha256:{}", hex_encode(&digest)))
    }

    /// Access the digest string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for AssetHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AssetHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
