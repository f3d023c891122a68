//! # Anchor Records
//!
//! The per-anchor record stored by the registry. Core fields (creator,
//! hash, URI, timestamp) are immutable once created; only the verification
//! flag and the link list ever change, and both only grow.

use chrono::{DateTime, Utc};
use holdfast_core::{AnchorId, AssetHash, PartyId};
use serde::{Deserialize, Serialize};

/// A registry record binding an asset hash to its creator and cross-links.
///
/// Snapshots of this record are what [`AnchorRegistry::get_anchor`] returns;
/// mutating a snapshot has no effect on the registry.
///
/// [`AnchorRegistry::get_anchor`]: crate::AnchorRegistry::get_anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRecord {
    /// Sequential registry identifier, allocated in creation order.
    pub id: AnchorId,
    /// Identity that created the anchor. Immutable.
    pub creator: PartyId,
    /// Content hash of the anchored asset. Immutable, opaque.
    pub asset_hash: AssetHash,
    /// Optional metadata locator. May be empty. Immutable.
    pub metadata_uri: String,
    /// Registry clock reading at creation. Immutable.
    pub created_at: DateTime<Utc>,
    /// Admin-granted trust flag. Transitions false to true at most once,
    /// never back.
    pub verified: bool,
    /// Ids this anchor is linked to, in link order. Append-only; linking
    /// the same pair twice appends twice on both sides.
    pub linked_anchors: Vec<AnchorId>,
}
