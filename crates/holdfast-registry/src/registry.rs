// SPDX-License-Identifier: BUSL-1.1
//! # Anchor Registry
//!
//! The registry aggregate: sequential anchor allocation, symmetric
//! cross-linking, single-admin verification, and the creator index.
//!
//! All state lives behind one `RwLock`, so every mutating operation is a
//! single indivisible transaction against the registry: preconditions are
//! checked before any mutation, and either the whole effect commits or
//! nothing does. Reads share the lock and always observe a consistent
//! snapshot, never a half-written link.
//!
//! The registry is append-only history. Anchors are never deleted, ids are
//! never reused, links are never removed, and the verified flag never
//! reverts.

use std::collections::HashMap;
use std::sync::Arc;

use holdfast_core::{AnchorId, AssetHash, PartyId, ValidationError};
use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::anchor::AnchorRecord;
use crate::clock::{Clock, SystemClock};
use crate::event::{EventEnvelope, EventSink, NullSink, RegistryEvent};

/// Errors from registry operations.
///
/// Every failure is detected before any mutation and leaves the registry
/// unchanged; there are no fatal errors and nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Input failed validation: empty asset hash or self-link.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No anchor with the given id has been allocated.
    #[error("anchor {id} not found")]
    NotFound { id: AnchorId },

    /// Caller lacks the role the operation requires.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Verification is one-way and terminal; the anchor is already there.
    #[error("anchor {id} is already verified")]
    AlreadyVerified { id: AnchorId },
}

impl From<ValidationError> for RegistryError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput {
            reason: err.to_string(),
        }
    }
}

/// The owned aggregate guarded by the registry lock.
struct RegistryState {
    /// Anchor with id `n` lives at index `n - 1`; ids are dense, so a
    /// growable vector is the id map.
    anchors: Vec<AnchorRecord>,
    /// Creation-ordered anchor ids per creator. Append-only.
    by_creator: HashMap<PartyId, Vec<AnchorId>>,
    /// The single identity allowed to verify anchors and hand over the
    /// role. Never null: `PartyId` is validated at construction.
    admin: PartyId,
}

impl RegistryState {
    /// Resolve an id to its vector index, or `NotFound`.
    fn index_of(&self, id: AnchorId) -> Result<usize, RegistryError> {
        let idx = id.value() as usize - 1;
        if idx >= self.anchors.len() {
            return Err(RegistryError::NotFound { id });
        }
        Ok(idx)
    }

    fn require_admin(&self, caller: &PartyId) -> Result<(), RegistryError> {
        if *caller != self.admin {
            return Err(RegistryError::Unauthorized {
                reason: format!("{caller} is not the registry admin"),
            });
        }
        Ok(())
    }

    fn require_creator_or_admin(
        &self,
        idx: usize,
        caller: &PartyId,
    ) -> Result<(), RegistryError> {
        let record = &self.anchors[idx];
        if *caller != record.creator && *caller != self.admin {
            return Err(RegistryError::Unauthorized {
                reason: format!(
                    "{caller} is neither the creator of anchor {} nor the admin",
                    record.id
                ),
            });
        }
        Ok(())
    }
}

/// Append-only anchor registry.
///
/// Operations take `&self`; the registry is safe to share across threads
/// (`Arc<AnchorRegistry>`). Each mutating operation runs in one
/// write-locked critical section and publishes its notification(s) before
/// releasing the lock, so sink delivery order matches state-change order.
pub struct AnchorRegistry {
    state: RwLock<RegistryState>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl AnchorRegistry {
    /// Create a registry with the given admin, discarding events and using
    /// wall-clock time.
    pub fn new(admin: PartyId) -> Self {
        Self::with_collaborators(admin, Arc::new(NullSink), Arc::new(SystemClock))
    }

    /// Create a registry wired to explicit external collaborators: an
    /// event sink for indexers and a clock for creation timestamps.
    pub fn with_collaborators(
        admin: PartyId,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                anchors: Vec::new(),
                by_creator: HashMap::new(),
                admin,
            }),
            clock,
            sink,
        }
    }

    /// Anchor an asset reference, returning the newly allocated id.
    ///
    /// Ids are allocated sequentially in creation order (1, 2, 3, ...)
    /// and never reused. The metadata URI may be empty; the asset hash
    /// may not.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidInput`] if `asset_hash` is empty.
    pub fn create_anchor(
        &self,
        asset_hash: impl Into<String>,
        metadata_uri: impl Into<String>,
        caller: &PartyId,
    ) -> Result<AnchorId, RegistryError> {
        let asset_hash = AssetHash::new(asset_hash)?;
        let metadata_uri = metadata_uri.into();

        let mut state = self.state.write();
        let id = AnchorId::new(state.anchors.len() as u64 + 1).expect("count + 1 is positive");

        state.anchors.push(AnchorRecord {
            id,
            creator: caller.clone(),
            asset_hash: asset_hash.clone(),
            metadata_uri: metadata_uri.clone(),
            created_at: self.clock.now(),
            verified: false,
            linked_anchors: Vec::new(),
        });
        state.by_creator.entry(caller.clone()).or_default().push(id);

        tracing::debug!(id = %id, creator = %caller, "anchor created");
        self.emit(RegistryEvent::AnchorCreated {
            id,
            creator: caller.clone(),
            asset_hash,
            metadata_uri,
        });
        Ok(id)
    }

    /// Link two anchors symmetrically.
    ///
    /// Appends `to` to `from`'s link list and `from` to `to`'s, as one
    /// atomic unit. Deliberately not idempotent: repeating the call with
    /// the same pair appends duplicate entries on both sides, so the link
    /// count carries meaning. Two `AnchorLinked` events are published, one
    /// per direction.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidInput`] if `from == to`
    /// - [`RegistryError::NotFound`] if either id is unallocated
    /// - [`RegistryError::Unauthorized`] if `caller` is neither `from`'s
    ///   creator nor the admin
    pub fn link_anchors(
        &self,
        from: AnchorId,
        to: AnchorId,
        caller: &PartyId,
    ) -> Result<(), RegistryError> {
        // Self-links are invalid regardless of whether the id exists.
        if from == to {
            return Err(RegistryError::InvalidInput {
                reason: format!("cannot link anchor {from} to itself"),
            });
        }

        let mut state = self.state.write();
        let from_idx = state.index_of(from)?;
        let to_idx = state.index_of(to)?;
        state.require_creator_or_admin(from_idx, caller)?;

        // Preconditions all hold; both appends commit under the one lock.
        state.anchors[from_idx].linked_anchors.push(to);
        state.anchors[to_idx].linked_anchors.push(from);

        tracing::debug!(from = %from, to = %to, caller = %caller, "anchors linked");
        self.emit(RegistryEvent::AnchorLinked { from, to });
        self.emit(RegistryEvent::AnchorLinked { from: to, to: from });
        Ok(())
    }

    /// Mark an anchor verified. Admin only; one-way and terminal.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if the id is unallocated
    /// - [`RegistryError::Unauthorized`] if `caller` is not the admin
    /// - [`RegistryError::AlreadyVerified`] on a repeat call
    pub fn verify_anchor(&self, id: AnchorId, caller: &PartyId) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        let idx = state.index_of(id)?;
        state.require_admin(caller)?;
        if state.anchors[idx].verified {
            return Err(RegistryError::AlreadyVerified { id });
        }

        state.anchors[idx].verified = true;

        tracing::debug!(id = %id, verified_by = %caller, "anchor verified");
        self.emit(RegistryEvent::AnchorVerified {
            id,
            verified_by: caller.clone(),
        });
        Ok(())
    }

    /// Full snapshot of an anchor, including its current link list and
    /// verification flag.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if the id is unallocated.
    pub fn get_anchor(&self, id: AnchorId) -> Result<AnchorRecord, RegistryError> {
        let state = self.state.read();
        let idx = state.index_of(id)?;
        Ok(state.anchors[idx].clone())
    }

    /// Ids created by the given identity, in creation order. Empty for an
    /// identity that has created nothing.
    pub fn user_anchors(&self, creator: &PartyId) -> Vec<AnchorId> {
        self.state
            .read()
            .by_creator
            .get(creator)
            .cloned()
            .unwrap_or_default()
    }

    /// Hand the admin role over. Admin only.
    ///
    /// A null new admin is unrepresentable here: `PartyId` is validated
    /// non-empty at construction.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unauthorized`] if `caller` is not the admin.
    pub fn change_admin(&self, new_admin: PartyId, caller: &PartyId) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        state.require_admin(caller)?;

        let old_admin = std::mem::replace(&mut state.admin, new_admin.clone());

        tracing::info!(old_admin = %old_admin, new_admin = %new_admin, "registry admin changed");
        self.emit(RegistryEvent::AdminChanged {
            old_admin,
            new_admin,
        });
        Ok(())
    }

    /// Current admin identity.
    pub fn admin(&self) -> PartyId {
        self.state.read().admin.clone()
    }

    /// Total anchors created so far; the source of the next id.
    pub fn anchor_count(&self) -> u64 {
        self.state.read().anchors.len() as u64
    }

    /// Whether the anchor is verified.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if the id is unallocated.
    pub fn is_verified(&self, id: AnchorId) -> Result<bool, RegistryError> {
        Ok(self.get_anchor(id)?.verified)
    }

    fn emit(&self, event: RegistryEvent) {
        self.sink.publish(EventEnvelope {
            event_id: Uuid::new_v4(),
            emitted_at: self.clock.now(),
            event,
        });
    }
}

impl std::fmt::Debug for AnchorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("AnchorRegistry")
            .field("anchor_count", &state.anchors.len())
            .field("admin", &state.admin)
            .finish()
    }
}
