// SPDX-License-Identifier: BUSL-1.1
//! # Registry Events
//!
//! Structured notifications for external indexers and observers. Every
//! successful mutating operation publishes its event(s) inside the same
//! critical section that applied the state change, so sink delivery order
//! always matches state-change order. Linking publishes twice, once per
//! direction, preserving the symmetry of the link for one-directional
//! indexers.
//!
//! Delivery is at-least-once from the registry's point of view; the
//! [`EventEnvelope::event_id`] gives consumers a dedup key.

use chrono::{DateTime, Utc};
use holdfast_core::{AnchorId, AssetHash, PartyId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registry state change, as seen by external observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A new anchor was created.
    AnchorCreated {
        id: AnchorId,
        creator: PartyId,
        asset_hash: AssetHash,
        metadata_uri: String,
    },
    /// One direction of a symmetric link. Every successful link operation
    /// produces two of these, `(from, to)` and `(to, from)`.
    AnchorLinked { from: AnchorId, to: AnchorId },
    /// An anchor was marked verified by the admin.
    AnchorVerified { id: AnchorId, verified_by: PartyId },
    /// The admin role was handed over.
    AdminChanged {
        old_admin: PartyId,
        new_admin: PartyId,
    },
}

/// A published event plus delivery metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id for this emission; consumers dedup on it.
    pub event_id: Uuid,
    /// Registry clock reading at emission.
    pub emitted_at: DateTime<Utc>,
    /// The state change itself.
    pub event: RegistryEvent,
}

/// Consumer of registry notifications.
///
/// `publish` is called while the registry's write lock is held, so
/// implementations must be quick and must never call back into the
/// registry (the lock is not reentrant). Delivery failures are the sink's
/// concern; the registry treats publication as infallible because the
/// state change has already committed by the time the sink sees it.
pub trait EventSink: Send + Sync {
    /// Deliver one event. Called once per notification, in state order.
    fn publish(&self, envelope: EventEnvelope);
}

/// Discards all events. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _envelope: EventEnvelope) {}
}

/// Buffers events in memory, in publication order.
///
/// For tests and for embedders that drain the buffer into their own
/// delivery pipeline.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<EventEnvelope>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all buffered events, oldest first.
    pub fn drain(&self) -> Vec<EventEnvelope> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Copy of the current buffer, oldest first.
    pub fn snapshot(&self) -> Vec<EventEnvelope> {
        self.events.lock().clone()
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, envelope: EventEnvelope) {
        self.events.lock().push(envelope);
    }
}

/// Logs each event as a structured tracing line at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, envelope: EventEnvelope) {
        match &envelope.event {
            RegistryEvent::AnchorCreated {
                id,
                creator,
                asset_hash,
                ..
            } => {
                tracing::info!(
                    event_id = %envelope.event_id,
                    id = %id,
                    creator = %creator,
                    asset_hash = %asset_hash,
                    "anchor created"
                );
            }
            RegistryEvent::AnchorLinked { from, to } => {
                tracing::info!(
                    event_id = %envelope.event_id,
                    from = %from,
                    to = %to,
                    "anchor linked"
                );
            }
            RegistryEvent::AnchorVerified { id, verified_by } => {
                tracing::info!(
                    event_id = %envelope.event_id,
                    id = %id,
                    verified_by = %verified_by,
                    "anchor verified"
                );
            }
            RegistryEvent::AdminChanged {
                old_admin,
                new_admin,
            } => {
                tracing::info!(
                    event_id = %envelope.event_id,
                    old_admin = %old_admin,
                    new_admin = %new_admin,
                    "registry admin changed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(event: RegistryEvent) -> EventEnvelope {
        EventEnvelope {
            event_id: Uuid::new_v4(),
            emitted_at: Utc::now(),
            event,
        }
    }

    fn linked(from: u64, to: u64) -> RegistryEvent {
        RegistryEvent::AnchorLinked {
            from: AnchorId::new(from).unwrap(),
            to: AnchorId::new(to).unwrap(),
        }
    }

    #[test]
    fn memory_sink_preserves_publication_order() {
        let sink = MemorySink::new();
        sink.publish(envelope(linked(1, 2)));
        sink.publish(envelope(linked(2, 1)));

        let events = sink.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, linked(1, 2));
        assert_eq!(events[1].event, linked(2, 1));
    }

    #[test]
    fn memory_sink_drain_empties_buffer() {
        let sink = MemorySink::new();
        sink.publish(envelope(linked(1, 2)));
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.is_empty());
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn event_serde_round_trip() {
        let original = envelope(RegistryEvent::AnchorCreated {
            id: AnchorId::new(3).unwrap(),
            creator: PartyId::new("alice").unwrap(),
            asset_hash: AssetHash::new("sha256:abc").unwrap(),
            metadata_uri: String::new(),
        });
        let json = serde_json::to_string(&original).unwrap();
        let back: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn event_json_is_tagged() {
        let value = serde_json::to_value(envelope(linked(1, 2))).unwrap();
        assert_eq!(value["event"]["type"], "anchor_linked");
        assert_eq!(value["event"]["from"], 1);
        assert_eq!(value["event"]["to"], 2);
    }

    #[test]
    fn null_sink_discards() {
        NullSink.publish(envelope(linked(1, 2)));
    }
}
