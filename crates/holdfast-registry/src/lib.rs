//! # holdfast-registry — Append-Only Anchor Registry
//!
//! Anchors references to external digital assets (a content hash plus an
//! optional metadata locator) into an immutable, append-only registry.
//! Records can be cross-linked symmetrically and marked verified exactly
//! once by the single admin identity.
//!
//! - **Registry** ([`registry`]): the [`AnchorRegistry`] aggregate with
//!   every operation (create, link, verify, admin handover, and the read
//!   surface). One `RwLock` per instance makes each operation an
//!   all-or-nothing transaction.
//!
//! - **Records** ([`anchor`]): the [`AnchorRecord`] snapshot type.
//!
//! - **Events** ([`event`]): structured notifications for external
//!   indexers, with [`NullSink`], [`MemorySink`], and [`TracingSink`]
//!   implementations of [`EventSink`].
//!
//! - **Clock** ([`clock`]): the external time source seam.
//!
//! The registry trusts its collaborators for everything it does not do
//! itself: callers arrive pre-authenticated, timestamps come from the
//! [`Clock`], and event delivery beyond the sink is the embedder's
//! concern. Asset content is never stored or fetched, and the binding
//! between a hash and its content is never verified.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use holdfast_core::PartyId;
//! use holdfast_registry::{AnchorRegistry, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = AnchorRegistry::with_collaborators(
//!     PartyId::new("admin").unwrap(),
//!     sink.clone(),
//!     Arc::new(holdfast_registry::SystemClock),
//! );
//!
//! let alice = PartyId::new("alice").unwrap();
//! let a = registry.create_anchor("sha256:aa", "ipfs://QmA", &alice).unwrap();
//! let b = registry.create_anchor("sha256:bb", "", &alice).unwrap();
//! registry.link_anchors(a, b, &alice).unwrap();
//!
//! assert_eq!(registry.get_anchor(a).unwrap().linked_anchors, vec![b]);
//! assert_eq!(sink.drain().len(), 4); // two creations + one link per direction
//! ```

pub mod anchor;
pub mod clock;
pub mod event;
pub mod registry;

// Re-export primary types.
pub use anchor::AnchorRecord;
pub use clock::{Clock, FixedClock, SystemClock};
pub use event::{EventEnvelope, EventSink, MemorySink, NullSink, RegistryEvent, TracingSink};
pub use registry::{AnchorRegistry, RegistryError};
