//! # Registry Event Notifications
//!
//! Replaces the source system's on-chain log emission with an explicit
//! collaborator interface. A sink is handed to each registry at
//! construction; every successful mutation publishes exactly one event.
//! Failed operations publish nothing.

use serde::Serialize;
use std::sync::Arc;

use creda_core::{AccountId, Hash32};

/// A notification emitted by a registry after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A batch root was published.
    BatchIssued {
        /// The Merkle root that was anchored.
        root: Hash32,
        /// The issuer now recorded for the root.
        issuer: AccountId,
    },
    /// A credential leaf was revoked under a batch root.
    CredentialRevoked {
        /// The revoked leaf.
        leaf: Hash32,
        /// The root the revocation was authorized through.
        root: Hash32,
        /// The issuer who revoked.
        issuer: AccountId,
    },
    /// A new identifier record was created.
    DidRegistered {
        /// The derived identifier.
        id: Hash32,
        /// The controlling account.
        controller: AccountId,
        /// The document pointer.
        cid: String,
    },
    /// An identifier's document pointer was replaced.
    DidUpdated {
        /// The identifier.
        id: Hash32,
        /// The new document pointer.
        cid: String,
    },
    /// An identifier was revoked.
    DidRevoked {
        /// The identifier.
        id: Hash32,
    },
}

/// Receives registry notifications.
///
/// Implementations must be cheap and must not fail; a sink is an
/// observability boundary, not a transactional participant.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: RegistryEvent);
}

/// The default sink: structured `tracing` events at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: RegistryEvent) {
        match &event {
            RegistryEvent::BatchIssued { root, issuer } => {
                tracing::info!(%root, %issuer, "batch issued");
            }
            RegistryEvent::CredentialRevoked { leaf, root, issuer } => {
                tracing::info!(%leaf, %root, %issuer, "credential revoked");
            }
            RegistryEvent::DidRegistered { id, controller, cid } => {
                tracing::info!(%id, %controller, %cid, "did registered");
            }
            RegistryEvent::DidUpdated { id, cid } => {
                tracing::info!(%id, %cid, "did updated");
            }
            RegistryEvent::DidRevoked { id } => {
                tracing::info!(%id, "did revoked");
            }
        }
    }
}

/// A recording sink for tests: appends every event to a shared buffer.
///
/// Clones share the same buffer, so a test can keep one handle and move
/// another into the registry.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<parking_lot::Mutex<Vec<RegistryEvent>>>,
}

impl MemorySink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events published so far, in order.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.buffer.lock().clone()
    }

    /// Number of events published so far.
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Whether no events have been published.
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: RegistryEvent) {
        self.buffer.lock().push(event);
    }
}
