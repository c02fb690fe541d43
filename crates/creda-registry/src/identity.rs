//! # Identifier Record State Machine
//!
//! One record per 32-byte identifier: controlling account, document
//! pointer (an opaque CID string), and status. Identifiers are derived
//! deterministically from the controller and a per-controller sequence
//! number, so no global counter is needed for uniqueness.
//!
//! ## States
//!
//! ```text
//! (create) ──▶ Active ──▶ Revoked (terminal)
//! ```
//!
//! Only the controller may mutate a record, the document pointer may
//! change only while Active, and revocation is one-way.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use creda_core::{AccountId, Hash32};

use crate::event::{EventSink, RegistryEvent, TracingSink};

/// Domain-separation prefix for identifier derivation, keeping derived
/// identifiers disjoint from credential and node digests.
const DID_ID_DOMAIN: u8 = 0x02;

/// Derive the identifier for a controller's next record:
/// `SHA256(0x02 || controller || sequence_be)`.
fn derive_id(controller: &AccountId, sequence: u64) -> Hash32 {
    let mut input = [0u8; 41];
    input[0] = DID_ID_DOMAIN;
    input[1..33].copy_from_slice(controller.as_hash().as_bytes());
    input[33..].copy_from_slice(&sequence.to_be_bytes());
    Hash32::digest_raw(&input)
}

// ── Status and record ────────────────────────────────────────────────

/// Lifecycle status of an identifier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DidStatus {
    /// The record is live and mutable by its controller.
    Active,
    /// The record has been revoked. Terminal state.
    Revoked,
}

impl DidStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Revoked => "REVOKED",
        }
    }

    /// Whether further mutation is allowed.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for DidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidRecord {
    /// The account that owns and may mutate this record.
    pub controller: AccountId,
    /// Opaque document pointer. No format imposed here.
    pub cid: String,
    /// Current lifecycle status.
    pub status: DidStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

// ── Errors ───────────────────────────────────────────────────────────

/// Errors from identifier registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DidError {
    /// No record exists for the identifier.
    #[error("identifier {0} is not registered")]
    NotFound(Hash32),

    /// The caller is not the record's controller.
    #[error("account {caller} does not control identifier {id}")]
    NotController {
        /// The identifier whose record was addressed.
        id: Hash32,
        /// The rejected caller.
        caller: AccountId,
    },

    /// The record is revoked; no further mutation is possible.
    #[error("identifier {0} is revoked")]
    AlreadyRevoked(Hash32),

    /// The derived identifier already exists. Practically negligible with
    /// a 256-bit derivation, but handled rather than assumed away.
    #[error("derived identifier {0} already exists")]
    CollisionDetected(Hash32),
}

// ── DidRegistry ──────────────────────────────────────────────────────

/// The identifier registry.
///
/// Owns its state exclusively; wrap in [`crate::Shared`] to serialize
/// concurrent callers.
pub struct DidRegistry {
    records: BTreeMap<Hash32, DidRecord>,
    /// Per-controller sequence numbers for identifier derivation.
    sequences: BTreeMap<AccountId, u64>,
    /// Append-only reverse index: controller to owned identifiers.
    owned: BTreeMap<AccountId, Vec<Hash32>>,
    events: Box<dyn EventSink>,
}

impl DidRegistry {
    /// An empty registry publishing events through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(TracingSink))
    }

    /// An empty registry publishing events through the given sink.
    pub fn with_sink(events: Box<dyn EventSink>) -> Self {
        Self {
            records: BTreeMap::new(),
            sequences: BTreeMap::new(),
            owned: BTreeMap::new(),
            events,
        }
    }

    /// Create a new identifier record for a controller.
    ///
    /// The identifier is derived from the controller and its current
    /// sequence number; the sequence is incremented on success only.
    ///
    /// # Errors
    ///
    /// [`DidError::CollisionDetected`] if the derived identifier already
    /// exists. State is unchanged in that case.
    pub fn create(
        &mut self,
        controller: AccountId,
        cid: impl Into<String>,
    ) -> Result<Hash32, DidError> {
        let sequence = self.sequences.get(&controller).copied().unwrap_or(0);
        let id = derive_id(&controller, sequence);
        if self.records.contains_key(&id) {
            return Err(DidError::CollisionDetected(id));
        }

        let cid = cid.into();
        let now = Utc::now();
        self.records.insert(
            id,
            DidRecord {
                controller,
                cid: cid.clone(),
                status: DidStatus::Active,
                created_at: now,
                updated_at: now,
            },
        );
        self.sequences.insert(controller, sequence + 1);
        self.owned.entry(controller).or_default().push(id);
        self.events.publish(RegistryEvent::DidRegistered {
            id,
            controller,
            cid,
        });
        Ok(id)
    }

    /// Replace the document pointer of an active record.
    ///
    /// # Errors
    ///
    /// [`DidError::NotFound`] if absent, [`DidError::NotController`] if
    /// the caller does not control the record, [`DidError::AlreadyRevoked`]
    /// if the record is no longer active.
    pub fn update(
        &mut self,
        id: Hash32,
        new_cid: impl Into<String>,
        caller: AccountId,
    ) -> Result<(), DidError> {
        let record = self.active_record_mut(id, caller)?;
        let new_cid = new_cid.into();
        record.cid = new_cid.clone();
        record.updated_at = Utc::now();
        self.events.publish(RegistryEvent::DidUpdated { id, cid: new_cid });
        Ok(())
    }

    /// Revoke an identifier. One-way; the record stays resolvable.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`DidRegistry::update`].
    pub fn revoke(&mut self, id: Hash32, caller: AccountId) -> Result<(), DidError> {
        let record = self.active_record_mut(id, caller)?;
        record.status = DidStatus::Revoked;
        record.updated_at = Utc::now();
        self.events.publish(RegistryEvent::DidRevoked { id });
        Ok(())
    }

    /// Look up a record. Read-only; revoked records remain resolvable.
    ///
    /// # Errors
    ///
    /// [`DidError::NotFound`] if no record exists.
    pub fn resolve(&self, id: &Hash32) -> Result<&DidRecord, DidError> {
        self.records.get(id).ok_or(DidError::NotFound(*id))
    }

    /// All identifiers owned by a controller, in creation order. Total;
    /// an unknown controller owns nothing.
    pub fn list_owned(&self, controller: &AccountId) -> &[Hash32] {
        self.owned
            .get(controller)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered identifiers.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Shared guard path for mutations: the record must exist, belong to
    /// the caller, and still be active.
    fn active_record_mut(
        &mut self,
        id: Hash32,
        caller: AccountId,
    ) -> Result<&mut DidRecord, DidError> {
        let record = self.records.get_mut(&id).ok_or(DidError::NotFound(id))?;
        if record.controller != caller {
            return Err(DidError::NotController { id, caller });
        }
        if !record.status.is_active() {
            return Err(DidError::AlreadyRevoked(id));
        }
        Ok(record)
    }
}

impl Default for DidRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DidRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DidRegistry")
            .field("records", &self.records.len())
            .field("controllers", &self.sequences.len())
            .finish()
    }
}
