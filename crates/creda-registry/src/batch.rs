//! # Batch Anchoring State Machine
//!
//! Maps published Merkle roots to their issuers and tracks per-leaf
//! revocation. Verification combines proof checking with that state to
//! produce a verdict.
//!
//! ## Invariants
//!
//! - A root, once published, maps to exactly one issuer forever;
//!   republication is rejected.
//! - Revocation is permanent and scoped globally by leaf hash, even
//!   though it is only authorized through the batch's issuer.
//! - Mutating operations fail fast: any precondition violation leaves
//!   state untouched and publishes no event.
//! - Verification never errors; every failure mode folds into
//!   [`Verdict::Invalid`], so untrusted callers can query freely.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use thiserror::Error;

use creda_core::{AccountId, Hash32};
use creda_merkle::{verify_proof, MerkleProof};

use crate::authority::IssuerAuthority;
use crate::event::{EventSink, RegistryEvent, TracingSink};

// ── Errors ───────────────────────────────────────────────────────────

/// Errors from batch registry mutations.
///
/// All variants are non-retryable precondition violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The root has already been published and cannot be reissued.
    #[error("root {0} is already published")]
    DuplicateRoot(Hash32),

    /// No batch has been published under this root.
    #[error("root {0} is not published")]
    UnknownRoot(Hash32),

    /// The caller does not hold the required capability.
    #[error("account {0} is not authorized for this operation")]
    NotAuthorized(AccountId),

    /// The leaf is already revoked; revocation is one-way.
    #[error("leaf {0} is already revoked")]
    AlreadyRevoked(Hash32),
}

// ── Verdict ──────────────────────────────────────────────────────────

/// The outcome of a verification query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The credential is committed under the root, the root is
    /// published, and the leaf is not revoked.
    Valid {
        /// The issuer recorded for the root.
        issuer: AccountId,
    },
    /// Revoked, unknown root, or failed proof. The verdict deliberately
    /// does not say which.
    Invalid,
}

impl Verdict {
    /// Whether the credential verified.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    /// The recorded issuer, when valid.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Verdict::Valid { issuer } => Some(issuer),
            Verdict::Invalid => None,
        }
    }
}

// ── BatchRegistry ────────────────────────────────────────────────────

/// The batch anchoring registry.
///
/// Owns its state exclusively; wrap in [`crate::Shared`] to serialize
/// concurrent callers.
pub struct BatchRegistry {
    /// Published roots and their issuers. Write-once per root.
    batches: BTreeMap<Hash32, AccountId>,
    /// Revoked leaves. Insert-only.
    revoked: BTreeSet<Hash32>,
    events: Box<dyn EventSink>,
}

impl BatchRegistry {
    /// An empty registry publishing events through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(TracingSink))
    }

    /// An empty registry publishing events through the given sink.
    pub fn with_sink(events: Box<dyn EventSink>) -> Self {
        Self {
            batches: BTreeMap::new(),
            revoked: BTreeSet::new(),
            events,
        }
    }

    /// Publish a batch root on behalf of an issuer.
    ///
    /// # Errors
    ///
    /// [`BatchError::NotAuthorized`] if the authority collaborator does
    /// not recognize the issuer capability, [`BatchError::DuplicateRoot`]
    /// if the root is already published. The original mapping is
    /// untouched in the duplicate case.
    pub fn issue_batch(
        &mut self,
        root: Hash32,
        issuer: AccountId,
        authority: &dyn IssuerAuthority,
    ) -> Result<(), BatchError> {
        if !authority.is_issuer(&issuer) {
            return Err(BatchError::NotAuthorized(issuer));
        }
        if self.batches.contains_key(&root) {
            return Err(BatchError::DuplicateRoot(root));
        }

        self.batches.insert(root, issuer);
        self.events.publish(RegistryEvent::BatchIssued { root, issuer });
        Ok(())
    }

    /// Revoke one credential leaf under a published root.
    ///
    /// # Errors
    ///
    /// [`BatchError::UnknownRoot`] if the root has no recorded issuer,
    /// [`BatchError::NotAuthorized`] if the caller is not that issuer,
    /// [`BatchError::AlreadyRevoked`] if the leaf is already revoked.
    pub fn revoke_credential(
        &mut self,
        leaf: Hash32,
        root: Hash32,
        caller: AccountId,
    ) -> Result<(), BatchError> {
        let issuer = *self
            .batches
            .get(&root)
            .ok_or(BatchError::UnknownRoot(root))?;
        if caller != issuer {
            return Err(BatchError::NotAuthorized(caller));
        }
        if self.revoked.contains(&leaf) {
            return Err(BatchError::AlreadyRevoked(leaf));
        }

        self.revoked.insert(leaf);
        self.events.publish(RegistryEvent::CredentialRevoked {
            leaf,
            root,
            issuer,
        });
        Ok(())
    }

    /// Verify a credential leaf against a published root.
    ///
    /// Pure query; never errors and never mutates. The checks
    /// short-circuit in a fixed order, revocation first, so a revoked
    /// credential is invalid even when accompanied by a perfectly valid
    /// proof:
    ///
    /// 1. leaf revoked, then
    /// 2. root unpublished, then
    /// 3. Merkle proof verification.
    pub fn verify_credential(
        &self,
        leaf: &Hash32,
        root: &Hash32,
        proof: &MerkleProof,
    ) -> Verdict {
        if self.revoked.contains(leaf) {
            return Verdict::Invalid;
        }
        let Some(issuer) = self.batches.get(root) else {
            return Verdict::Invalid;
        };
        if !verify_proof(leaf, root, proof) {
            return Verdict::Invalid;
        }
        Verdict::Valid { issuer: *issuer }
    }

    /// The issuer recorded for a root, if published.
    pub fn issuer_of(&self, root: &Hash32) -> Option<&AccountId> {
        self.batches.get(root)
    }

    /// Whether a leaf has been revoked.
    pub fn is_revoked(&self, leaf: &Hash32) -> bool {
        self.revoked.contains(leaf)
    }

    /// Number of published roots.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Number of revoked leaves.
    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }
}

impl Default for BatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRegistry")
            .field("batches", &self.batches.len())
            .field("revoked", &self.revoked.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{OpenAuthority, StaticAuthority};
    use crate::event::MemorySink;
    use creda_merkle::MerkleTree;

    fn h(i: usize) -> Hash32 {
        Hash32::digest_raw(format!("credential-{i}").as_bytes())
    }

    fn issuer() -> AccountId {
        AccountId::from_seed("issuer-alpha")
    }

    fn granted_authority() -> StaticAuthority {
        let mut authority = StaticAuthority::new();
        authority.grant(issuer());
        authority
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let tree = MerkleTree::build(&(1..=4).map(h).collect::<Vec<_>>()).unwrap();
        let root = tree.root();

        let mut registry = BatchRegistry::new();
        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();

        let proof = tree.proof_for(&h(2)).unwrap();
        let verdict = registry.verify_credential(&h(2), &root, &proof);
        assert!(verdict.is_valid());
        assert_eq!(verdict.issuer(), Some(&issuer()));
    }

    #[test]
    fn issue_requires_capability() {
        let mut registry = BatchRegistry::new();
        let unauthorized = AccountId::from_seed("issuer-beta");
        let err = registry
            .issue_batch(h(1), unauthorized, &granted_authority())
            .unwrap_err();
        assert_eq!(err, BatchError::NotAuthorized(unauthorized));
        assert_eq!(registry.batch_count(), 0);
    }

    #[test]
    fn duplicate_root_rejected_mapping_unchanged() {
        let mut authority = granted_authority();
        let beta = AccountId::from_seed("issuer-beta");
        authority.grant(beta);

        let root = h(1);
        let mut registry = BatchRegistry::new();
        registry.issue_batch(root, issuer(), &authority).unwrap();

        let err = registry.issue_batch(root, beta, &authority).unwrap_err();
        assert_eq!(err, BatchError::DuplicateRoot(root));
        // The original issuer mapping survives.
        assert_eq!(registry.issuer_of(&root), Some(&issuer()));
    }

    #[test]
    fn revoke_requires_recorded_issuer() {
        let mut registry = BatchRegistry::new();
        let err = registry
            .revoke_credential(h(1), h(9), issuer())
            .unwrap_err();
        assert_eq!(err, BatchError::UnknownRoot(h(9)));
    }

    #[test]
    fn revoke_rejects_other_callers() {
        let root = h(1);
        let mut registry = BatchRegistry::new();
        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();

        let intruder = AccountId::from_seed("issuer-beta");
        let err = registry
            .revoke_credential(h(2), root, intruder)
            .unwrap_err();
        assert_eq!(err, BatchError::NotAuthorized(intruder));
        assert!(!registry.is_revoked(&h(2)));
    }

    #[test]
    fn revoke_is_one_way() {
        let root = h(1);
        let mut registry = BatchRegistry::new();
        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();

        registry.revoke_credential(h(2), root, issuer()).unwrap();
        let err = registry
            .revoke_credential(h(2), root, issuer())
            .unwrap_err();
        assert_eq!(err, BatchError::AlreadyRevoked(h(2)));
        assert_eq!(registry.revoked_count(), 1);
    }

    #[test]
    fn revocation_dominates_proof_validity() {
        let tree = MerkleTree::build(&(1..=4).map(h).collect::<Vec<_>>()).unwrap();
        let root = tree.root();
        let proof = tree.proof_for(&h(3)).unwrap();

        let mut registry = BatchRegistry::new();
        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();
        assert!(registry.verify_credential(&h(3), &root, &proof).is_valid());

        registry.revoke_credential(h(3), root, issuer()).unwrap();
        // Same leaf, same valid proof, now invalid.
        assert_eq!(
            registry.verify_credential(&h(3), &root, &proof),
            Verdict::Invalid
        );
    }

    #[test]
    fn verify_unknown_root_is_invalid() {
        let registry = BatchRegistry::new();
        let verdict = registry.verify_credential(&h(1), &h(9), &MerkleProof::empty());
        assert_eq!(verdict, Verdict::Invalid);
        assert_eq!(verdict.issuer(), None);
    }

    #[test]
    fn verify_bad_proof_is_invalid() {
        let tree = MerkleTree::build(&(1..=4).map(h).collect::<Vec<_>>()).unwrap();
        let root = tree.root();

        let mut registry = BatchRegistry::new();
        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();

        // A leaf never committed, with an empty proof.
        assert_eq!(
            registry.verify_credential(&h(9), &root, &MerkleProof::empty()),
            Verdict::Invalid
        );
    }

    #[test]
    fn revocation_is_global_by_leaf_across_roots() {
        // The same leaf committed in two batches: revoking it under one
        // root invalidates it under the other as well.
        let tree_a = MerkleTree::build(&[h(1), h(2)]).unwrap();
        let tree_b = MerkleTree::build(&[h(1), h(3)]).unwrap();

        let mut registry = BatchRegistry::new();
        let authority = OpenAuthority;
        registry.issue_batch(tree_a.root(), issuer(), &authority).unwrap();
        registry.issue_batch(tree_b.root(), issuer(), &authority).unwrap();

        registry
            .revoke_credential(h(1), tree_a.root(), issuer())
            .unwrap();

        let proof_b = tree_b.proof_for(&h(1)).unwrap();
        assert_eq!(
            registry.verify_credential(&h(1), &tree_b.root(), &proof_b),
            Verdict::Invalid
        );
    }

    #[test]
    fn events_published_on_success_only() {
        let sink = MemorySink::new();
        let mut registry = BatchRegistry::with_sink(Box::new(sink.clone()));
        let root = h(1);

        registry
            .issue_batch(root, issuer(), &granted_authority())
            .unwrap();
        // Failed duplicate publishes nothing.
        let _ = registry.issue_batch(root, issuer(), &granted_authority());
        registry.revoke_credential(h(2), root, issuer()).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            RegistryEvent::BatchIssued {
                root,
                issuer: issuer()
            }
        );
        assert_eq!(
            events[1],
            RegistryEvent::CredentialRevoked {
                leaf: h(2),
                root,
                issuer: issuer()
            }
        );
    }
}
