//! # Batch assembly
//!
//! Collects credential documents, hashes them in insertion order, and
//! builds the Merkle commitment whose root gets published to the batch
//! registry. Duplicate digests are rejected here so that every committed
//! leaf has an unambiguous inclusion proof.

use std::collections::BTreeSet;

use creda_core::Hash32;
use creda_merkle::{MerkleProof, MerkleTree};

use crate::credential::{CredentialDocument, VcError};

/// An ordered set of credential documents awaiting commitment.
#[derive(Debug, Clone, Default)]
pub struct CredentialBatch {
    documents: Vec<CredentialDocument>,
}

impl CredentialBatch {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document. Order is significant: it determines leaf
    /// positions in the committed tree.
    pub fn push(&mut self, document: CredentialDocument) {
        self.documents.push(document);
    }

    /// The documents in insertion order.
    pub fn documents(&self) -> &[CredentialDocument] {
        &self.documents
    }

    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Hash every document and build the Merkle commitment.
    ///
    /// # Errors
    ///
    /// [`VcError::EmptyBatch`] for an empty batch,
    /// [`VcError::DuplicateCredential`] if two documents hash to the
    /// same leaf, [`VcError::Canonicalization`] if a document cannot be
    /// canonicalized.
    pub fn commit(&self) -> Result<BatchCommitment, VcError> {
        if self.documents.is_empty() {
            return Err(VcError::EmptyBatch);
        }

        let mut leaves = Vec::with_capacity(self.documents.len());
        let mut seen = BTreeSet::new();
        for document in &self.documents {
            let leaf = document.leaf_digest()?;
            if !seen.insert(leaf) {
                return Err(VcError::DuplicateCredential(leaf));
            }
            leaves.push(leaf);
        }

        let tree = MerkleTree::build(&leaves)?;
        Ok(BatchCommitment { leaves, tree })
    }
}

/// A committed batch: the ordered leaves and the tree built over them.
///
/// The root is the only value that leaves the issuer's side; proofs are
/// generated on demand for individual credentials.
#[derive(Debug, Clone)]
pub struct BatchCommitment {
    leaves: Vec<Hash32>,
    tree: MerkleTree,
}

impl BatchCommitment {
    /// The root to publish.
    pub fn root(&self) -> Hash32 {
        self.tree.root()
    }

    /// The committed leaves in document order.
    pub fn leaves(&self) -> &[Hash32] {
        &self.leaves
    }

    /// Inclusion proof for the document at a batch position.
    pub fn proof_for_index(&self, index: usize) -> Result<MerkleProof, VcError> {
        Ok(self.tree.proof_for_index(index)?)
    }

    /// Inclusion proof for a leaf digest. Unambiguous because duplicate
    /// digests were rejected at commit time.
    pub fn proof_for_leaf(&self, leaf: &Hash32) -> Result<MerkleProof, VcError> {
        Ok(self.tree.proof_for(leaf)?)
    }
}
