//! # Inclusion proofs and verification
//!
//! A [`MerkleProof`] is the ordered sequence of sibling hashes from leaf
//! to root. Because interior hashing sorts its operands, the proof
//! carries no left/right annotations; verification is a single fold.
//!
//! [`verify_proof`] is pure and total. It never fails: any mismatch,
//! including an empty or truncated proof, folds into `false`. This makes
//! it safe to expose to untrusted callers.

use serde::{Deserialize, Serialize};

use creda_core::Hash32;

use crate::tree::hash_pair;

/// An inclusion proof: sibling hashes ordered from leaf level upward.
///
/// Serializes as a JSON array of 64-character hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof(Vec<Hash32>);

impl MerkleProof {
    /// Wrap an ordered sibling sequence.
    pub fn new(siblings: Vec<Hash32>) -> Self {
        Self(siblings)
    }

    /// An empty proof. Valid only for a single-leaf tree, where the leaf
    /// is the root.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The sibling hashes, leaf level first.
    pub fn siblings(&self) -> &[Hash32] {
        &self.0
    }

    /// Number of siblings in the proof.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof carries no siblings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Hash32>> for MerkleProof {
    fn from(siblings: Vec<Hash32>) -> Self {
        Self(siblings)
    }
}

/// Verify an inclusion proof against a claimed root.
///
/// Folds the sorted-pair hash up the path: at each step the running hash
/// is combined with the next sibling, and the final value is compared to
/// `root`. No side effects, no errors; returns `false` on any mismatch.
pub fn verify_proof(leaf: &Hash32, root: &Hash32, proof: &MerkleProof) -> bool {
    let mut current = *leaf;
    for sibling in proof.siblings() {
        current = hash_pair(&current, sibling);
    }
    current == *root
}
