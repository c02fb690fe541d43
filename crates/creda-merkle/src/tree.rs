//! # Tree construction and proof generation
//!
//! A [`MerkleTree`] is built once from an ordered leaf sequence and is
//! immutable afterwards. Level 0 holds the leaves in input order; each
//! higher level holds the sorted-pair hashes of the level below; the
//! final level is the single root.
//!
//! ## Invariants
//!
//! - Every node at level k+1 is `SHA256(min(a, b) || max(a, b))` of two
//!   nodes at level k, except promoted nodes.
//! - An odd-length level promotes its unpaired last node to the next
//!   level unchanged. Proof generation and verification apply the same
//!   rule, so a promoted node simply contributes no sibling at the level
//!   it skips.
//! - Pairing is positional, hashing within a pair is order-independent.
//!   Same input sequence, same root.

use creda_core::Hash32;

use crate::error::MerkleError;
use crate::proof::MerkleProof;

// ---------------------------------------------------------------------------
// Core hashing (sorted-pair SHA-256)
// ---------------------------------------------------------------------------

/// Compute an interior node hash: `SHA256(min(a, b) || max(a, b))`.
///
/// Sorting the operands makes the combination commutative, which keeps
/// proofs free of left/right annotations.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(lo.as_bytes());
    input[32..].copy_from_slice(hi.as_bytes());
    Hash32::digest_raw(&input)
}

// ---------------------------------------------------------------------------
// MerkleTree
// ---------------------------------------------------------------------------

/// A Merkle tree over a batch of credential digests.
///
/// Stores every level so that proof generation is a walk rather than a
/// recomputation. Batches are bounded by what an issuer anchors at once,
/// so the O(2n) node storage is not a concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// levels[0] = leaves in input order; last level = single root.
    levels: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    /// Build a tree from a non-empty leaf sequence.
    ///
    /// Duplicate leaf values are permitted here; value-addressed proof
    /// generation will refuse them as ambiguous (see
    /// [`MerkleTree::proof_for`]).
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::EmptyLeafSet`] for an empty input.
    pub fn build(leaves: &[Hash32]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyLeafSet);
        }

        let mut levels = vec![leaves.to_vec()];
        while levels[levels.len() - 1].len() > 1 {
            let cur = &levels[levels.len() - 1];
            let mut next = Vec::with_capacity(cur.len().div_ceil(2));
            for pair in cur.chunks(2) {
                match pair {
                    [a, b] => next.push(hash_pair(a, b)),
                    // Odd level: promote the unpaired node unchanged.
                    [a] => next.push(*a),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                }
            }
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// The root: the single node of the top level.
    pub fn root(&self) -> Hash32 {
        self.levels[self.levels.len() - 1][0]
    }

    /// The leaves in input order.
    pub fn leaves(&self) -> &[Hash32] {
        &self.levels[0]
    }

    /// Number of leaves committed in this tree.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels, leaves included. A single-leaf tree has depth 1.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Generate an inclusion proof for a leaf, addressed by value.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::LeafNotFound`] if the value is absent and
    /// [`MerkleError::AmbiguousLeaf`] if it occurs more than once; in the
    /// latter case the caller must disambiguate with
    /// [`MerkleTree::proof_for_index`].
    pub fn proof_for(&self, leaf: &Hash32) -> Result<MerkleProof, MerkleError> {
        let mut occurrences = self.levels[0].iter().enumerate().filter(|(_, l)| *l == leaf);
        let index = match occurrences.next() {
            None => return Err(MerkleError::LeafNotFound(*leaf)),
            Some((i, _)) => i,
        };
        let count = 1 + occurrences.count();
        if count > 1 {
            return Err(MerkleError::AmbiguousLeaf { leaf: *leaf, count });
        }
        self.proof_for_index(index)
    }

    /// Generate an inclusion proof for the leaf at a given index.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::IndexOutOfRange`] if the index is beyond
    /// the leaf count.
    pub fn proof_for_index(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut pos = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let n = level.len();
            if n % 2 == 1 && pos == n - 1 {
                // Promoted node: no sibling at this level, lands after
                // the (n - 1) / 2 pairs of the next level.
                pos = (n - 1) / 2;
            } else {
                siblings.push(level[pos ^ 1]);
                pos /= 2;
            }
        }

        Ok(MerkleProof::new(siblings))
    }
}
