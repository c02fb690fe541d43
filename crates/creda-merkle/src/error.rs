//! Error types for tree construction and proof generation.
//!
//! Verification has no error type: `verify_proof` is total and folds
//! every failure mode into `false`.

use thiserror::Error;

use creda_core::Hash32;

/// Errors from Merkle tree construction and proof generation.
///
/// All variants are non-retryable precondition violations; the caller
/// must change inputs rather than retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree cannot be built over zero leaves.
    #[error("cannot build a tree over an empty leaf set")]
    EmptyLeafSet,

    /// The requested leaf is not present in the tree.
    #[error("leaf {0} is not present in the tree")]
    LeafNotFound(Hash32),

    /// The requested leaf value occurs more than once; proof generation
    /// by value is ambiguous. Use `proof_for_index` instead.
    #[error("leaf {leaf} occurs {count} times; select an occurrence by index")]
    AmbiguousLeaf {
        /// The duplicated leaf value.
        leaf: Hash32,
        /// How many times it occurs.
        count: usize,
    },

    /// A leaf index beyond the number of leaves in the tree.
    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of leaves in the tree.
        leaf_count: usize,
    },
}
