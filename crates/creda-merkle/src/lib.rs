//! # creda-merkle — Batch Commitment Trees
//!
//! The pure algorithmic kernel of the Creda Stack: building a Merkle tree
//! over a batch of credential digests, computing the root that gets
//! published to the registry, and generating/verifying inclusion proofs
//! for individual credentials.
//!
//! ## Algorithm
//!
//! Interior nodes use sorted-pair SHA-256:
//! `node = SHA256(min(a, b) || max(a, b))`. Sorting the operands makes
//! sibling order irrelevant, so a proof is just the ordered sequence of
//! sibling hashes with no left/right annotations.
//!
//! Odd-length levels promote the unpaired last node to the next level
//! unchanged. The same rule is applied during construction, proof
//! generation, and verification; a promoted node contributes no sibling
//! at the level it skips.
//!
//! ## Determinism
//!
//! Building from the same leaf sequence (same order) always produces the
//! same root. Verification is pure and total: it never fails, it returns
//! `false` for any mismatch, including an empty or malformed proof.

pub mod error;
pub mod proof;
pub mod tree;

pub use error::MerkleError;
pub use proof::{verify_proof, MerkleProof};
pub use tree::MerkleTree;
