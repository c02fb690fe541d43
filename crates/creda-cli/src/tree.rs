//! # Tree Subcommand
//!
//! Merkle tree operations on leaf files. A leaf file is a JSON array of
//! 64-character hex digests; proofs read and write the same shape.
//!
//! ## Subcommands
//!
//! - `root` — Compute the batch root for a leaf file.
//! - `prove` — Generate the inclusion proof for one leaf.
//! - `verify` — Check a (leaf, root, proof) triple; the exit code
//!   carries the verdict so scripts can branch on it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use creda_core::Hash32;
use creda_merkle::{verify_proof, MerkleProof, MerkleTree};

/// Arguments for the `creda tree` subcommand.
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(subcommand)]
    pub command: TreeCommand,
}

/// Tree subcommands.
#[derive(Subcommand, Debug)]
pub enum TreeCommand {
    /// Compute the Merkle root of a leaf file.
    Root {
        /// Path to a JSON array of hex leaf digests.
        #[arg(long)]
        leaves: PathBuf,
    },

    /// Generate the inclusion proof for a leaf.
    Prove {
        /// Path to a JSON array of hex leaf digests.
        #[arg(long)]
        leaves: PathBuf,
        /// The leaf to prove, as a 64-character hex digest.
        #[arg(long)]
        leaf: String,
    },

    /// Verify a proof against a root. Exit code 0 = valid, 1 = invalid.
    Verify {
        /// The leaf, as a 64-character hex digest.
        #[arg(long)]
        leaf: String,
        /// The claimed root, as a 64-character hex digest.
        #[arg(long)]
        root: String,
        /// Path to the proof: a JSON array of hex sibling digests.
        #[arg(long)]
        proof: PathBuf,
    },
}

/// Execute the `creda tree` subcommand. Returns the process exit code.
pub fn run_tree(args: &TreeArgs) -> Result<u8> {
    match &args.command {
        TreeCommand::Root { leaves } => {
            let leaves = read_leaves(leaves)?;
            let tree = MerkleTree::build(&leaves)?;
            println!("{}", tree.root());
            Ok(0)
        }
        TreeCommand::Prove { leaves, leaf } => {
            let leaves = read_leaves(leaves)?;
            let leaf = parse_hash(leaf)?;
            let tree = MerkleTree::build(&leaves)?;
            let proof = tree.proof_for(&leaf)?;
            println!("{}", serde_json::to_string_pretty(&proof)?);
            Ok(0)
        }
        TreeCommand::Verify { leaf, root, proof } => {
            let leaf = parse_hash(leaf)?;
            let root = parse_hash(root)?;
            let proof = read_proof(proof)?;
            if verify_proof(&leaf, &root, &proof) {
                println!("valid");
                Ok(0)
            } else {
                println!("invalid");
                Ok(1)
            }
        }
    }
}

fn parse_hash(hex: &str) -> Result<Hash32> {
    Hash32::from_hex(hex).with_context(|| format!("invalid digest {hex:?}"))
}

fn read_leaves(path: &Path) -> Result<Vec<Hash32>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading leaf file {}", path.display()))?;
    let leaves: Vec<Hash32> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(leaves)
}

fn read_proof(path: &Path) -> Result<MerkleProof> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading proof file {}", path.display()))?;
    let proof: MerkleProof =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(proof)
}
