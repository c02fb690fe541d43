//! # creda-cli — CLI Tool for the Creda Stack
//!
//! Provides the `creda` command-line interface.
//!
//! ## Subcommands
//!
//! - `creda tree` — Merkle tree operations on leaf files: root
//!   computation, proof generation, proof verification.
//! - `creda demo` — End-to-end anchoring scenario against in-memory
//!   registries: issue a batch, verify, revoke, re-verify, and walk an
//!   identifier through its lifecycle.

pub mod demo;
pub mod tree;
