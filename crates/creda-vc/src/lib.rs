//! # creda-vc — Credential Documents and Batch Assembly
//!
//! The client-side collaborator of the anchoring protocol. The registry
//! core only ever sees opaque 32-byte digests; this crate is where those
//! digests come from:
//!
//! 1. A [`CredentialDocument`] is a minimal W3C-shaped credential
//!    envelope with an extensible subject.
//! 2. Its [`leaf_digest`](CredentialDocument::leaf_digest) is the
//!    SHA-256 of its JCS-canonical bytes, via
//!    [`CanonicalBytes`](creda_core::CanonicalBytes). Never raw
//!    `serde_json::to_vec` output.
//! 3. A [`CredentialBatch`] hashes an ordered set of documents and
//!    builds the Merkle commitment whose root gets published.
//!
//! Credential signing is out of scope here: signatures and key material
//! belong to the external authorization collaborator.

pub mod batch;
pub mod credential;

pub use batch::{BatchCommitment, CredentialBatch};
pub use credential::{CredentialDocument, VcError, CONTEXT_CREDENTIALS_V1};
