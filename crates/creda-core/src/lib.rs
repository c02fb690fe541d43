//! # creda-core — Foundational Types for the Creda Stack
//!
//! This crate is the bedrock of the Creda Stack. It defines the type-system
//! primitives shared by every other crate in the workspace; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`Hash32`], [`AccountId`],
//!    [`Did`]. No bare strings or byte slices for identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** All credential digest computation flows
//!    through [`CanonicalBytes::new()`]. No raw `serde_json::to_vec()` for
//!    digest input, ever.
//!
//! 3. **One digest primitive.** SHA-256 on every side of the protocol.
//!    [`sha256_hash32()`] accepts only `&CanonicalBytes`, enforcing the
//!    canonicalization pipeline at compile time.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `creda-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod account;
pub mod canonical;
pub mod digest;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use account::{AccountId, Did};
pub use canonical::CanonicalBytes;
pub use digest::{sha256_hash32, Hash32};
pub use error::{CanonicalizationError, ValidationError};
