//! # Error Types
//!
//! Structured error hierarchy for the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Registry- and tree-specific errors live in their own crates; this
//! module covers only construction-time validation.

use thiserror::Error;

/// Error validating a domain-primitive value at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A hex string contained non-hex characters.
    #[error("invalid hex value: {0}")]
    InvalidHex(String),

    /// A fixed-width value had the wrong length.
    #[error("invalid length: expected {expected} characters, got {actual}")]
    InvalidLength {
        /// The required length.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A DID string did not match `did:method:identifier` syntax.
    #[error("invalid DID: {0}")]
    InvalidDid(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts and counters must be strings or integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
