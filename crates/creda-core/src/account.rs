//! # Account and DID Newtypes
//!
//! Domain-primitive newtypes for the identities that interact with the
//! registries. An [`AccountId`] is the opaque identity token presented by
//! callers (issuers, controllers, verifiers); a [`Did`] is the W3C string
//! form under which a registry identifier is presented to the outside
//! world.
//!
//! ## Validation
//!
//! [`Did`] validates format at construction time and on deserialization.
//! [`AccountId`] is a fixed-width byte value, valid by construction.

use serde::{Deserialize, Serialize};

use crate::digest::Hash32;
use crate::error::ValidationError;

/// Implements `Deserialize` for string newtypes that must validate their
/// contents: deserialize a plain `String`, then route through `new()` so
/// invalid values are rejected at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// The opaque 32-byte identity token of a caller.
///
/// Whoever authenticated the caller (wallet, session layer, key registry)
/// is an external collaborator; the registries only compare these tokens
/// for equality and look them up in capability sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(Hash32);

impl AccountId {
    /// Wrap an existing 32-byte value.
    pub const fn from_hash(hash: Hash32) -> Self {
        Self(hash)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        Hash32::from_hex(hex).map(Self)
    }

    /// Derive an account identifier from a human-readable seed label.
    ///
    /// Intended for demos and tests where no real key infrastructure is
    /// wired in: the token is the SHA-256 of the label bytes.
    pub fn from_seed(label: &str) -> Self {
        Self(Hash32::digest_raw(label.as_bytes()))
    }

    /// Access the underlying 32-byte value.
    pub fn as_hash(&self) -> &Hash32 {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Did
// ---------------------------------------------------------------------------

/// W3C Decentralized Identifier string form.
///
/// Format: `did:<method>:<method-specific-id>` where the method is
/// lowercase alphanumeric and the method-specific id is non-empty.
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl_validating_deserialize!(Did);

/// The DID method under which registry identifiers are presented.
pub const DID_METHOD: &str = "creda";

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Present a 32-byte registry identifier in DID string form:
    /// `did:creda:<hex>`.
    pub fn from_registry_id(id: &Hash32) -> Self {
        Self(format!("did:{DID_METHOD}:{}", id.to_hex()))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };
        let Some((method, identifier)) = rest.split_once(':') else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };
        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        if identifier.is_empty() {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        self.0[4..].split(':').next().unwrap_or_default()
    }

    /// The method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        match self.0[4..].split_once(':') {
            Some((_, id)) => id,
            None => "",
        }
    }

    /// Parse the method-specific identifier back into a registry id.
    ///
    /// # Errors
    ///
    /// Fails when the method-specific identifier is not 64 hex characters.
    pub fn registry_id(&self) -> Result<Hash32, ValidationError> {
        Hash32::from_hex(self.method_specific_id())
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
