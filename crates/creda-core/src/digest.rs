//! # Hash32 — the 32-byte digest value
//!
//! Every leaf, Merkle root, and registry identifier in the stack is a
//! [`Hash32`]: a fixed-width SHA-256 digest. The type is `Copy` and `Ord`
//! so it can serve as a map key and participate in sorted-pair hashing.
//!
//! ## Security Invariant
//!
//! [`sha256_hash32()`] requires [`CanonicalBytes`], not raw `&[u8]`. Every
//! credential digest in the system is therefore produced from properly
//! canonicalized data. Raw-byte hashing exists only as
//! [`Hash32::digest_raw()`] for protocol-internal inputs (node pairs,
//! identifier derivation) that are fixed-width by construction.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::ValidationError;

/// A 32-byte SHA-256 digest value.
///
/// Serializes as a 64-character lowercase hex string; deserialization
/// routes through [`Hash32::from_hex()`] so malformed values are rejected
/// at the boundary rather than silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string (case-insensitive, no prefix).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLength`] if the input is not
    /// exactly 64 characters, [`ValidationError::InvalidHex`] if any
    /// character is not a hex digit.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let hex = hex.trim();
        if hex.len() != 64 {
            return Err(ValidationError::InvalidLength {
                expected: 64,
                actual: hex.len(),
            });
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk)
                .map_err(|_| ValidationError::InvalidHex(hex.to_string()))?;
            out[i] = u8::from_str_radix(s, 16)
                .map_err(|_| ValidationError::InvalidHex(hex.to_string()))?;
        }
        Ok(Self(out))
    }

    /// Compute the SHA-256 digest of raw bytes.
    ///
    /// Reserved for protocol-internal fixed-width inputs. Credential
    /// documents must go through [`sha256_hash32()`] instead.
    pub fn digest_raw(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Self(out)
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Hash32 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Compute a SHA-256 digest from canonical bytes.
///
/// This is the sanctioned digest path for credential documents. The
/// signature accepts only `&CanonicalBytes`, so every document digest in
/// the stack is computed over RFC 8785 canonical JSON.
pub fn sha256_hash32(data: &CanonicalBytes) -> Hash32 {
    Hash32::digest_raw(data.as_bytes())
}
