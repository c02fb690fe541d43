//! # Credential document envelope and leaf digests
//!
//! A rigid envelope with an intentionally extensible subject, following
//! the W3C VC Data Model field names. The envelope exists so that two
//! parties hashing "the same credential" agree byte-for-byte on what was
//! hashed.
//!
//! ## Security Invariant
//!
//! The digest path is `CanonicalBytes::new()` then [`sha256_hash32`].
//! Raw `serde_json::to_vec()` output is not a valid digest input
//! anywhere in the stack; two serializers disagreeing on key order or
//! whitespace must not produce two different leaves for one credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use creda_core::{sha256_hash32, CanonicalBytes, CanonicalizationError, Did, Hash32};

/// The base JSON-LD context for credential documents.
pub const CONTEXT_CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// Errors from credential hashing and batch assembly.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the document failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Two documents in one batch hash to the same leaf, which would
    /// make inclusion proofs ambiguous.
    #[error("duplicate credential digest {0} in batch")]
    DuplicateCredential(Hash32),

    /// A commitment cannot be built over zero documents.
    #[error("cannot commit an empty batch")]
    EmptyBatch,

    /// Tree construction failed.
    #[error("merkle error: {0}")]
    Merkle(#[from] creda_merkle::MerkleError),
}

/// A credential document with W3C VC field names.
///
/// The envelope structure is rigid while `credential_subject` is
/// extensible; unknown envelope fields are rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialDocument {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential identifier (`urn:uuid:...`), optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type(s). Should include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the credential issuer.
    pub issuer: Did,

    /// When the credential was issued (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    /// The credential subject, extensible per the W3C data model.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: serde_json::Value,
}

impl CredentialDocument {
    /// Create a document with the base context, a fresh `urn:uuid` id,
    /// and the current time as issuance date.
    pub fn new(
        issuer: Did,
        credential_type: Vec<String>,
        credential_subject: serde_json::Value,
    ) -> Self {
        Self {
            context: vec![CONTEXT_CREDENTIALS_V1.to_string()],
            id: Some(format!("urn:uuid:{}", Uuid::new_v4())),
            credential_type,
            issuer,
            issuance_date: Utc::now(),
            credential_subject,
        }
    }

    /// Compute the leaf digest of this document: SHA-256 over its
    /// JCS-canonical bytes.
    ///
    /// # Errors
    ///
    /// Fails only if the subject contains values canonicalization
    /// rejects (floats).
    pub fn leaf_digest(&self) -> Result<Hash32, VcError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_hash32(&canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_document() -> CredentialDocument {
        CredentialDocument {
            context: vec![CONTEXT_CREDENTIALS_V1.to_string()],
            id: None,
            credential_type: vec![
                "VerifiableCredential".to_string(),
                "MembershipCredential".to_string(),
            ],
            issuer: Did::new("did:creda:issuer-alpha").unwrap(),
            issuance_date: "2026-01-15T12:00:00Z".parse().unwrap(),
            credential_subject: serde_json::json!({
                "id": "did:creda:holder-1",
                "role": "member"
            }),
        }
    }

    #[test]
    fn leaf_digest_cross_language_vector() {
        // sha256 of the JCS form, verified against Python:
        // json.dumps(doc, sort_keys=True, separators=(",", ":")).
        let digest = fixture_document().leaf_digest().unwrap();
        assert_eq!(
            digest.to_hex(),
            "b113b6e2b12246baece4b01958ce9e25893ba28975284179362ed37001f7e0b6"
        );
    }

    #[test]
    fn leaf_digest_is_deterministic() {
        let doc = fixture_document();
        assert_eq!(doc.leaf_digest().unwrap(), doc.leaf_digest().unwrap());
    }

    #[test]
    fn leaf_digest_changes_with_subject() {
        let mut doc = fixture_document();
        let original = doc.leaf_digest().unwrap();
        doc.credential_subject["role"] = serde_json::json!("admin");
        assert_ne!(doc.leaf_digest().unwrap(), original);
    }

    #[test]
    fn leaf_digest_rejects_float_subject() {
        let mut doc = fixture_document();
        doc.credential_subject["score"] = serde_json::json!(0.5);
        assert!(matches!(
            doc.leaf_digest(),
            Err(VcError::Canonicalization(_))
        ));
    }

    #[test]
    fn new_fills_context_id_and_date() {
        let doc = CredentialDocument::new(
            Did::new("did:creda:issuer-alpha").unwrap(),
            vec!["VerifiableCredential".to_string()],
            serde_json::json!({}),
        );
        assert_eq!(doc.context, vec![CONTEXT_CREDENTIALS_V1.to_string()]);
        assert!(doc.id.as_deref().unwrap().starts_with("urn:uuid:"));
    }

    #[test]
    fn serde_uses_w3c_field_names() {
        let val = serde_json::to_value(fixture_document()).unwrap();
        assert!(val.get("@context").is_some());
        assert!(val.get("type").is_some());
        assert!(val.get("issuanceDate").is_some());
        assert!(val.get("credentialSubject").is_some());
        assert!(val.get("credential_type").is_none());
        assert!(val.get("issuance_date").is_none());
    }

    #[test]
    fn deserialization_rejects_unknown_envelope_fields() {
        let json = serde_json::json!({
            "@context": [CONTEXT_CREDENTIALS_V1],
            "type": ["VerifiableCredential"],
            "issuer": "did:creda:issuer-alpha",
            "issuanceDate": "2026-01-15T12:00:00Z",
            "credentialSubject": {},
            "sneaky": true
        });
        assert!(serde_json::from_value::<CredentialDocument>(json).is_err());
    }
}
