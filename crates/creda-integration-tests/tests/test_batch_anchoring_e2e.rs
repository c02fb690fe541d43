//! End-to-end batch anchoring scenario: commit three credential hashes,
//! publish the root, verify, revoke, and re-verify.

use creda_core::{AccountId, Hash32};
use creda_merkle::{verify_proof, MerkleProof, MerkleTree};
use creda_registry::{
    BatchError, BatchRegistry, MemorySink, RegistryEvent, StaticAuthority, Verdict,
};

/// The scenario leaves: SHA-256 of the single letters A, B, C.
fn leaf(letter: &str) -> Hash32 {
    Hash32::digest_raw(letter.as_bytes())
}

fn issuer() -> AccountId {
    AccountId::from_seed("issuer-alpha")
}

fn authority() -> StaticAuthority {
    let mut authority = StaticAuthority::new();
    authority.grant(issuer());
    authority
}

#[test]
fn scenario_fixtures_cross_language() {
    // Verified against Python hashlib.
    assert_eq!(
        leaf("A").to_hex(),
        "559aead08264d5795d3909718cdd05abd49572e84fe55590eef31a88a08fdffd"
    );
    let tree = MerkleTree::build(&[leaf("A"), leaf("B"), leaf("C")]).unwrap();
    assert_eq!(
        tree.root().to_hex(),
        "dbe11e36aa89a963103de7f8ad09c1100c06ccd5c5ad424ca741efb0689dc427"
    );
}

#[test]
fn anchor_verify_revoke_reverify() {
    let leaves = [leaf("A"), leaf("B"), leaf("C")];
    let tree = MerkleTree::build(&leaves).unwrap();
    let root = tree.root();

    let sink = MemorySink::new();
    let mut registry = BatchRegistry::with_sink(Box::new(sink.clone()));
    registry.issue_batch(root, issuer(), &authority()).unwrap();

    // A valid member verifies and names the issuer.
    let proof_a = tree.proof_for(&leaf("A")).unwrap();
    assert_eq!(
        registry.verify_credential(&leaf("A"), &root, &proof_a),
        Verdict::Valid { issuer: issuer() }
    );

    // After revocation the identical call is invalid.
    registry
        .revoke_credential(leaf("A"), root, issuer())
        .unwrap();
    assert_eq!(
        registry.verify_credential(&leaf("A"), &root, &proof_a),
        Verdict::Invalid
    );

    // Other members are unaffected.
    let proof_b = tree.proof_for(&leaf("B")).unwrap();
    assert!(registry
        .verify_credential(&leaf("B"), &root, &proof_b)
        .is_valid());

    // A leaf never committed, presented with an empty proof.
    assert_eq!(
        registry.verify_credential(&leaf("D"), &root, &MerkleProof::empty()),
        Verdict::Invalid
    );

    // One event per successful mutation, in order.
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RegistryEvent::BatchIssued { .. }));
    assert!(matches!(events[1], RegistryEvent::CredentialRevoked { .. }));
}

#[test]
fn proofs_do_not_transfer_between_batches() {
    let tree_one = MerkleTree::build(&[leaf("A"), leaf("B"), leaf("C")]).unwrap();
    let tree_two = MerkleTree::build(&[leaf("D"), leaf("E"), leaf("F")]).unwrap();

    let mut registry = BatchRegistry::new();
    registry
        .issue_batch(tree_one.root(), issuer(), &authority())
        .unwrap();
    registry
        .issue_batch(tree_two.root(), issuer(), &authority())
        .unwrap();

    let proof = tree_one.proof_for(&leaf("A")).unwrap();
    assert!(verify_proof(&leaf("A"), &tree_one.root(), &proof));
    assert_eq!(
        registry.verify_credential(&leaf("A"), &tree_two.root(), &proof),
        Verdict::Invalid
    );
}

#[test]
fn republication_and_foreign_revocation_rejected() {
    let mut granted = authority();
    let rival = AccountId::from_seed("issuer-beta");
    granted.grant(rival);

    let tree = MerkleTree::build(&[leaf("A"), leaf("B")]).unwrap();
    let root = tree.root();

    let mut registry = BatchRegistry::new();
    registry.issue_batch(root, issuer(), &granted).unwrap();

    // A second issuer cannot take over a published root.
    assert_eq!(
        registry.issue_batch(root, rival, &granted),
        Err(BatchError::DuplicateRoot(root))
    );
    assert_eq!(registry.issuer_of(&root), Some(&issuer()));

    // Nor revoke under it.
    assert_eq!(
        registry.revoke_credential(leaf("A"), root, rival),
        Err(BatchError::NotAuthorized(rival))
    );
    assert!(!registry.is_revoked(&leaf("A")));
}
