//! # Demo Subcommand
//!
//! Runs the full anchoring scenario against in-memory registries:
//! assemble a credential batch, publish its root, verify a member,
//! revoke it, verify again, then walk an identifier record through
//! create/update/resolve/revoke. Registry events surface through the
//! tracing sink, so `-v` shows the notification stream.

use anyhow::{bail, Result};
use clap::Args;

use creda_core::{AccountId, Did};
use creda_merkle::MerkleProof;
use creda_registry::{BatchRegistry, DidRegistry, StaticAuthority};
use creda_vc::{CredentialBatch, CredentialDocument};

/// Arguments for the `creda demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Number of credentials to batch.
    #[arg(long, default_value_t = 3)]
    pub batch_size: usize,
}

/// Execute the `creda demo` subcommand. Returns the process exit code.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    if args.batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let issuer_account = AccountId::from_seed("issuer-alpha");
    let issuer_did = Did::new("did:creda:issuer-alpha")?;
    let mut authority = StaticAuthority::new();
    authority.grant(issuer_account);

    // Assemble and commit the batch.
    let mut batch = CredentialBatch::new();
    for i in 0..args.batch_size {
        batch.push(CredentialDocument::new(
            issuer_did.clone(),
            vec![
                "VerifiableCredential".to_string(),
                "MembershipCredential".to_string(),
            ],
            serde_json::json!({ "id": format!("did:creda:holder-{i}"), "seq": i }),
        ));
    }
    let commitment = batch.commit()?;
    let root = commitment.root();
    println!("committed {} credentials, root {root}", batch.len());

    // Publish the root.
    let mut registry = BatchRegistry::new();
    registry.issue_batch(root, issuer_account, &authority)?;
    println!("batch issued by {issuer_account}");

    // Verify the first credential.
    let leaf = commitment.leaves()[0];
    let proof = commitment.proof_for_index(0)?;
    let verdict = registry.verify_credential(&leaf, &root, &proof);
    println!("verify {leaf}: {}", verdict_label(verdict.is_valid()));

    // Revoke it; the same proof must now fail.
    registry.revoke_credential(leaf, root, issuer_account)?;
    let verdict = registry.verify_credential(&leaf, &root, &proof);
    println!(
        "verify {leaf} after revocation: {}",
        verdict_label(verdict.is_valid())
    );

    // A leaf that was never committed.
    let stranger = creda_core::Hash32::digest_raw(b"never-committed");
    let verdict = registry.verify_credential(&stranger, &root, &MerkleProof::empty());
    println!(
        "verify uncommitted {stranger}: {}",
        verdict_label(verdict.is_valid())
    );

    // Identifier lifecycle.
    let controller = AccountId::from_seed("controller-1");
    let mut dids = DidRegistry::new();
    let id = dids.create(controller, "bafy-document-v1")?;
    println!("registered {}", Did::from_registry_id(&id));
    dids.update(id, "bafy-document-v2", controller)?;
    let record = dids.resolve(&id)?;
    println!("resolved {id}: cid={} status={}", record.cid, record.status);
    dids.revoke(id, controller)?;
    let record = dids.resolve(&id)?;
    println!("after revoke: cid={} status={}", record.cid, record.status);
    println!(
        "controller {controller} owns {} identifier(s)",
        dids.list_owned(&controller).len()
    );

    Ok(0)
}

fn verdict_label(valid: bool) -> &'static str {
    if valid {
        "VALID"
    } else {
        "INVALID"
    }
}
