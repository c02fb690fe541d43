//! # Issuer Authority
//!
//! Capability queries are an external collaborator's concern. The
//! registries ask "may this account publish batches?" through the
//! [`IssuerAuthority`] trait and never store role assignments themselves,
//! so swapping in an on-chain role registry, an ACL service, or a test
//! stub requires no registry changes.

use std::collections::BTreeSet;

use creda_core::AccountId;

/// Answers issuer-capability queries for batch publication.
pub trait IssuerAuthority {
    /// Whether the account currently holds the issuer capability.
    fn is_issuer(&self, account: &AccountId) -> bool;
}

/// An explicit grant set.
///
/// The administrative side (who may grant) is outside this crate; tests
/// and the CLI build the set up front.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthority {
    issuers: BTreeSet<AccountId>,
}

impl StaticAuthority {
    /// An authority with no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the issuer capability to an account. Idempotent.
    pub fn grant(&mut self, account: AccountId) {
        self.issuers.insert(account);
    }

    /// Number of granted accounts.
    pub fn granted_count(&self) -> usize {
        self.issuers.len()
    }
}

impl IssuerAuthority for StaticAuthority {
    fn is_issuer(&self, account: &AccountId) -> bool {
        self.issuers.contains(account)
    }
}

/// Accepts every account. For demos and tests only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAuthority;

impl IssuerAuthority for OpenAuthority {
    fn is_issuer(&self, _account: &AccountId) -> bool {
        true
    }
}
