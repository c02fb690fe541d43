//! # creda-registry — Anchoring and Identifier State Machines
//!
//! Two independent, explicitly owned state machines:
//!
//! - [`BatchRegistry`] maps published Merkle roots to their issuers,
//!   tracks per-leaf revocation, and answers verification queries by
//!   combining proof verification with its own revocation and ownership
//!   state.
//! - [`DidRegistry`] maps 32-byte identifiers to controller/document/
//!   status records with create/update/revoke/resolve operations and a
//!   controller-to-identifiers reverse index.
//!
//! ## Collaborators
//!
//! Authorization and observability are external collaborators, not
//! registry internals:
//!
//! - [`IssuerAuthority`] answers capability queries; the registries never
//!   store roles.
//! - [`EventSink`] receives a notification for every successful mutation;
//!   the default wiring is [`TracingSink`].
//!
//! ## Execution model
//!
//! Each registry owns its state exclusively. Mutating operations take
//! `&mut self`, run to completion without suspension, and leave state
//! unchanged on any precondition violation. Concurrent callers are
//! serialized by the [`Shared`] wrapper, one mutex per registry instance.

pub mod authority;
pub mod batch;
pub mod event;
pub mod identity;
pub mod shared;

pub use authority::{IssuerAuthority, OpenAuthority, StaticAuthority};
pub use batch::{BatchError, BatchRegistry, Verdict};
pub use event::{EventSink, MemorySink, RegistryEvent, TracingSink};
pub use identity::{DidError, DidRecord, DidRegistry, DidStatus};
pub use shared::Shared;
