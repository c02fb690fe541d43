//! # Shared — the mutual-exclusion boundary
//!
//! The reference execution environment is a globally-ordered ledger: one
//! operation at a time, each atomic. [`Shared`] preserves that model for
//! concurrent callers with a single mutex per registry instance. No
//! operation suspends or performs I/O while holding the lock, so
//! fine-grained locking buys nothing here and would forfeit the strict
//! issue/revoke/verify ordering correctness depends on.

use std::sync::Arc;

use parking_lot::Mutex;

/// A registry behind one mutex. Clones share the same instance.
#[derive(Debug, Default)]
pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    /// Wrap a registry for shared access.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Run one operation under the lock, to completion.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
