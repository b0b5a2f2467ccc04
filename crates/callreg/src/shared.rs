//! Thread-safe shared store wrapper.
//!
//! Each store of a [`Registry`](crate::Registry) sits behind its own
//! `Arc<RwLock>`, so cloning a registry shares the stores and invocations
//! only ever contend with registrations on the same store.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe mutable shared store.
///
/// Uses `Arc<RwLock<T>>` internally. Readers never block each other.
pub struct SharedStore<T>(Arc<RwLock<T>>);

impl<T> SharedStore<T> {
    /// Create a new shared store from an owned store.
    pub fn new(store: T) -> Self {
        SharedStore(Arc::new(RwLock::new(store)))
    }

    /// Get read access to the store.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Get write access to the store.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Whether both handles share the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        SharedStore(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for SharedStore<T> {
    fn default() -> Self {
        SharedStore::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedStore({:?})", &*self.0.read())
    }
}
