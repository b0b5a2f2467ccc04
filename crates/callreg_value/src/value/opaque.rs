//! Values of arbitrary Rust types carried through the stores.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type-erased Rust value.
///
/// Keeps the concrete `TypeId` and type name captured at construction, so
/// assignability checks never need to inspect the erased value itself.
#[derive(Clone)]
pub struct OpaqueValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl OpaqueValue {
    /// Wrap an owned value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        OpaqueValue {
            inner: value,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` of the wrapped value.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type name of the wrapped value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Get a shared handle to the wrapped value if it is a `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Identity comparison: two opaque values are equal only when they share
    /// the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.type_name)
    }
}
