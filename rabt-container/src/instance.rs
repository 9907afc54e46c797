//! Type-erased resolved objects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::key::TypeKey;

/// A resolved object, erased to the type it was requested as.
///
/// Holds an `Arc<T>` for the requested `T`, which may be a trait object.
/// Cloning is cheap and shares the underlying object.
#[derive(Clone)]
pub struct Instance {
    key: TypeKey,
    object: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<T: ?Sized + Send + Sync + 'static>(object: Arc<T>) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            object: Arc::new(object),
        }
    }

    /// The type this instance can be downcast to.
    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Returns the shared object when `T` is the type it was created as.
    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.object.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether two instances share the same object.
    pub fn same_as(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({})", self.key)
    }
}
