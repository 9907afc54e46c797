//! Deferred resolution.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::trace;

use crate::container::Container;
use crate::error::Result;
use crate::key::{Resolvable, TypeInfo};

/// Resolves `T` transiently on first access, then keeps the result.
///
/// Each handle caches only its own value and is independent of the
/// singleton cache and of other handles. A failed resolution is not
/// remembered; the next access tries again.
pub struct LazyHandle<'c, T: ?Sized> {
    container: &'c Container,
    info: TypeInfo,
    cell: OnceCell<Arc<T>>,
}

impl<'c, T: Resolvable + ?Sized> LazyHandle<'c, T> {
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            info: T::type_info(),
            cell: OnceCell::new(),
        }
    }

    /// Returns the value, resolving it on first call.
    pub fn value(&self) -> Result<Arc<T>> {
        self.cell
            .get_or_try_init(|| {
                trace!(key = %self.info.key(), "Resolving lazy handle");
                self.container.get::<T>()
            })
            .cloned()
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> fmt::Debug for LazyHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyHandle")
            .field("key", &self.info.key())
            .field("resolved", &self.cell.get().is_some())
            .finish()
    }
}
