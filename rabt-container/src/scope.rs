//! Resolution scopes.
//!
//! The scope is chosen per top-level call, not per binding:
//! - [`Scope::Transient`]: a new object graph on every call
//! - [`Scope::Singleton`]: one instance per requested type for the
//!   container's lifetime
//!
//! Constructor dependencies are always resolved transiently, whatever the
//! scope of the call that needs them.
use std::fmt;

/// Cardinality policy of one resolution call.
///
/// # Examples
/// ```
/// use rabt_container::scope::Scope;
///
/// assert!(Scope::Singleton.is_cached());
/// assert!(!Scope::Transient.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Fresh instance on every call. Never cached.
    #[default]
    Transient,

    /// Created on first request, then served from the singleton cache
    /// until the container is dropped.
    Singleton,
}

impl Scope {
    /// Returns `true` if instances resolved in this scope are cached.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Transient => write!(f, "Transient"),
            Scope::Singleton => write!(f, "Singleton"),
        }
    }
}
