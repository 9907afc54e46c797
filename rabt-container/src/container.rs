//! # The Container
//!
//! Owns the [`BindingRegistry`] and the [`SingletonCache`] and answers
//! resolution requests against them.
//!
//! # Lifecycle
//! ```text
//! bind / bind_types / install  ──>  BindingRegistry
//!                                         │
//!                  get / get_singleton / get_lazy / resolve
//!                                         │
//!                                         ▼
//!                         Resolver ──> SingletonCache
//! ```
//!
//! Configuration takes `&mut self`; resolution takes `&self`, so a
//! [`LazyHandle`] can hold on to the container. The container does no
//! locking. Share it between threads through [`SharedContainer`].
//!
//! # Examples
//! ```rust
//! use rabt_container::prelude::*;
//! use std::sync::Arc;
//!
//! pub trait Logger: Send + Sync {
//!     fn prefix(&self) -> &str;
//! }
//! capability!(Logger);
//!
//! struct ConsoleLogger {
//!     prefix: String,
//! }
//! impl Logger for ConsoleLogger {
//!     fn prefix(&self) -> &str { &self.prefix }
//! }
//! impl Component for ConsoleLogger {
//!     fn shape() -> Shape<Self> {
//!         Shape::new()
//!             .constructor([Param::value::<String>("prefix")], |args| {
//!                 Ok(ConsoleLogger { prefix: args.value("prefix")? })
//!             })
//!             .provides(|logger: Arc<ConsoleLogger>| -> Arc<dyn Logger> { logger })
//!     }
//! }
//!
//! let mut container = Container::new();
//! container
//!     .bind::<dyn Logger, ConsoleLogger>()?
//!     .with_constructor_argument("prefix", String::from("[app]"))?;
//!
//! let logger = container.get::<dyn Logger>()?;
//! assert_eq!(logger.prefix(), "[app]");
//! # Ok::<(), RabtError>(())
//! ```

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, trace};

use crate::binding::BindingBuilder;
use crate::cache::SingletonCache;
use crate::config::Settings;
use crate::error::{RabtError, Result};
use crate::instance::Instance;
use crate::key::{Resolvable, TypeInfo, TypeKey};
use crate::lazy::LazyHandle;
use crate::provider::Provider;
use crate::registry::BindingRegistry;
use crate::resolver::Resolver;
use crate::scope::Scope;
use crate::shape::Component;

/// A container behind a container-wide lock.
pub type SharedContainer = Arc<Mutex<Container>>;

/// Dependency injection container.
pub struct Container {
    registry: RefCell<BindingRegistry>,
    cache: RefCell<SingletonCache>,
    settings: Settings,
}

impl Container {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        debug!(?settings, "Creating container");
        Self {
            registry: RefCell::new(BindingRegistry::new()),
            cache: RefCell::new(SingletonCache::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Configuration ──

    /// Binds the capability `I` to the component `C`.
    ///
    /// ```rust,ignore
    /// container.bind::<dyn IBar, Bar>()?;
    /// ```
    pub fn bind<I, C>(&mut self) -> Result<BindingBuilder<'_>>
    where
        I: Resolvable + ?Sized,
        C: Component,
    {
        self.bind_types(TypeInfo::of::<I>(), TypeInfo::component::<C>())
    }

    /// Binds two types known only at runtime, as the binding DSL does.
    #[instrument(
        skip_all,
        fields(capability = %capability.key(), implementation = %implementation.key())
    )]
    pub fn bind_types(
        &mut self,
        capability: TypeInfo,
        implementation: TypeInfo,
    ) -> Result<BindingBuilder<'_>> {
        let eager = self.settings.eager_cycle_check;
        let registry = self.registry.get_mut();
        let binding = registry.bind(capability, implementation, eager)?;
        Ok(BindingBuilder::new(registry, binding.capability()))
    }

    /// Builder for the most recently created binding.
    ///
    /// # Errors
    /// [`RabtError::NoActiveBinding`] if nothing has been bound yet.
    pub fn current_binding(&mut self) -> Result<BindingBuilder<'_>> {
        let registry = self.registry.get_mut();
        let capability = registry.current().ok_or(RabtError::NoActiveBinding)?;
        Ok(BindingBuilder::new(registry, capability))
    }

    /// Registers every binding of a [`Provider`].
    pub fn install(&mut self, provider: &dyn Provider) -> Result<()> {
        debug!(provider = provider.name(), "Installing provider");
        provider.register(self)
    }

    // ── Resolution ──

    /// Resolves a fresh `T`.
    pub fn get<T: Resolvable + ?Sized>(&self) -> Result<Arc<T>> {
        self.get_in::<T>(Scope::Transient)
    }

    /// Resolves `T` once and returns the same instance on every later call.
    pub fn get_singleton<T: Resolvable + ?Sized>(&self) -> Result<Arc<T>> {
        self.get_in::<T>(Scope::Singleton)
    }

    /// Returns a handle that resolves `T` on first access.
    pub fn get_lazy<T: Resolvable + ?Sized>(&self) -> LazyHandle<'_, T> {
        LazyHandle::new(self)
    }

    fn get_in<T: Resolvable + ?Sized>(&self, scope: Scope) -> Result<Arc<T>> {
        let info = TypeInfo::of::<T>();
        let instance = self.resolve(info, scope)?;
        instance.downcast::<T>().ok_or_else(|| {
            RabtError::construction(
                info.key(),
                format!("Type mismatch: resolved {}", instance.key()),
            )
        })
    }

    /// Resolves a type known only at runtime.
    ///
    /// Registry and cache are only written once the whole object graph has
    /// been built, so a failed call leaves the container unchanged.
    #[instrument(skip_all, fields(key = %info.key(), scope = %scope))]
    pub fn resolve(&self, info: TypeInfo, scope: Scope) -> Result<Instance> {
        let key = info.key();
        trace!("Resolving");

        let registry = self.registry.borrow();
        let mut resolver = Resolver::new(&registry, self.settings.auto_register);
        let binding = resolver.lookup(&info, None)?;

        if scope.is_cached() {
            if let Some(instance) = self.cache.borrow().get(&key) {
                trace!("Singleton cache hit");
                return Ok(instance.clone());
            }
        }

        let instance = resolver.construct(&binding, key)?;
        let pending = resolver.into_pending();
        drop(registry);

        if !pending.is_empty() {
            match self.registry.try_borrow_mut() {
                Ok(mut registry) => {
                    for binding in pending {
                        registry.insert_identity(binding);
                    }
                }
                Err(_) => debug!(
                    pending = pending.len(),
                    "Registry is being inspected, auto-registration skipped"
                ),
            }
        }

        if scope.is_cached() {
            return Ok(self.cache.borrow_mut().insert(key, instance));
        }
        Ok(instance)
    }

    // ── Introspection ──

    /// Whether requests for `T` are served by a binding.
    pub fn contains<T: Resolvable + ?Sized>(&self) -> bool {
        self.contains_key(&TypeKey::of::<T>())
    }

    pub fn contains_key(&self, key: &TypeKey) -> bool {
        self.registry.borrow().contains(key)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    /// Number of cached singletons.
    pub fn singleton_count(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Runs `inspect` against the binding registry.
    ///
    /// Resolving from inside `inspect` works, but concrete types it
    /// auto-registers are not kept.
    pub fn with_registry<R>(&self, inspect: impl FnOnce(&BindingRegistry) -> R) -> R {
        inspect(&self.registry.borrow())
    }

    /// Moves the container behind a container-wide lock.
    pub fn into_shared(self) -> SharedContainer {
        Arc::new(Mutex::new(self))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.len())
            .field("singletons", &self.singleton_count())
            .field("settings", &self.settings)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, SharedContainer};
    pub use crate::binding::BindingBuilder;
    pub use crate::capability;
    pub use crate::config::Settings;
    pub use crate::error::{RabtError, Result};
    pub use crate::key::{Resolvable, TypeInfo, TypeKey};
    pub use crate::lazy::LazyHandle;
    pub use crate::provider::Provider;
    pub use crate::scope::Scope;
    pub use crate::shape::{Args, Component, Param, Shape};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
