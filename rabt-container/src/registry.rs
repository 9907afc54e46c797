//! Binding registry: capability to implementation mappings.
//!
//! Every binding is validated before it is stored, so a failed
//! [`BindingRegistry::bind`] leaves the registry exactly as it was.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::binding::Binding;
use crate::error::{AlreadyRegisteredError, BindingRole, RabtError, Result, WrongKindError};
use crate::graph::CycleDetector;
use crate::key::{TypeInfo, TypeKey};

/// Stores all bindings of a container.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: HashMap<TypeKey, Arc<Binding>>,
    /// Implementation to the first capability bound to it.
    implementations: HashMap<TypeKey, TypeKey>,
    current: Option<TypeKey>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `capability` to `implementation`.
    ///
    /// # Errors
    /// In check order:
    /// - [`RabtError::SelfBinding`]: both sides are the same type
    /// - [`RabtError::WrongKind`]: the implementation is an abstraction,
    ///   or the capability is not one
    /// - [`RabtError::AlreadyRegistered`]: the capability is already bound
    /// - [`RabtError::NotImplemented`]: the implementation does not provide
    ///   the capability
    /// - [`RabtError::CircularDependency`]: with `eager_cycle_check`, the new
    ///   binding closes a constructor cycle
    pub fn bind(
        &mut self,
        capability: TypeInfo,
        implementation: TypeInfo,
        eager_cycle_check: bool,
    ) -> Result<Arc<Binding>> {
        let capability_key = capability.key();
        let implementation_key = implementation.key();

        if capability_key == implementation_key {
            return Err(RabtError::SelfBinding {
                key: implementation_key,
            });
        }

        let blueprint = implementation.blueprint().ok_or_else(|| {
            RabtError::WrongKind(WrongKindError {
                key: implementation_key,
                role: BindingRole::Implementation,
            })
        })?;

        if !capability.is_abstraction() {
            return Err(RabtError::WrongKind(WrongKindError {
                key: capability_key,
                role: BindingRole::Capability,
            }));
        }

        if let Some(existing) = self.bindings.get(&capability_key) {
            return Err(RabtError::AlreadyRegistered(AlreadyRegisteredError {
                capability: capability_key,
                implementation: implementation_key,
                existing: existing.implementation(),
            }));
        }

        if !blueprint.provides(&capability_key) {
            return Err(RabtError::NotImplemented {
                capability: capability_key,
                implementation: implementation_key,
            });
        }

        let binding = Arc::new(Binding::new(capability_key, Arc::new(blueprint)));

        if eager_cycle_check {
            CycleDetector::new(self, &binding).check()?;
        }

        debug!(
            capability = %capability_key,
            implementation = %implementation_key,
            "Registered binding"
        );
        self.bindings.insert(capability_key, binding.clone());
        self.implementations
            .entry(implementation_key)
            .or_insert(capability_key);
        self.current = Some(capability_key);
        Ok(binding)
    }

    /// Stores a self-binding synthesized for an unbound concrete type.
    pub(crate) fn insert_identity(&mut self, binding: Arc<Binding>) {
        let key = binding.capability();
        if self.bindings.contains_key(&key) {
            return;
        }
        debug!(key = %key, "Auto-registered concrete type");
        self.bindings.insert(key, binding);
    }

    /// Looks up the binding registered under exactly `capability`.
    pub fn get(&self, capability: &TypeKey) -> Option<&Arc<Binding>> {
        self.bindings.get(capability)
    }

    /// Finds the binding that serves requests for `key`.
    ///
    /// A concrete type bound as the implementation of some capability uses
    /// that binding, so its overrides apply when it is requested directly.
    pub fn find(&self, key: &TypeKey) -> Option<&Arc<Binding>> {
        if let Some(capability) = self.implementations.get(key) {
            trace!(implementation = %key, capability = %capability, "Found binding by implementation");
            return self.bindings.get(capability);
        }
        self.bindings.get(key)
    }

    pub(crate) fn binding_mut(&mut self, capability: &TypeKey) -> Option<&mut Binding> {
        self.bindings.get_mut(capability).map(Arc::make_mut)
    }

    /// Capability of the binding most recently created by [`bind`](Self::bind).
    pub fn current(&self) -> Option<TypeKey> {
        self.current
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.find(key).is_some()
    }

    /// Returns the number of bindings, auto-registered ones included.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn registered_keys(&self) -> Vec<TypeKey> {
        self.bindings.keys().copied().collect()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values().map(|binding| binding.as_ref())
    }
}
