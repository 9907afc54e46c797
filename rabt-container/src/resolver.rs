//! Recursive object graph construction.

use std::sync::Arc;

use rabt_support::rendering::{simple_type_name, suggest_similar};
use tracing::{debug, trace};

use crate::binding::Binding;
use crate::error::{NotRegisteredError, RabtError, Result};
use crate::graph::ResolutionPath;
use crate::instance::Instance;
use crate::key::{TypeInfo, TypeKey};
use crate::registry::BindingRegistry;
use crate::shape::{Args, ParamKind};

/// Resolves one top-level request against a registry snapshot.
///
/// Identity bindings synthesized along the way are kept in `pending` and
/// only committed by the caller once the whole request has succeeded.
pub(crate) struct Resolver<'r> {
    registry: &'r BindingRegistry,
    auto_register: bool,
    path: ResolutionPath,
    pending: Vec<Arc<Binding>>,
}

impl<'r> Resolver<'r> {
    pub(crate) fn new(registry: &'r BindingRegistry, auto_register: bool) -> Self {
        Self {
            registry,
            auto_register,
            path: ResolutionPath::new(),
            pending: Vec::new(),
        }
    }

    /// Finds the binding serving `info`, synthesizing a self-binding for
    /// unbound concrete types.
    pub(crate) fn lookup(
        &mut self,
        info: &TypeInfo,
        required_by: Option<TypeKey>,
    ) -> Result<Arc<Binding>> {
        let key = info.key();

        if let Some(binding) = self.registry.find(&key) {
            trace!(requested = %key, implementation = %binding.implementation(), "Binding found");
            return Ok(binding.clone());
        }

        if let Some(binding) = self.pending.iter().find(|b| b.capability() == key) {
            return Ok(binding.clone());
        }

        match info.blueprint() {
            Some(blueprint) if self.auto_register => {
                debug!(key = %key, "Synthesizing self-binding");
                let binding = Arc::new(Binding::identity(Arc::new(blueprint)));
                self.pending.push(binding.clone());
                Ok(binding)
            }
            _ => Err(self.not_registered(key, required_by)),
        }
    }

    /// Builds the implementation of `binding` and exposes it as `requested`.
    pub(crate) fn construct(&mut self, binding: &Binding, requested: TypeKey) -> Result<Instance> {
        let implementation = binding.implementation();
        self.path.enter(implementation)?;
        let result = self.build(binding, requested);
        self.path.leave();
        result
    }

    fn build(&mut self, binding: &Binding, requested: TypeKey) -> Result<Instance> {
        let implementation = binding.implementation();
        let blueprint = binding.blueprint().clone();
        let constructor = blueprint
            .minimal_constructor()
            .ok_or(RabtError::NoUsableConstructor {
                key: implementation,
            })?;

        trace!(
            implementation = %implementation,
            params = constructor.params().len(),
            depth = self.path.depth(),
            "Resolving constructor parameters"
        );

        let mut args = Args::new(implementation);
        for param in constructor.params() {
            match param.kind() {
                ParamKind::Value(_) => {
                    let value = binding.descriptor().value_for(param.name())?;
                    args.push_value(param.name(), value.clone());
                }
                ParamKind::Object(info) => {
                    let dependency = self.lookup(&info, Some(implementation))?;
                    let instance = self.construct(&dependency, info.key())?;
                    args.push_object(param.name(), instance);
                }
            }
        }

        let mut object = constructor.build(&args)?;
        binding.descriptor().apply_property_overrides(&mut *object);
        blueprint.cast(&requested, object)
    }

    /// Bindings synthesized during this request.
    pub(crate) fn into_pending(self) -> Vec<Arc<Binding>> {
        self.pending
    }

    fn not_registered(&self, requested: TypeKey, required_by: Option<TypeKey>) -> RabtError {
        let registered = self.registry.registered_keys();
        let names: Vec<&str> = registered.iter().map(|key| key.type_name()).collect();
        let suggestions = suggest_similar(requested.type_name(), &names, 3)
            .iter()
            .map(|name| simple_type_name(name))
            .collect();

        RabtError::NotRegistered(NotRegisteredError {
            requested,
            required_by,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Bar, Foo, Ghost, IBar, IFoo, Node};

    #[test]
    fn resolves_transitive_dependencies() {
        let mut registry = BindingRegistry::new();
        registry.bind(TypeInfo::of::<dyn IFoo>(), TypeInfo::of::<Foo>(), true).unwrap();
        registry.bind(TypeInfo::of::<dyn IBar>(), TypeInfo::of::<Bar>(), true).unwrap();

        let mut resolver = Resolver::new(&registry, true);
        let info = TypeInfo::of::<dyn IBar>();
        let binding = resolver.lookup(&info, None).unwrap();
        let instance = resolver.construct(&binding, info.key()).unwrap();
        assert!(instance.downcast::<dyn IBar>().is_some());
        assert!(resolver.into_pending().is_empty());
    }

    #[test]
    fn unbound_concrete_type_is_pending() {
        let registry = BindingRegistry::new();
        let mut resolver = Resolver::new(&registry, true);
        let info = TypeInfo::of::<Foo>();
        let binding = resolver.lookup(&info, None).unwrap();
        assert!(binding.is_identity());

        let again = resolver.lookup(&info, None).unwrap();
        assert!(Arc::ptr_eq(&binding, &again));
        assert_eq!(resolver.into_pending().len(), 1);
    }

    #[test]
    fn auto_register_can_be_disabled() {
        let registry = BindingRegistry::new();
        let mut resolver = Resolver::new(&registry, false);
        let err = resolver.lookup(&TypeInfo::of::<Foo>(), None).unwrap_err();
        assert!(matches!(err, RabtError::NotRegistered(_)));
    }

    #[test]
    fn missing_abstraction_names_requester() {
        let registry = BindingRegistry::new();
        let mut resolver = Resolver::new(&registry, true);
        let info = TypeInfo::of::<Bar>();
        let binding = resolver.lookup(&info, None).unwrap();

        match resolver.construct(&binding, info.key()).unwrap_err() {
            RabtError::NotRegistered(e) => {
                assert_eq!(e.requested, TypeKey::of::<dyn IFoo>());
                assert_eq!(e.required_by, Some(TypeKey::of::<Bar>()));
            }
            other => panic!("Expected NotRegistered, got: {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_caught_while_resolving() {
        let registry = BindingRegistry::new();
        let mut resolver = Resolver::new(&registry, true);
        let info = TypeInfo::of::<Node>();
        let binding = resolver.lookup(&info, None).unwrap();

        match resolver.construct(&binding, info.key()).unwrap_err() {
            RabtError::CircularDependency(e) => {
                assert_eq!(e.chain, vec![TypeKey::of::<Node>(), TypeKey::of::<Node>()]);
            }
            other => panic!("Expected CircularDependency, got: {other:?}"),
        }
    }

    #[test]
    fn type_without_constructor() {
        let registry = BindingRegistry::new();
        let mut resolver = Resolver::new(&registry, true);
        let info = TypeInfo::of::<Ghost>();
        let binding = resolver.lookup(&info, None).unwrap();
        let err = resolver.construct(&binding, info.key()).unwrap_err();
        assert!(matches!(err, RabtError::NoUsableConstructor { .. }));
    }
}
