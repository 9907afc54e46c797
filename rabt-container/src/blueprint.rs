//! Type-erased form of a component [`Shape`](crate::shape::Shape).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{RabtError, Result};
use crate::instance::Instance;
use crate::key::TypeKey;
use crate::shape::{Args, Component, Param};

/// A freshly built component, before it is shared.
pub(crate) type Erased = Box<dyn Any + Send + Sync>;

pub(crate) type BuildFn = Arc<dyn Fn(&Args) -> Result<Erased> + Send + Sync>;

/// Assigns a property value; `false` when either side has the wrong type.
pub(crate) type SetFn =
    Arc<dyn Fn(&mut (dyn Any + Send + Sync), &(dyn Any + Send + Sync)) -> bool + Send + Sync>;

/// Turns a built component into an instance of one of its capabilities.
pub(crate) type CastFn = Arc<dyn Fn(Erased) -> Option<Instance> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct ConstructorSpec {
    params: Vec<Param>,
    build: BuildFn,
}

impl ConstructorSpec {
    pub(crate) fn new(params: Vec<Param>, build: BuildFn) -> Self {
        Self { params, build }
    }

    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn build(&self, args: &Args) -> Result<Erased> {
        (self.build)(args)
    }
}

#[derive(Clone)]
pub(crate) struct PropertySpec {
    name: &'static str,
    value_type: TypeKey,
    set: SetFn,
}

impl PropertySpec {
    pub(crate) fn new(name: &'static str, value_type: TypeKey, set: SetFn) -> Self {
        Self { name, value_type, set }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn value_type(&self) -> TypeKey {
        self.value_type
    }

    pub(crate) fn assign(
        &self,
        target: &mut (dyn Any + Send + Sync),
        value: &(dyn Any + Send + Sync),
    ) -> bool {
        (self.set)(target, value)
    }
}

/// Everything the container knows about one component type.
pub(crate) struct Blueprint {
    key: TypeKey,
    constructors: Vec<ConstructorSpec>,
    properties: Vec<PropertySpec>,
    casts: HashMap<TypeKey, CastFn>,
}

impl Blueprint {
    pub(crate) fn of<C: Component>() -> Self {
        let shape = C::shape();
        let key = TypeKey::of::<C>();

        let mut casts: HashMap<TypeKey, CastFn> = shape.provisions.into_iter().collect();
        let identity: CastFn = Arc::new(|object: Erased| {
            object
                .downcast::<C>()
                .ok()
                .map(|component| Instance::new(Arc::<C>::from(component)))
        });
        casts.insert(key, identity);

        Self {
            key,
            constructors: shape.constructors,
            properties: shape.properties,
            casts,
        }
    }

    pub(crate) fn key(&self) -> TypeKey {
        self.key
    }

    #[cfg(test)]
    pub(crate) fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }

    pub(crate) fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// The constructor with the fewest parameters, first declared on ties.
    pub(crate) fn minimal_constructor(&self) -> Option<&ConstructorSpec> {
        let mut order: Vec<usize> = (0..self.constructors.len()).collect();
        order.sort_by_key(|&index| self.constructors[index].params.len());
        order.first().map(|&index| &self.constructors[index])
    }

    /// Every parameter called `name`, across all constructors.
    pub(crate) fn parameters_named(&self, name: &str) -> Vec<Param> {
        self.constructors
            .iter()
            .flat_map(|constructor| constructor.params.iter())
            .filter(|param| param.name() == name)
            .copied()
            .collect()
    }

    pub(crate) fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub(crate) fn provides(&self, capability: &TypeKey) -> bool {
        self.casts.contains_key(capability)
    }

    /// Exposes a built component as `target`.
    pub(crate) fn cast(&self, target: &TypeKey, object: Erased) -> Result<Instance> {
        let cast = self.casts.get(target).ok_or_else(|| RabtError::NotImplemented {
            capability: *target,
            implementation: self.key,
        })?;
        cast(object).ok_or_else(|| {
            RabtError::construction(self.key, format!("built value is not a {}", self.key.type_name()))
        })
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut provides: Vec<_> = self.casts.keys().map(|key| key.to_string()).collect();
        provides.sort();
        f.debug_struct("Blueprint")
            .field("key", &self.key)
            .field("constructors", &self.constructors.len())
            .field(
                "properties",
                &self.properties.iter().map(|p| p.name).collect::<Vec<_>>(),
            )
            .field("provides", &provides)
            .finish()
    }
}
