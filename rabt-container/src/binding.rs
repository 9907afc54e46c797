//! Bindings and the fluent builder used to configure them.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::blueprint::Blueprint;
use crate::descriptor::{DependencyDescriptor, OverrideValue};
use crate::error::{RabtError, Result};
use crate::key::TypeKey;
use crate::registry::BindingRegistry;

/// One capability mapped to the component that implements it.
#[derive(Clone)]
pub struct Binding {
    capability: TypeKey,
    descriptor: DependencyDescriptor,
}

impl Binding {
    pub(crate) fn new(capability: TypeKey, blueprint: Arc<Blueprint>) -> Self {
        Self {
            capability,
            descriptor: DependencyDescriptor::new(blueprint),
        }
    }

    /// A concrete type bound to itself, with no overrides.
    pub(crate) fn identity(blueprint: Arc<Blueprint>) -> Self {
        Self::new(blueprint.key(), blueprint)
    }

    #[inline]
    pub fn capability(&self) -> TypeKey {
        self.capability
    }

    #[inline]
    pub fn implementation(&self) -> TypeKey {
        self.descriptor.implementation()
    }

    pub fn descriptor(&self) -> &DependencyDescriptor {
        &self.descriptor
    }

    pub(crate) fn descriptor_mut(&mut self) -> &mut DependencyDescriptor {
        &mut self.descriptor
    }

    pub(crate) fn blueprint(&self) -> &Arc<Blueprint> {
        self.descriptor.blueprint()
    }

    pub fn is_identity(&self) -> bool {
        self.capability == self.implementation()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("capability", &self.capability)
            .field("implementation", &self.implementation())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Configures overrides on the binding it was created for.
///
/// Returned by [`Container::bind`](crate::Container::bind) and
/// [`Container::current_binding`](crate::Container::current_binding).
///
/// ```
/// use rabt_container::prelude::*;
/// # use std::sync::Arc;
/// # pub trait IWarrior: Send + Sync {}
/// # capability!(IWarrior);
/// # struct Warrior;
/// # impl IWarrior for Warrior {}
/// # impl Component for Warrior {
/// #     fn shape() -> Shape<Self> {
/// #         Shape::new()
/// #             .constructor([Param::value::<String>("name")], |_| Ok(Warrior))
/// #             .provides(|w: Arc<Warrior>| -> Arc<dyn IWarrior> { w })
/// #     }
/// # }
///
/// let mut container = Container::new();
/// container
///     .bind::<dyn IWarrior, Warrior>()?
///     .with_constructor_argument("name", String::from("Conan"))?;
/// # Ok::<(), RabtError>(())
/// ```
pub struct BindingBuilder<'c> {
    registry: &'c mut BindingRegistry,
    capability: TypeKey,
}

impl<'c> BindingBuilder<'c> {
    pub(crate) fn new(registry: &'c mut BindingRegistry, capability: TypeKey) -> Self {
        Self {
            registry,
            capability,
        }
    }

    /// Supplies the value of a value-kind constructor parameter.
    pub fn with_constructor_argument<V>(mut self, name: &str, value: V) -> Result<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        self.binding_mut()?
            .descriptor_mut()
            .add_constructor_argument(name, OverrideValue::new(value))?;
        debug!(capability = %self.capability, name, "constructor argument added");
        Ok(self)
    }

    /// Assigns a property after every construction of the implementation.
    pub fn with_property_value<V>(mut self, name: &str, value: V) -> Result<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        self.binding_mut()?
            .descriptor_mut()
            .add_property_value(name, OverrideValue::new(value))?;
        debug!(capability = %self.capability, name, "property value added");
        Ok(self)
    }

    #[inline]
    pub fn capability(&self) -> TypeKey {
        self.capability
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.registry.get(&self.capability).map(|binding| binding.as_ref())
    }

    fn binding_mut(&mut self) -> Result<&mut Binding> {
        self.registry
            .binding_mut(&self.capability)
            .ok_or(RabtError::NoActiveBinding)
    }
}

impl fmt::Debug for BindingBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingBuilder")
            .field("capability", &self.capability)
            .finish()
    }
}
