//! Per-binding constructor-argument and property overrides.
//!
//! Override names and value types are checked against the implementation's
//! declared shape when they are configured, so a misconfigured binding fails
//! on the configuration call rather than on the first resolution.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::blueprint::Blueprint;
use crate::error::{OverrideKind, RabtError, Result};
use crate::key::TypeKey;
use crate::shape::ParamKind;

/// A configured override value of any clonable type.
#[derive(Clone)]
pub struct OverrideValue {
    value: Arc<dyn Any + Send + Sync>,
    type_key: TypeKey,
    type_name: &'static str,
}

impl OverrideValue {
    pub fn new<V: Clone + Send + Sync + 'static>(value: V) -> Self {
        Self {
            value: Arc::new(value),
            type_key: TypeKey::of::<V>(),
            type_name: type_name::<V>(),
        }
    }

    pub fn downcast_ref<V: 'static>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    #[inline]
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub(crate) fn as_any(&self) -> &(dyn Any + Send + Sync) {
        &*self.value
    }
}

impl fmt::Debug for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverrideValue({})", self.type_name)
    }
}

/// Named overrides configured on one binding.
#[derive(Clone)]
pub struct DependencyDescriptor {
    blueprint: Arc<Blueprint>,
    constructor_arguments: HashMap<String, OverrideValue>,
    property_values: HashMap<String, OverrideValue>,
}

impl DependencyDescriptor {
    pub(crate) fn new(blueprint: Arc<Blueprint>) -> Self {
        Self {
            blueprint,
            constructor_arguments: HashMap::new(),
            property_values: HashMap::new(),
        }
    }

    pub(crate) fn blueprint(&self) -> &Arc<Blueprint> {
        &self.blueprint
    }

    /// The implementation type these overrides apply to.
    pub fn implementation(&self) -> TypeKey {
        self.blueprint.key()
    }

    pub fn add_constructor_argument(&mut self, name: &str, value: OverrideValue) -> Result<()> {
        let implementation = self.implementation();
        if self.constructor_arguments.contains_key(name) {
            return Err(RabtError::DuplicateOverride {
                kind: OverrideKind::ConstructorArgument,
                name: name.to_string(),
                implementation,
            });
        }

        let params = self.blueprint.parameters_named(name);
        let Some(first) = params.first() else {
            return Err(RabtError::UnknownParameter {
                name: name.to_string(),
                implementation,
            });
        };

        let accepted = params
            .iter()
            .any(|param| param.kind() == ParamKind::Value(value.type_key()));
        if !accepted {
            let expected = match first.kind() {
                ParamKind::Value(key) => key,
                ParamKind::Object(info) => info.key(),
            };
            return Err(RabtError::OverrideTypeMismatch {
                kind: OverrideKind::ConstructorArgument,
                name: name.to_string(),
                implementation,
                expected,
                actual: value.type_key(),
            });
        }

        trace!(implementation = %implementation, name, "constructor argument configured");
        self.constructor_arguments.insert(name.to_string(), value);
        Ok(())
    }

    pub fn add_property_value(&mut self, name: &str, value: OverrideValue) -> Result<()> {
        let implementation = self.implementation();
        if self.property_values.contains_key(name) {
            return Err(RabtError::DuplicateOverride {
                kind: OverrideKind::Property,
                name: name.to_string(),
                implementation,
            });
        }

        let property = self
            .blueprint
            .property(name)
            .ok_or_else(|| RabtError::UnknownProperty {
                name: name.to_string(),
                implementation,
            })?;

        if property.value_type() != value.type_key() {
            return Err(RabtError::OverrideTypeMismatch {
                kind: OverrideKind::Property,
                name: name.to_string(),
                implementation,
                expected: property.value_type(),
                actual: value.type_key(),
            });
        }

        trace!(implementation = %implementation, name, "property value configured");
        self.property_values.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks up the override for a value-kind constructor parameter.
    pub fn value_for(&self, name: &str) -> Result<&OverrideValue> {
        self.constructor_arguments
            .get(name)
            .ok_or_else(|| RabtError::MissingOverride {
                name: name.to_string(),
                implementation: self.implementation(),
            })
    }

    /// Assigns every configured property override to a freshly built object.
    pub(crate) fn apply_property_overrides(&self, target: &mut (dyn Any + Send + Sync)) {
        for property in self.blueprint.properties() {
            if let Some(value) = self.property_values.get(property.name()) {
                let assigned = property.assign(target, value.as_any());
                trace!(property = property.name(), assigned, "property override applied");
            }
        }
    }

    pub fn constructor_argument_names(&self) -> impl Iterator<Item = &str> {
        self.constructor_arguments.keys().map(String::as_str)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.property_values.keys().map(String::as_str)
    }
}

impl fmt::Debug for DependencyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyDescriptor")
            .field("implementation", &self.implementation())
            .field("constructor_arguments", &self.constructor_arguments)
            .field("property_values", &self.property_values)
            .finish()
    }
}
