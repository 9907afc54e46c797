//! Statically declared component shapes.
//!
//! A [`Component`] tells the container how it is built instead of the
//! container discovering it at runtime:
//! - its constructors, each an ordered list of named [`Param`]s and a build
//!   closure receiving the resolved [`Args`]
//! - the properties that can be assigned after construction
//! - the capabilities (`dyn Trait`s) it can be exposed as
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use rabt_container::{Component, Param, Shape, capability};
//!
//! pub trait Engine: Send + Sync {}
//! capability!(Engine);
//!
//! struct Diesel {
//!     cylinders: u8,
//!     label: String,
//! }
//! impl Engine for Diesel {}
//!
//! impl Component for Diesel {
//!     fn shape() -> Shape<Self> {
//!         Shape::new()
//!             .constructor([Param::value::<u8>("cylinders")], |args| {
//!                 Ok(Diesel { cylinders: args.value("cylinders")?, label: String::new() })
//!             })
//!             .property("label", |diesel: &mut Diesel, label: String| diesel.label = label)
//!             .provides(|diesel: Arc<Diesel>| -> Arc<dyn Engine> { diesel })
//!     }
//! }
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::blueprint::{CastFn, ConstructorSpec, Erased, PropertySpec, SetFn};
use crate::descriptor::OverrideValue;
use crate::error::{RabtError, Result};
use crate::instance::Instance;
use crate::key::{Resolvable, TypeInfo, TypeKey};

/// A concrete type the container knows how to construct.
pub trait Component: Sized + Send + Sync + 'static {
    /// Declares constructors, properties and provided capabilities.
    fn shape() -> Shape<Self>;
}

impl<C: Component> Resolvable for C {
    fn type_info() -> TypeInfo {
        TypeInfo::component::<C>()
    }
}

/// How a constructor parameter gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Supplied by a constructor-argument override on the binding.
    Value(TypeKey),
    /// Resolved recursively by the container.
    Object(TypeInfo),
}

/// A named constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    name: &'static str,
    kind: ParamKind,
}

impl Param {
    /// A value-kind parameter: primitives, strings, enums, configuration.
    pub fn value<T: Clone + Send + Sync + 'static>(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Value(TypeKey::of::<T>()),
        }
    }

    /// An object-kind parameter, received as `Arc<T>`.
    pub fn object<T: Resolvable + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Object(T::type_info()),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_value(&self) -> bool {
        matches!(self.kind, ParamKind::Value(_))
    }
}

/// Declared shape of a component `C`.
///
/// Built fluently inside [`Component::shape`]. Constructors are kept in
/// declaration order, which breaks ties when the container picks the
/// constructor with the fewest parameters.
pub struct Shape<C> {
    pub(crate) constructors: Vec<ConstructorSpec>,
    pub(crate) properties: Vec<PropertySpec>,
    pub(crate) provisions: Vec<(TypeKey, CastFn)>,
    marker: PhantomData<fn() -> C>,
}

impl<C: Component> Shape<C> {
    pub fn new() -> Self {
        Self {
            constructors: Vec::new(),
            properties: Vec::new(),
            provisions: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Declares a constructor taking `params` in order.
    pub fn constructor<I, F>(mut self, params: I, build: F) -> Self
    where
        I: IntoIterator<Item = Param>,
        F: Fn(&Args) -> Result<C> + Send + Sync + 'static,
    {
        let build = Arc::new(move |args: &Args| build(args).map(|component| Box::new(component) as Erased));
        self.constructors
            .push(ConstructorSpec::new(params.into_iter().collect(), build));
        self
    }

    /// Declares a property assignable through `with_property_value`.
    pub fn property<T, F>(mut self, name: &'static str, set: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&mut C, T) + Send + Sync + 'static,
    {
        let set: SetFn = Arc::new(
            move |target: &mut (dyn Any + Send + Sync), value: &(dyn Any + Send + Sync)| {
                match (target.downcast_mut::<C>(), value.downcast_ref::<T>()) {
                    (Some(target), Some(value)) => {
                        set(target, value.clone());
                        true
                    }
                    _ => false,
                }
            },
        );
        self.properties
            .push(PropertySpec::new(name, TypeKey::of::<T>(), set));
        self
    }

    /// Declares that `C` can be exposed as the capability `I`.
    pub fn provides<I>(mut self, upcast: fn(Arc<C>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let cast: CastFn = Arc::new(move |object: Erased| {
            object
                .downcast::<C>()
                .ok()
                .map(|component| Instance::new(upcast(Arc::from(component))))
        });
        self.provisions.push((TypeKey::of::<I>(), cast));
        self
    }
}

impl<C: Component> Default for Shape<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Shape<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("component", &type_name::<C>())
            .field("constructors", &self.constructors.len())
            .field("properties", &self.properties.len())
            .field("provides", &self.provisions.len())
            .finish()
    }
}

enum Argument {
    Value(OverrideValue),
    Object(Instance),
}

/// Resolved arguments handed to a constructor's build closure.
pub struct Args {
    owner: TypeKey,
    entries: HashMap<&'static str, Argument>,
}

impl Args {
    pub(crate) fn new(owner: TypeKey) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn push_value(&mut self, name: &'static str, value: OverrideValue) {
        self.entries.insert(name, Argument::Value(value));
    }

    pub(crate) fn push_object(&mut self, name: &'static str, instance: Instance) {
        self.entries.insert(name, Argument::Object(instance));
    }

    /// Takes a value-kind argument.
    pub fn value<T: Clone + 'static>(&self, name: &str) -> Result<T> {
        match self.entries.get(name) {
            Some(Argument::Value(value)) => value
                .downcast_ref::<T>()
                .cloned()
                .ok_or_else(|| self.mismatch(name, type_name::<T>())),
            Some(Argument::Object(_)) => Err(self.mismatch(name, type_name::<T>())),
            None => Err(self.undeclared(name)),
        }
    }

    /// Takes an object-kind argument.
    pub fn object<T: ?Sized + 'static>(&self, name: &str) -> Result<Arc<T>> {
        match self.entries.get(name) {
            Some(Argument::Object(instance)) => instance
                .downcast::<T>()
                .ok_or_else(|| self.mismatch(name, type_name::<T>())),
            Some(Argument::Value(_)) => Err(self.mismatch(name, type_name::<T>())),
            None => Err(self.undeclared(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn undeclared(&self, name: &str) -> RabtError {
        RabtError::construction(
            self.owner,
            format!("argument '{name}' is not a parameter of the selected constructor"),
        )
    }

    fn mismatch(&self, name: &str, expected: &str) -> RabtError {
        RabtError::construction(
            self.owner,
            format!("argument '{name}' is not a {expected}"),
        )
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("Args")
            .field("owner", &self.owner)
            .field("names", &names)
            .finish()
    }
}
