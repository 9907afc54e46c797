//! Type identification for bindings and resolution.
//!
//! [`TypeKey`] identifies a type inside the container. [`TypeInfo`] adds what
//! the container needs to know to handle the type at runtime: whether it is an
//! abstraction (a `dyn Trait` used as a capability) or a concrete component,
//! and for components how to obtain their blueprint.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use rabt_support::rendering::simple_type_name;

use crate::blueprint::Blueprint;
use crate::shape::Component;

/// Uniquely identifies a type in the container.
///
/// # Examples
/// ```
/// use rabt_container::key::TypeKey;
///
/// let key = TypeKey::of::<String>();
/// assert_eq!(key.type_name(), "alloc::string::String");
/// assert_eq!(key.simple_name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl TypeKey {
    /// Creates a key for type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of this type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the bare name without module path or `dyn ` prefix.
    ///
    /// This is the name used in error messages and binding files.
    pub fn simple_name(&self) -> String {
        simple_type_name(self.type_name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.type_name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.simple_name())
    }
}

/// The role a type can play in a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A trait object used as a lookup key. Never constructed directly.
    Abstraction,
    /// A [`Component`] with a declared shape.
    Concrete,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Abstraction => write!(f, "abstraction"),
            TypeKind::Concrete => write!(f, "concrete"),
        }
    }
}

/// Runtime description of a type the container can bind or resolve.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    key: TypeKey,
    blueprint: Option<fn() -> Blueprint>,
}

impl TypeInfo {
    /// Describes an abstraction such as `dyn Logger`.
    pub fn abstraction<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            blueprint: None,
        }
    }

    /// Describes a concrete component.
    pub fn component<C: Component>() -> Self {
        Self {
            key: TypeKey::of::<C>(),
            blueprint: Some(Blueprint::of::<C>),
        }
    }

    /// Describes any [`Resolvable`] type.
    pub fn of<T: Resolvable + ?Sized>() -> Self {
        T::type_info()
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn kind(&self) -> TypeKind {
        match self.blueprint {
            Some(_) => TypeKind::Concrete,
            None => TypeKind::Abstraction,
        }
    }

    pub fn is_abstraction(&self) -> bool {
        self.kind() == TypeKind::Abstraction
    }

    /// Builds the blueprint of a concrete type; `None` for abstractions.
    pub(crate) fn blueprint(&self) -> Option<Blueprint> {
        self.blueprint.map(|describe| describe())
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .finish()
    }
}

/// A type the container can be asked for.
///
/// Every [`Component`] is resolvable. Trait objects become resolvable
/// through the [`capability!`](crate::capability) macro.
pub trait Resolvable: 'static {
    fn type_info() -> TypeInfo;
}

/// Declares traits as capabilities, making `dyn Trait` resolvable.
///
/// ```
/// use rabt_container::{TypeInfo, TypeKind, capability};
///
/// pub trait Logger: Send + Sync {}
/// capability!(Logger);
///
/// assert_eq!(TypeInfo::of::<dyn Logger>().kind(), TypeKind::Abstraction);
/// ```
#[macro_export]
macro_rules! capability {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $crate::Resolvable for dyn $name {
                fn type_info() -> $crate::TypeInfo {
                    $crate::TypeInfo::abstraction::<dyn $name>()
                }
            }
        )+
    };
}
