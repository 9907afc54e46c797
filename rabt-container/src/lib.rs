//! Core container implementation for Rabt DI.
//!
//! Capabilities (`dyn Trait`s) are bound to components whose constructors,
//! properties and provided capabilities are declared up front through
//! [`Component::shape`]. The [`Container`] then builds object graphs by
//! resolving constructor parameters recursively.

pub mod binding;
pub mod cache;
pub mod config;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod key;
pub mod lazy;
pub mod provider;
pub mod registry;
pub mod scope;
pub mod shape;

mod blueprint;
mod graph;
mod resolver;

#[cfg(test)]
pub(crate) mod fixtures;

pub use binding::{Binding, BindingBuilder};
pub use cache::SingletonCache;
pub use config::Settings;
pub use container::{Container, SharedContainer, prelude};
pub use descriptor::{DependencyDescriptor, OverrideValue};
pub use error::{ErrorCategory, RabtError, Result};
pub use instance::Instance;
pub use key::{Resolvable, TypeInfo, TypeKey, TypeKind};
pub use lazy::LazyHandle;
pub use provider::Provider;
pub use registry::BindingRegistry;
pub use scope::Scope;
pub use shape::{Args, Component, Param, ParamKind, Shape};
