//! Error types for container configuration and resolution.
//!
//! Messages name the types involved by their simple names, the same names
//! used in binding files, and add a hint where a fix is obvious.

use std::fmt;

use rabt_support::rendering::render_chain;

use crate::key::TypeKey;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum RabtError {
    /// Requested abstraction has no binding.
    #[error("{}", .0)]
    NotRegistered(NotRegisteredError),

    /// A type depends on itself through constructor parameters.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// A build closure failed, or asked for an argument it did not declare.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: TypeKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The capability already has a binding.
    #[error("{}", .0)]
    AlreadyRegistered(AlreadyRegisteredError),

    #[error("'{key}' and '{key}' types must be different")]
    SelfBinding { key: TypeKey },

    /// A type was used in a binding role it cannot play.
    #[error("{}", .0)]
    WrongKind(WrongKindError),

    /// The implementation does not declare the capability among the ones it provides.
    #[error("'{implementation}' does not provide '{capability}'\n  Hint: Add .provides(...) for {capability} to the shape of {implementation}")]
    NotImplemented {
        capability: TypeKey,
        implementation: TypeKey,
    },

    #[error("No binding is being configured\n  Hint: Call .bind::<I, C>() first")]
    NoActiveBinding,

    #[error("{kind} '{name}' already registered for '{implementation}'")]
    DuplicateOverride {
        kind: OverrideKind,
        name: String,
        implementation: TypeKey,
    },

    #[error("No constructor was found with parameter '{name}' in type '{implementation}'")]
    UnknownParameter { name: String, implementation: TypeKey },

    #[error("Property '{name}' not found in type '{implementation}'")]
    UnknownProperty { name: String, implementation: TypeKey },

    #[error("{kind} '{name}' of '{implementation}' expects {expected}, got {actual}")]
    OverrideTypeMismatch {
        kind: OverrideKind,
        name: String,
        implementation: TypeKey,
        expected: TypeKey,
        actual: TypeKey,
    },

    #[error("No value configured for parameter '{name}' of '{implementation}'\n  Hint: Call .with_constructor_argument(\"{name}\", ...) on its binding")]
    MissingOverride { name: String, implementation: TypeKey },

    #[error("'{key}' declares no constructor")]
    NoUsableConstructor { key: TypeKey },
}

impl RabtError {
    /// Wraps a failure raised while building `key`.
    pub fn construction(
        key: TypeKey,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RabtError::ConstructionFailed {
            key,
            source: source.into(),
        }
    }

    /// Whether the error came from configuring bindings or from resolving.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RabtError::AlreadyRegistered(_)
            | RabtError::SelfBinding { .. }
            | RabtError::WrongKind(_)
            | RabtError::NotImplemented { .. }
            | RabtError::NoActiveBinding
            | RabtError::DuplicateOverride { .. }
            | RabtError::UnknownParameter { .. }
            | RabtError::UnknownProperty { .. }
            | RabtError::OverrideTypeMismatch { .. } => ErrorCategory::Configuration,
            RabtError::NotRegistered(_)
            | RabtError::MissingOverride { .. }
            | RabtError::NoUsableConstructor { .. }
            | RabtError::ConstructionFailed { .. } => ErrorCategory::Resolution,
            // Raised by both bind (eager check) and resolve.
            RabtError::CircularDependency(_) => ErrorCategory::Resolution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
}

/// Which kind of override a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    ConstructorArgument,
    Property,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideKind::ConstructorArgument => write!(f, "Parameter"),
            OverrideKind::Property => write!(f, "Property"),
        }
    }
}

/// Error when an abstraction has no binding.
#[derive(Debug)]
pub struct NotRegisteredError {
    pub requested: TypeKey,
    /// The type whose constructor asked for it, if any.
    pub required_by: Option<TypeKey>,
    /// Registered capabilities with similar names.
    pub suggestions: Vec<String>,
}

impl fmt::Display for NotRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type not registered: {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Did you forget to bind {} to an implementation?",
            self.requested
        )
    }
}

/// Error when a constructor dependency cycle is found.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// Types from the first one entered to the repeated one.
    /// Example: `[Invoice, Product, Invoice]`
    pub chain: Vec<TypeKey>,
}

impl CircularDependencyError {
    /// The type that closes the cycle.
    pub fn culprit(&self) -> Option<TypeKey> {
        self.chain.last().copied()
    }
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.culprit() {
            Some(culprit) => write!(
                f,
                "Circular constructor parameter reference for type '{culprit}'"
            )?,
            None => write!(f, "Circular constructor parameter reference")?,
        }

        let names: Vec<String> = self.chain.iter().map(|key| key.to_string()).collect();
        write!(f, "\n  {}", render_chain(&names))?;

        write!(
            f,
            "\n  Hint: Consider lazy resolution or restructuring your dependencies"
        )
    }
}

/// Error when a capability is bound twice.
#[derive(Debug)]
pub struct AlreadyRegisteredError {
    pub capability: TypeKey,
    /// The implementation of the rejected binding.
    pub implementation: TypeKey,
    /// The implementation already bound.
    pub existing: TypeKey,
}

impl fmt::Display for AlreadyRegisteredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Duplicate register of binding '{}' => '{}'",
            self.capability, self.implementation
        )?;
        write!(
            f,
            "\n  {} is already bound to {}",
            self.capability, self.existing
        )
    }
}

/// The role a type was used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole {
    Capability,
    Implementation,
}

/// Error when an abstraction is used as implementation or a concrete type as capability.
#[derive(Debug)]
pub struct WrongKindError {
    pub key: TypeKey,
    pub role: BindingRole,
}

impl fmt::Display for WrongKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            BindingRole::Implementation => {
                write!(f, "'{}' cannot be an interface", self.key)?;
                write!(f, "\n  Hint: Bind it to a concrete component instead")
            }
            BindingRole::Capability => {
                write!(f, "'{}' must be an interface to be bound", self.key)?;
                write!(
                    f,
                    "\n  Hint: Concrete types are resolved without a binding; declare a capability! trait for it"
                )
            }
        }
    }
}

/// Convenient Result type for container operations.
pub type Result<T> = std::result::Result<T, RabtError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Bar, IBar, Invoice, Product};

    #[test]
    fn not_registered_error_display() {
        let err = RabtError::NotRegistered(NotRegisteredError {
            requested: TypeKey::of::<dyn IBar>(),
            required_by: Some(TypeKey::of::<Bar>()),
            suggestions: vec!["IBaz".to_string()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("not registered: IBar"));
        assert!(msg.contains("Required by: Bar"));
        assert!(msg.contains("- IBaz"));
    }

    #[test]
    fn circular_dependency_error_display() {
        let err = RabtError::CircularDependency(CircularDependencyError {
            chain: vec![
                TypeKey::of::<Invoice>(),
                TypeKey::of::<Product>(),
                TypeKey::of::<Invoice>(),
            ],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Circular constructor parameter reference for type 'Invoice'"));
        assert!(msg.contains("Invoice → Product → Invoice"));
    }

    #[test]
    fn duplicate_binding_names_both_types() {
        let err = RabtError::AlreadyRegistered(AlreadyRegisteredError {
            capability: TypeKey::of::<dyn IBar>(),
            implementation: TypeKey::of::<Bar>(),
            existing: TypeKey::of::<Bar>(),
        });
        assert!(err.to_string().starts_with("Duplicate register of binding 'IBar' => 'Bar'"));
    }

    #[test]
    fn self_binding_display() {
        let err = RabtError::SelfBinding {
            key: TypeKey::of::<Bar>(),
        };
        assert_eq!(err.to_string(), "'Bar' and 'Bar' types must be different");
    }

    #[test]
    fn wrong_kind_display() {
        let err = RabtError::WrongKind(WrongKindError {
            key: TypeKey::of::<dyn IBar>(),
            role: BindingRole::Implementation,
        });
        assert!(err.to_string().starts_with("'IBar' cannot be an interface"));
    }

    #[test]
    fn override_messages() {
        let err = RabtError::DuplicateOverride {
            kind: OverrideKind::ConstructorArgument,
            name: "name".to_string(),
            implementation: TypeKey::of::<Bar>(),
        };
        assert!(err.to_string().starts_with("Parameter 'name' already registered"));

        let err = RabtError::DuplicateOverride {
            kind: OverrideKind::Property,
            name: "counter".to_string(),
            implementation: TypeKey::of::<Bar>(),
        };
        assert!(err.to_string().starts_with("Property 'counter' already registered"));
    }

    #[test]
    fn categories() {
        assert_eq!(RabtError::NoActiveBinding.category(), ErrorCategory::Configuration);
        assert_eq!(
            RabtError::NoUsableConstructor {
                key: TypeKey::of::<Bar>()
            }
            .category(),
            ErrorCategory::Resolution
        );
        assert_eq!(
            RabtError::construction(TypeKey::of::<Bar>(), "boom").category(),
            ErrorCategory::Resolution
        );
    }
}
