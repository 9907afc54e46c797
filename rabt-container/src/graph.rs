//! Constructor dependency cycle detection.
//!
//! Two checks share the same idea, a depth-first walk that keeps the current
//! path and fails when a type shows up on it twice:
//! - [`ResolutionPath`] tracks the types under construction during one
//!   top-level resolve call
//! - [`CycleDetector`] walks the declared constructor graph when a binding is
//!   made, before anything is constructed

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::binding::Binding;
use crate::blueprint::Blueprint;
use crate::error::{CircularDependencyError, RabtError, Result};
use crate::key::{TypeInfo, TypeKey};
use crate::registry::BindingRegistry;
use crate::shape::ParamKind;

fn cycle_error(path: &[TypeKey], key: TypeKey) -> RabtError {
    let start = path.iter().position(|k| *k == key).unwrap_or(0);
    let mut chain = path[start..].to_vec();
    chain.push(key);

    warn!(cycle = ?chain, "Circular dependency detected");
    RabtError::CircularDependency(CircularDependencyError { chain })
}

/// Types currently being constructed, in entry order.
#[derive(Debug, Default)]
pub(crate) struct ResolutionPath {
    stack: Vec<TypeKey>,
    members: HashSet<TypeKey>,
}

impl ResolutionPath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pushes `key`, failing if it is already under construction.
    pub(crate) fn enter(&mut self, key: TypeKey) -> Result<()> {
        if self.members.contains(&key) {
            return Err(cycle_error(&self.stack, key));
        }
        self.members.insert(key);
        self.stack.push(key);
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        if let Some(key) = self.stack.pop() {
            self.members.remove(&key);
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Checks that a new binding does not close a constructor cycle.
///
/// Walks the minimal constructor of each implementation, following
/// object-kind parameters through the candidate binding, the registered
/// bindings, and concrete types that would be auto-registered. Parameters
/// with no way to resolve them yet are not followed.
pub(crate) struct CycleDetector<'a> {
    registry: &'a BindingRegistry,
    candidate: &'a Binding,
    visiting: HashSet<TypeKey>,
    validated: HashSet<TypeKey>,
    path: Vec<TypeKey>,
}

impl<'a> CycleDetector<'a> {
    pub(crate) fn new(registry: &'a BindingRegistry, candidate: &'a Binding) -> Self {
        Self {
            registry,
            candidate,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Fails with the chain starting and ending at the type that closes the cycle.
    pub(crate) fn check(&mut self) -> Result<()> {
        trace!(
            capability = %self.candidate.capability(),
            implementation = %self.candidate.implementation(),
            "Checking binding for cycles"
        );
        let root = self.candidate.blueprint().clone();
        self.visit(&root)
    }

    fn visit(&mut self, blueprint: &Arc<Blueprint>) -> Result<()> {
        let key = blueprint.key();

        if self.validated.contains(&key) {
            return Ok(());
        }

        if self.visiting.contains(&key) {
            return Err(cycle_error(&self.path, key));
        }

        self.visiting.insert(key);
        self.path.push(key);

        if let Some(constructor) = blueprint.minimal_constructor() {
            for param in constructor.params() {
                if let ParamKind::Object(info) = param.kind() {
                    if let Some(next) = self.target(&info) {
                        self.visit(&next)?;
                    }
                }
            }
        }

        self.path.pop();
        self.visiting.remove(&key);
        self.validated.insert(key);
        Ok(())
    }

    fn target(&self, info: &TypeInfo) -> Option<Arc<Blueprint>> {
        let key = info.key();
        if key == self.candidate.capability() {
            return Some(self.candidate.blueprint().clone());
        }
        if let Some(binding) = self.registry.find(&key) {
            return Some(binding.blueprint().clone());
        }
        info.blueprint().map(Arc::new)
    }
}
