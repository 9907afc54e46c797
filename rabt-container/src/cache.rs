//! Singleton instance cache.

use std::collections::HashMap;

use tracing::trace;

use crate::instance::Instance;
use crate::key::TypeKey;

/// Write-once map from requested type to its singleton instance.
///
/// Entries are never replaced or evicted. The cache does no locking of its
/// own; the owning container is the unit of synchronization.
#[derive(Debug, Default)]
pub struct SingletonCache {
    instances: HashMap<TypeKey, Instance>,
}

impl SingletonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TypeKey) -> Option<&Instance> {
        self.instances.get(key)
    }

    /// Stores `instance` unless `key` already has one; returns the cached instance.
    pub fn insert(&mut self, key: TypeKey, instance: Instance) -> Instance {
        let cached = self.instances.entry(key).or_insert_with(|| {
            trace!(key = %key, "singleton cached");
            instance
        });
        cached.clone()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
