//! Name to type lookup for binding files.
//!
//! Types are registered either explicitly with [`TypeCatalog::with`] or
//! process-wide with the [`catalog!`](crate::catalog) macro, which submits
//! entries through `inventory` and makes them visible to
//! [`TypeCatalog::global`].

use std::collections::HashMap;

use rabt_container::{Resolvable, TypeInfo};
use tracing::{trace, warn};

/// Registry entry submitted by [`catalog!`](crate::catalog).
pub struct CatalogEntry {
    describe: fn() -> TypeInfo,
}

impl CatalogEntry {
    pub const fn new(describe: fn() -> TypeInfo) -> Self {
        Self { describe }
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.describe)()
    }
}

inventory::collect!(CatalogEntry);

/// Makes types available to [`TypeCatalog::global`] by simple name.
///
/// ```ignore
/// rabt_dsl::catalog!(dyn IBar, Bar, dyn IFoo, Foo);
/// ```
#[macro_export]
macro_rules! catalog {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__private::inventory::submit! {
                $crate::CatalogEntry::new(<$ty as $crate::__private::Resolvable>::type_info)
            }
        )+
    };
}

/// Types a binding file may name, keyed by simple name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, TypeInfo>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything registered with [`catalog!`](crate::catalog) in this process.
    ///
    /// Registration order across crates is unspecified, so two types sharing
    /// a simple name resolve to either one.
    pub fn global() -> Self {
        let mut catalog = Self::new();
        for entry in inventory::iter::<CatalogEntry> {
            catalog.insert(entry.type_info());
        }
        trace!(types = catalog.len(), "Collected global type catalog");
        catalog
    }

    /// Adds `T` and returns the catalog, for building one inline.
    pub fn with<T: Resolvable + ?Sized>(mut self) -> Self {
        self.insert(T::type_info());
        self
    }

    /// Adds a type under its simple name; the first type with a name wins.
    pub fn insert(&mut self, info: TypeInfo) -> bool {
        let name = info.key().simple_name();
        if let Some(existing) = self.types.get(&name) {
            if *existing != info {
                warn!(
                    name = %name,
                    kept = existing.key().type_name(),
                    ignored = info.key().type_name(),
                    "Type name already in catalog"
                );
            }
            return false;
        }
        self.types.insert(name, info);
        true
    }

    pub fn find(&self, name: &str) -> Option<TypeInfo> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Known names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
