//! Text binding DSL for Rabt DI.
//!
//! A binding file holds one binding per line:
//! ```text
//! // comments and blank lines are skipped
//! IBar -> Bar;
//! IFoo -> Foo;
//! ```
//! Names are matched against a [`TypeCatalog`] by their simple names.
//! Lines naming unknown types are skipped.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod parser;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{CatalogEntry, TypeCatalog};
pub use error::{DslError, Result};
pub use loader::DependencyFile;
pub use parser::{DependencyParser, split_line};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
    pub use rabt_container::Resolvable;
}
