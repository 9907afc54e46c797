//! # Rabt: Dependency Injection Container for Rust
//!
//! Binds capabilities (`dyn Trait`s) to components and builds object graphs
//! by resolving constructor parameters, with cycle detection, singleton
//! caching and lazy resolution. Bindings can also be loaded from text files
//! through [`dsl`].
//!
//! ```
//! use rabt::prelude::*;
//! use std::sync::Arc;
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//! capability!(Greeter);
//!
//! #[derive(Component)]
//! #[component(provides = "dyn Greeter")]
//! struct Polite {
//!     name: String,
//! }
//!
//! impl Greeter for Polite {
//!     fn greet(&self) -> String {
//!         format!("Good day, {}", self.name)
//!     }
//! }
//!
//! let mut container = Container::new();
//! container
//!     .bind::<dyn Greeter, Polite>()?
//!     .with_constructor_argument("name", String::from("Ada"))?;
//!
//! let greeter: Arc<dyn Greeter> = container.get()?;
//! assert_eq!(greeter.greet(), "Good day, Ada");
//! # Ok::<(), RabtError>(())
//! ```

pub use rabt_container::*;
pub use rabt_container::capability;
pub use rabt_dsl as dsl;
pub use rabt_macros::Component;
pub use rabt_support::*;

pub mod prelude {
    pub use rabt_container::prelude::*;
    pub use rabt_macros::Component;
}
