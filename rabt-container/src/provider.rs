//! Provider trait: a module of related bindings.
//!
//! # Examples
//! ```
//! use rabt_container::prelude::*;
//! # use std::sync::Arc;
//! # pub trait Clock: Send + Sync {}
//! # capability!(Clock);
//! # #[derive(Default)]
//! # struct SystemClock;
//! # impl Clock for SystemClock {}
//! # impl Component for SystemClock {
//! #     fn shape() -> Shape<Self> {
//! #         Shape::new()
//! #             .constructor([], |_| Ok(SystemClock))
//! #             .provides(|c: Arc<SystemClock>| -> Arc<dyn Clock> { c })
//! #     }
//! # }
//!
//! struct TimeProvider;
//!
//! impl Provider for TimeProvider {
//!     fn register(&self, container: &mut Container) -> Result<()> {
//!         container.bind::<dyn Clock, SystemClock>()?;
//!         Ok(())
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.install(&TimeProvider)?;
//! assert!(container.contains::<dyn Clock>());
//! # Ok::<(), RabtError>(())
//! ```

use crate::container::Container;
use crate::error::Result;

/// A module that registers related bindings into a container.
///
/// Split bindings by concern and install each provider once.
pub trait Provider: Send + Sync {
    /// Adds this provider's bindings and their overrides.
    fn register(&self, container: &mut Container) -> Result<()>;

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
