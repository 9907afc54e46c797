//! Container settings.
//!
//! Settings are plain serde data so they can live in any configuration file
//! an application already reads.

use serde::{Deserialize, Serialize};

/// Tunables applied when a [`Container`](crate::Container) is created.
///
/// # Examples
/// ```
/// use rabt_container::Settings;
///
/// let settings = Settings::default().with_eager_cycle_check(false);
/// assert!(!settings.eager_cycle_check);
/// assert!(settings.auto_register);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reject bindings that close a constructor cycle when they are made,
    /// instead of on the first resolution that walks the cycle.
    pub eager_cycle_check: bool,

    /// Resolve unbound concrete types by binding them to themselves.
    pub auto_register: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            eager_cycle_check: true,
            auto_register: true,
        }
    }
}

impl Settings {
    pub fn with_eager_cycle_check(mut self, enabled: bool) -> Self {
        self.eager_cycle_check = enabled;
        self
    }

    pub fn with_auto_register(mut self, enabled: bool) -> Self {
        self.auto_register = enabled;
        self
    }
}
