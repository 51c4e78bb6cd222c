//! Adapter configuration.
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```
//! use horizon_sections::{AdapterConfig, OutOfRangePolicy};
//!
//! let config = AdapterConfig::from_toml_str(r#"
//!     out_of_range = "ignore"
//!     lock_structure_while_dragging = true
//! "#).unwrap();
//!
//! assert_eq!(config.out_of_range, OutOfRangePolicy::Ignore);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};

/// What list-view callbacks do when asked about a position that no longer exists.
///
/// Hosting views may request stale positions while they resynchronize, so
/// release builds ignore them by default while debug builds fail loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Panic with a descriptive message.
    Panic,
    /// Log a warning and report `SectionError::OutOfRange` without side effects.
    Ignore,
}

impl Default for OutOfRangePolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Ignore
        }
    }
}

/// Configuration for a [`SectionAdapter`](crate::SectionAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Behavior of `type_at`, `identity_at`, `bind` and `section_name_at`
    /// for positions past the end of the list.
    pub out_of_range: OutOfRangePolicy,
    /// Reject structural mutations while a drag gesture is active.
    pub lock_structure_while_dragging: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            out_of_range: OutOfRangePolicy::default(),
            lock_structure_while_dragging: true,
        }
    }
}

impl AdapterConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML document.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SectionError::Config(e.to_string()))
    }

    /// Serializes this configuration to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SectionError::Config(e.to_string()))
    }

    /// Sets the out-of-range policy.
    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Sets whether structural mutations are rejected during a drag.
    pub fn with_structure_lock(mut self, locked: bool) -> Self {
        self.lock_structure_while_dragging = locked;
        self
    }
}
