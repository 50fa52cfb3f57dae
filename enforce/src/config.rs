//! Sentinel configuration.
//!
//! A `SentinelConfig` names the placeholder values that mark an
//! un-overridden constant or field. One process-wide configuration backs the
//! free `configure`/`enforce` functions; an `Enforcer` may own its own.

use crate::error::ConfigError;
use mandate_core::Value;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// The literal marker both sentinels default to.
pub const DEFAULT_SENTINEL: &str = "abstract";

static SHARED: Lazy<RwLock<SentinelConfig>> =
    Lazy::new(|| RwLock::new(SentinelConfig::default()));

/// Placeholder values used to detect un-overridden members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Compared strictly against each constant's effective value.
    pub constant_sentinel: Value,
    /// Compared loosely against each field's resolved value.
    pub field_sentinel: Value,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            constant_sentinel: Value::from(DEFAULT_SENTINEL),
            field_sentinel: Value::from(DEFAULT_SENTINEL),
        }
    }
}

impl SentinelConfig {
    /// Load a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replace the sentinel for one member kind.
    pub fn set(&mut self, target: SentinelTarget, value: Value) {
        match target {
            SentinelTarget::Constant => self.constant_sentinel = value,
            SentinelTarget::Field => self.field_sentinel = value,
        }
    }

    /// Builder form of `set`.
    pub fn with(mut self, target: SentinelTarget, value: impl Into<Value>) -> Self {
        self.set(target, value.into());
        self
    }

    /// Set a sentinel by its configuration name.
    ///
    /// Returns false, leaving the configuration untouched, for unknown names.
    pub fn configure(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match name.parse::<SentinelTarget>() {
            Ok(target) => {
                let value = value.into();
                tracing::debug!(
                    target: "mandate::config",
                    sentinel = %target,
                    value = %value,
                    "sentinel updated"
                );
                self.set(target, value);
                true
            }
            Err(err) => {
                tracing::warn!(target: "mandate::config", error = %err, "configure ignored");
                false
            }
        }
    }
}

/// Which sentinel a configuration name addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelTarget {
    Constant,
    Field,
}

impl FromStr for SentinelTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default-constant" | "constant" | "default_constant_value" => Ok(Self::Constant),
            "default-property" | "property" | "default_property_value" | "field"
            | "default-field" | "default_field_value" => Ok(Self::Field),
            other => Err(ConfigError::UnknownTarget(other.to_string())),
        }
    }
}

impl std::fmt::Display for SentinelTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant => write!(f, "constant"),
            Self::Field => write!(f, "field"),
        }
    }
}

/// Set a process-wide sentinel. Affects every later call to [`crate::enforce`].
pub fn configure(name: &str, value: impl Into<Value>) -> bool {
    SHARED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .configure(name, value)
}

/// Snapshot of the process-wide configuration.
pub fn shared_config() -> SentinelConfig {
    SHARED.read().unwrap_or_else(PoisonError::into_inner).clone()
}
