//! Configuration for the SQL injection guard.
//!
//! Configuration is loaded from environment variables following the 12-factor app pattern.

use crate::constants::{
    DEFAULT_DEEP_LISTS, DEFAULT_ENABLED, DEFAULT_LOG_VALUES, ENV_DEEP_LISTS, ENV_ENABLED,
    ENV_LOG_VALUES,
};
use serde::{Deserialize, Serialize};

/// Runtime switches for the structural validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Run the rules at all; when off every scan is clean
    pub enabled: bool,

    /// Walk mappings and lists found inside lists, not just direct strings
    pub deep_lists: bool,

    /// Include offending values in warning logs
    pub log_values: bool,
}

impl ScannerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SQLGUARD_ENABLED`: Enable scanning (default: true)
    /// - `SQLGUARD_DEEP_LISTS`: Walk containers nested in lists (default: false)
    /// - `SQLGUARD_LOG_VALUES`: Log offending values (default: false)
    pub fn from_env() -> Self {
        Self {
            enabled: env_flag(ENV_ENABLED, DEFAULT_ENABLED),
            deep_lists: env_flag(ENV_DEEP_LISTS, DEFAULT_DEEP_LISTS),
            log_values: env_flag(ENV_LOG_VALUES, DEFAULT_LOG_VALUES),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            deep_lists: DEFAULT_DEEP_LISTS,
            log_values: DEFAULT_LOG_VALUES,
        }
    }
}

/// Read a boolean flag; unrecognized values fall back to `default`.
fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}
