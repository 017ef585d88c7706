//! Validator configuration

use serde::{Deserialize, Serialize};

/// Pool names ceph reserves for its own metadata
pub const BUILTIN_POOL_NAMES: [&str; 3] = ["device_health_metrics", ".mgr", ".nfs"];

/// Configuration for the pool spec validator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Pool names that may never be erasure coded, in addition to
    /// [`BUILTIN_POOL_NAMES`]
    pub reserved_pool_names: Vec<String>,
}

impl ValidatorConfig {
    /// Load configuration from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(document: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Check if a pool name is reserved. Built-in names always are.
    pub fn is_reserved(&self, pool_name: &str) -> bool {
        BUILTIN_POOL_NAMES.contains(&pool_name)
            || self.reserved_pool_names.iter().any(|n| n == pool_name)
    }
}

// =============================================================================
// Tests
// =============================================================================
