//! Admission validation for pool resources
//!
//! The host (an admission webhook, a controller, a CLI linter) calls into a
//! [`Validator`] on every create, update and delete of a resource. Checks
//! are organized in two tiers:
//! - Tier 1 (Spec): always enforced, see [`validate_pool_spec`]
//! - Tier 2 (Update): only enforced on UPDATE operations (name and
//!   strategy immutability)
//!
//! Validation is synchronous and side-effect free; decisions are logged
//! through `tracing` and never depend on the installed subscriber.

mod block_pool;
mod pool_spec;
mod proptest;
mod strategy;

pub use block_pool::validate_ceph_block_pool;
pub use pool_spec::{validate_pool_spec, MIN_CODING_CHUNKS, MIN_DATA_CHUNKS};
pub use strategy::{Strategy, StrategyKind};

use crate::config::ValidatorConfig;
use crate::error::ValidationError;

/// Admission hooks for a resource kind `K`
pub trait Validator<K> {
    /// Validate a resource being created
    fn validate_create(&self, obj: &K) -> Result<(), ValidationError>;

    /// Validate the transition from `old` to `obj`
    fn validate_update(&self, obj: &K, old: &K) -> Result<(), ValidationError>;

    /// Validate a resource being deleted. Deletion is allowed by default.
    fn validate_delete(&self, _obj: &K) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Stateless validator for CephBlockPool resources
#[derive(Debug, Clone, Default)]
pub struct PoolSpecValidator {
    config: ValidatorConfig,
}

impl PoolSpecValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Get the validator configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}
