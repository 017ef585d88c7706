//! poolguard - Admission Validation for Ceph Block Pools
//!
//! Decides whether a `CephBlockPool` may be created or updated. A pool must
//! select exactly one redundancy strategy (replication or erasure coding),
//! erasure coded chunk counts must meet their minimums, ceph's built-in pools
//! may never be erasure coded, and once created a pool keeps its name and
//! its strategy.
//!
//! # Architecture
//!
//! ```text
//! Admission boundary ──▶ Validator (create/update/delete)
//!                            │
//!                            ├── Tier 1: validate_pool_spec (always)
//!                            └── Tier 2: name/strategy immutability (UPDATE)
//! ```
//!
//! The crate does no I/O and holds no state across calls. Serving admission
//! reviews, persisting resources and provisioning storage are left to the host.
//!
//! # Modules
//!
//! - [`config`] - Validator configuration
//! - [`crd`] - CephBlockPool resource and pool spec types
//! - [`error`] - Error types
//! - [`validation`] - Admission validators and rules

pub mod config;
pub mod crd;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use config::ValidatorConfig;
pub use crd::{CephBlockPool, CephBlockPoolSpec, NamedPoolSpec, PoolSpec};
pub use error::{Error, Result, ValidationError};
pub use validation::{PoolSpecValidator, Strategy, StrategyKind, Validator};
