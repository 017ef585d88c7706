//! Custom Resource Definitions
//!
//! This module contains the CephBlockPool resource and the pool spec types
//! it carries.

mod block_pool;
mod pool;

pub use block_pool::{
    CephBlockPool, CephBlockPoolSpec, CephBlockPoolStatus, Condition, ConditionStatus, PoolPhase,
};

pub use pool::{
    ErasureCodedSpec, HybridStorageSpec, MirroringSpec, NamedPoolSpec, PoolSpec, QuotaSpec,
    ReplicatedSpec, SnapshotScheduleSpec,
};
