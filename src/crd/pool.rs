//! Pool specification types
//!
//! Describes the redundancy strategy and tuning of a Ceph storage pool.
//! These types are shared by every pool-bearing resource; [`NamedPoolSpec`]
//! is the normalized view the validator works on.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// PoolSpec
// =============================================================================

/// Redundancy strategy and placement settings for a storage pool.
///
/// Exactly one of `replicated` or `erasure_coded` is expected to be set;
/// an all-zero sub-spec means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolSpec {
    /// Failure domain across which data is spread (host, rack, zone, ...)
    #[serde(default)]
    pub failure_domain: String,

    /// Root of the CRUSH hierarchy used by the pool
    #[serde(default)]
    pub crush_root: String,

    /// Device class the pool is placed on
    #[serde(default)]
    pub device_class: String,

    /// Inline compression mode. Empty means compression is disabled.
    #[serde(default)]
    pub compression_mode: String,

    /// Replication settings
    #[serde(default)]
    pub replicated: ReplicatedSpec,

    /// Erasure coding settings
    #[serde(default)]
    pub erasure_coded: ErasureCodedSpec,

    /// Free-form pool parameters passed through to the storage system
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Whether RBD per-image IO statistics are collected
    #[serde(default, rename = "enableRBDStats")]
    pub enable_rbd_stats: bool,

    /// Mirroring settings
    #[serde(default)]
    pub mirroring: MirroringSpec,

    /// Pool quotas
    #[serde(default)]
    pub quotas: QuotaSpec,
}

impl PoolSpec {
    /// Check if the pool uses replication
    pub fn is_replicated(&self) -> bool {
        self.replicated.size > 0
    }

    /// Check if the pool uses erasure coding
    pub fn is_erasure_coded(&self) -> bool {
        self.erasure_coded.is_configured()
    }

    /// Check if the pool spreads replicas over two device classes
    pub fn is_hybrid_storage_pool(&self) -> bool {
        self.replicated.hybrid_storage.is_some()
    }

    /// Check if inline compression is enabled
    pub fn is_compression_enabled(&self) -> bool {
        !self.compression_mode.is_empty()
    }
}

// =============================================================================
// Replication
// =============================================================================

/// Replication settings. `size == 0` and `target_size_ratio == 0` means unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicatedSpec {
    /// Number of copies of each object
    #[serde(default)]
    pub size: u32,

    /// Expected share of cluster capacity consumed by this pool
    #[serde(default)]
    pub target_size_ratio: f64,

    /// Refuse to create the pool with a size of 1
    #[serde(default)]
    pub require_safe_replica_size: bool,

    /// Number of replicas placed in each failure domain
    #[serde(default)]
    pub replicas_per_failure_domain: u32,

    /// Failure domain used below `replicas_per_failure_domain`
    #[serde(default)]
    pub sub_failure_domain: String,

    /// Primary/secondary device class split for hybrid pools
    #[serde(default)]
    pub hybrid_storage: Option<HybridStorageSpec>,
}

impl ReplicatedSpec {
    /// Check if a target size ratio was given
    pub fn is_target_ratio_enabled(&self) -> bool {
        self.target_size_ratio != 0.0
    }

    /// Check if any replication field selects the replicated strategy
    pub fn is_configured(&self) -> bool {
        self.size > 0 || self.target_size_ratio > 0.0
    }

    /// Check if both sizing fields are exactly zero.
    ///
    /// Not the negation of [`is_configured`](Self::is_configured): a negative
    /// or NaN ratio is neither configured nor unset.
    pub fn is_unset(&self) -> bool {
        self.size == 0 && self.target_size_ratio == 0.0
    }
}

/// Hybrid storage: primary copy on one device class, the rest on another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HybridStorageSpec {
    /// Device class holding the primary copy
    pub primary_device_class: String,

    /// Device class holding the secondary copies
    pub secondary_device_class: String,
}

// =============================================================================
// Erasure Coding
// =============================================================================

/// Erasure coding settings (k data chunks + m coding chunks)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErasureCodedSpec {
    /// Number of coding chunks (m). Up to m chunks may be lost.
    #[serde(default)]
    pub coding_chunks: u32,

    /// Number of data chunks (k)
    #[serde(default)]
    pub data_chunks: u32,

    /// Erasure coding plugin/algorithm, e.g. "jerasure" or "isa"
    #[serde(default)]
    pub algorithm: String,
}

impl ErasureCodedSpec {
    /// Check if a chunk count selects the erasure coded strategy
    pub fn is_configured(&self) -> bool {
        self.coding_chunks > 0 || self.data_chunks > 0
    }

    /// Check if any erasure coding field is set, algorithm included
    pub fn is_requested(&self) -> bool {
        self.is_configured() || !self.algorithm.is_empty()
    }
}

// =============================================================================
// Mirroring & Quotas
// =============================================================================

/// RBD mirroring settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirroringSpec {
    /// Whether mirroring is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Mirroring mode: "pool" or "image"
    #[serde(default)]
    pub mode: String,

    /// Snapshot schedules for snapshot-based mirroring
    #[serde(default)]
    pub snapshot_schedules: Vec<SnapshotScheduleSpec>,
}

impl MirroringSpec {
    /// Check if any snapshot schedule is desired
    pub fn snapshot_schedules_enabled(&self) -> bool {
        !self.snapshot_schedules.is_empty()
    }
}

/// A mirroring snapshot schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotScheduleSpec {
    /// Interval between snapshots, e.g. "24h" or "1d"
    #[serde(default)]
    pub interval: String,

    /// Start time of the schedule, e.g. "14:00:00-05:00"
    #[serde(default)]
    pub start_time: String,
}

/// Pool quotas. Unset fields mean no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSpec {
    #[serde(default)]
    pub max_bytes: Option<u64>,

    #[serde(default)]
    pub max_objects: Option<u64>,
}

// =============================================================================
// NamedPoolSpec
// =============================================================================

/// A pool spec paired with its effective pool name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedPoolSpec {
    /// Effective pool name
    pub name: String,

    #[serde(flatten)]
    pub spec: PoolSpec,
}

impl NamedPoolSpec {
    pub fn new(name: impl Into<String>, spec: PoolSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
