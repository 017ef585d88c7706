//! CephBlockPool Custom Resource Definition
//!
//! Defines the schema for CephBlockPool resources, the block storage pools
//! whose specs are checked at admission.

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::pool::{NamedPoolSpec, PoolSpec};

// =============================================================================
// CephBlockPool CRD
// =============================================================================

/// CephBlockPool declares a block storage pool.
///
/// The pool is created under `spec.name` when given, otherwise under the
/// resource's own name.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ceph.rook.io",
    version = "v1",
    kind = "CephBlockPool",
    plural = "cephblockpools",
    shortname = "cephbp",
    status = "CephBlockPoolStatus",
    printcolumn = r#"{"name": "Phase", "type": "string", "jsonPath": ".status.phase"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CephBlockPoolSpec {
    /// Pool name override. Empty means the resource name is used.
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub pool_spec: PoolSpec,
}

/// Status of a CephBlockPool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephBlockPoolStatus {
    /// Current phase of the pool
    #[serde(default)]
    pub phase: Option<PoolPhase>,

    /// Current conditions
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Pool lifecycle phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PoolPhase {
    #[default]
    Progressing,
    Ready,
    Failure,
}

/// Condition for pool status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,

    /// Status: True, False, or Unknown
    pub status: ConditionStatus,

    /// Last time the condition transitioned
    #[serde(default)]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason
    #[serde(default)]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Condition status values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

// =============================================================================
// Implementations
// =============================================================================

impl CephBlockPool {
    /// Decode a CephBlockPool from a YAML manifest
    pub fn from_yaml(manifest: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(manifest)?)
    }

    /// Decode a CephBlockPool from a JSON document
    pub fn from_json(document: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Effective pool name: the spec override, else the resource name
    pub fn pool_name(&self) -> &str {
        if self.spec.name.is_empty() {
            self.metadata.name.as_deref().unwrap_or_default()
        } else {
            &self.spec.name
        }
    }

    /// Normalize into the shape shared by all pool-bearing resources
    pub fn to_named_pool_spec(&self) -> NamedPoolSpec {
        NamedPoolSpec::new(self.pool_name(), self.spec.pool_spec.clone())
    }

    /// Mutable access to the status conditions, creating the status if absent
    pub fn status_conditions(&mut self) -> &mut Vec<Condition> {
        &mut self.status.get_or_insert_with(Default::default).conditions
    }
}

impl CephBlockPoolStatus {
    /// Update a condition, creating it if it doesn't exist
    pub fn set_condition(&mut self, condition: Condition) {
        if let Some(existing) = self
            .conditions
            .iter_mut()
            .find(|c| c.r#type == condition.r#type)
        {
            *existing = condition;
        } else {
            self.conditions.push(condition);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
