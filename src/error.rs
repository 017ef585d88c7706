//! Error types for CephBlockPool admission validation

use thiserror::Error;

use crate::validation::StrategyKind;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating pool resources
#[derive(Error, Debug)]
pub enum Error {
    /// The resource was rejected by admission validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// YAML manifest could not be decoded
    #[error("Failed to parse YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON manifest could not be decoded
    #[error("Failed to parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a CephBlockPool is rejected at admission.
///
/// The `Display` output is the human-readable message surfaced to the
/// resource author; [`ValidationError::reason`] is the stable reason code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A ceph built-in pool requested erasure coding
    #[error("invalid CephBlockPool spec: ceph built-in pool {pool:?} cannot be erasure coded")]
    ReservedPoolErasureCoded { pool: String },

    /// Neither replicated nor erasure coded fields are set
    #[error("invalid pool spec: either of erasurecoded or replicated fields should be set")]
    NoStrategyConfigured,

    /// Replicated and erasure coded fields are both set
    #[error("invalid pool spec: both erasurecoded and replicated fields cannot be set at the same time")]
    BothStrategiesConfigured,

    /// Erasure coded data chunks set below the minimum of 2
    #[error("invalid pool spec: erasurecoded.datachunks needs minimum value of 2, got {data_chunks}")]
    DataChunksTooLow { data_chunks: u32 },

    /// Erasure coded coding chunks set below the minimum of 1
    #[error("invalid pool spec: erasurecoded.codingchunks needs minimum value of 1, got {coding_chunks}")]
    CodingChunksTooLow { coding_chunks: u32 },

    /// Update attempted to rename the pool
    #[error("invalid update: pool name cannot be changed from {old:?} to {new:?}")]
    ImmutableNameChanged { old: String, new: String },

    /// Update attempted to switch the redundancy strategy
    #[error("invalid update: {from} field is set already in previous object. cannot be changed to use {to}")]
    StrategyChangeForbidden { from: StrategyKind, to: StrategyKind },
}

impl ValidationError {
    /// Machine-readable reason code for admission responses
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::ReservedPoolErasureCoded { .. } => "ReservedPoolErasureCoded",
            ValidationError::NoStrategyConfigured => "NoStrategyConfigured",
            ValidationError::BothStrategiesConfigured => "BothStrategiesConfigured",
            ValidationError::DataChunksTooLow { .. } => "DataChunksTooLow",
            ValidationError::CodingChunksTooLow { .. } => "CodingChunksTooLow",
            ValidationError::ImmutableNameChanged { .. } => "ImmutableNameChanged",
            ValidationError::StrategyChangeForbidden { .. } => "StrategyChangeForbidden",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
