//! Redundancy strategy classification
//!
//! A pool spec carries both a replicated and an erasure coded sub-spec, and
//! which one is in force is implied by which fields are non-zero.
//! [`Strategy::classify`] turns that into an explicit tag once, so the rest
//! of the validator matches on a variant instead of re-testing fields.

use crate::crd::{ErasureCodedSpec, PoolSpec, ReplicatedSpec};
use crate::error::ValidationError;

/// The redundancy strategy selected by a pool spec
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy<'a> {
    /// Neither replication nor erasure coding is configured
    Unset,
    /// Whole-object copies
    Replicated(&'a ReplicatedSpec),
    /// Data/coding chunk split
    ErasureCoded(&'a ErasureCodedSpec),
}

impl<'a> Strategy<'a> {
    /// Classify a pool spec.
    ///
    /// `Unset` is decided before conflicts, so an erasure coding algorithm
    /// with no chunk counts and no replication is `Unset`, while the same
    /// algorithm next to a replicated size is a conflict.
    pub fn classify(spec: &'a PoolSpec) -> Result<Self, ValidationError> {
        let replicated = spec.replicated.is_configured();

        if !replicated && !spec.erasure_coded.is_configured() {
            return Ok(Strategy::Unset);
        }

        if replicated && spec.erasure_coded.is_requested() {
            return Err(ValidationError::BothStrategiesConfigured);
        }

        if replicated {
            Ok(Strategy::Replicated(&spec.replicated))
        } else {
            Ok(Strategy::ErasureCoded(&spec.erasure_coded))
        }
    }

    /// The kind of strategy, or `None` when unset
    pub fn kind(&self) -> Option<StrategyKind> {
        match self {
            Strategy::Unset => None,
            Strategy::Replicated(_) => Some(StrategyKind::Replicated),
            Strategy::ErasureCoded(_) => Some(StrategyKind::ErasureCoded),
        }
    }
}

/// Strategy tag without the borrowed sub-spec, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Replicated,
    ErasureCoded,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Replicated => write!(f, "replicated"),
            StrategyKind::ErasureCoded => write!(f, "erasurecoded"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
