//! Consistency checks shared by every pool-bearing resource

use crate::crd::{ErasureCodedSpec, NamedPoolSpec};
use crate::error::ValidationError;

use super::strategy::Strategy;

/// Smallest allowed non-zero erasure coded data chunk count
pub const MIN_DATA_CHUNKS: u32 = 2;

/// Smallest allowed non-zero erasure coded coding chunk count
pub const MIN_CODING_CHUNKS: u32 = 1;

/// Validate a normalized pool spec.
///
/// Rules are evaluated in a fixed order and the first violation is returned:
///
/// 1. a strategy must be configured
/// 2. only one strategy may be configured
/// 3. erasure coded chunk counts must meet their minimums
pub fn validate_pool_spec(ps: &NamedPoolSpec) -> Result<(), ValidationError> {
    match Strategy::classify(&ps.spec)? {
        Strategy::Unset => Err(ValidationError::NoStrategyConfigured),
        Strategy::Replicated(_) => Ok(()),
        Strategy::ErasureCoded(ec) if ps.spec.replicated.is_unset() => check_chunk_minimums(ec),
        // negative target ratio: chunk minimums are not enforced
        Strategy::ErasureCoded(_) => Ok(()),
    }
}

fn check_chunk_minimums(ec: &ErasureCodedSpec) -> Result<(), ValidationError> {
    if below_minimum(ec.data_chunks, MIN_DATA_CHUNKS) {
        return Err(ValidationError::DataChunksTooLow {
            data_chunks: ec.data_chunks,
        });
    }

    // Never fires while MIN_CODING_CHUNKS is 1.
    if below_minimum(ec.coding_chunks, MIN_CODING_CHUNKS) {
        return Err(ValidationError::CodingChunksTooLow {
            coding_chunks: ec.coding_chunks,
        });
    }

    Ok(())
}

/// Zero means "unset" and is exempt from the minimum
fn below_minimum(value: u32, minimum: u32) -> bool {
    value != 0 && value < minimum
}

// =============================================================================
// Tests
// =============================================================================
