//! Property-Based Tests for Pool Admission
//!
//! Uses proptest to check the validator's decisions across arbitrary pool
//! specs rather than hand-picked fixtures.
//!
//! # Test Properties
//!
//! 1. **Presence**: a spec with no strategy is always rejected as such
//! 2. **Exclusivity**: a spec with both strategies is always rejected as such
//! 3. **Chunk Minimum**: one data chunk is rejected, any other count is not
//! 4. **Built-in Pools**: reserved names never accept erasure coding
//! 5. **Determinism**: the same input always yields the same decision
//! 6. **Identity**: renaming a valid pool on update is always rejected

#![cfg(test)]

use proptest::prelude::*;

use super::{PoolSpecValidator, Validator};
use crate::config::BUILTIN_POOL_NAMES;
use crate::crd::{CephBlockPool, CephBlockPoolSpec, ErasureCodedSpec, PoolSpec, ReplicatedSpec};
use crate::error::ValidationError;

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for erasure coding algorithm names, including unset.
fn algorithm_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("jerasure".to_string()),
        Just("isa".to_string()),
    ]
}

/// Strategy for a configured replicated sub-spec.
fn replicated_strategy() -> impl Strategy<Value = ReplicatedSpec> {
    prop_oneof![
        (1u32..=5).prop_map(|size| ReplicatedSpec {
            size,
            ..Default::default()
        }),
        (0.01f64..1.0).prop_map(|target_size_ratio| ReplicatedSpec {
            target_size_ratio,
            ..Default::default()
        }),
    ]
}

/// Strategy for an erasure coded sub-spec with at least one chunk count set.
fn erasure_coded_strategy() -> impl Strategy<Value = ErasureCodedSpec> {
    ((0u32..=12), (0u32..=6), algorithm_strategy())
        .prop_filter("at least one chunk count", |(k, m, _)| *k > 0 || *m > 0)
        .prop_map(|(data_chunks, coding_chunks, algorithm)| ErasureCodedSpec {
            data_chunks,
            coding_chunks,
            algorithm,
        })
}

/// Strategy for resource names that are not reserved.
fn pool_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

fn block_pool(name: &str, pool_spec: PoolSpec) -> CephBlockPool {
    CephBlockPool::new(
        name,
        CephBlockPoolSpec {
            name: String::new(),
            pool_spec,
        },
    )
}

// =============================================================================
// Create Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: no chunk counts and no positive replication means no strategy.
    #[test]
    fn prop_no_strategy_rejected(
        name in pool_name_strategy(),
        ratio in -1.0f64..=0.0,
        algorithm in algorithm_strategy(),
    ) {
        let spec = PoolSpec {
            replicated: ReplicatedSpec { target_size_ratio: ratio, ..Default::default() },
            erasure_coded: ErasureCodedSpec { algorithm, ..Default::default() },
            ..Default::default()
        };

        let result = PoolSpecValidator::default().validate_create(&block_pool(&name, spec));
        prop_assert_eq!(result, Err(ValidationError::NoStrategyConfigured));
    }

    /// Property: replication next to erasure chunk counts is always a conflict.
    #[test]
    fn prop_both_strategies_rejected(
        name in pool_name_strategy(),
        replicated in replicated_strategy(),
        erasure_coded in erasure_coded_strategy(),
    ) {
        let spec = PoolSpec { replicated, erasure_coded, ..Default::default() };

        let result = PoolSpecValidator::default().validate_create(&block_pool(&name, spec));
        prop_assert_eq!(result, Err(ValidationError::BothStrategiesConfigured));
    }

    /// Property: only a data chunk count of exactly 1 trips the minimum.
    #[test]
    fn prop_data_chunk_minimum(
        name in pool_name_strategy(),
        erasure_coded in erasure_coded_strategy(),
    ) {
        let data_chunks = erasure_coded.data_chunks;
        let spec = PoolSpec { erasure_coded, ..Default::default() };

        let result = PoolSpecValidator::default().validate_create(&block_pool(&name, spec));
        if data_chunks == 1 {
            prop_assert_eq!(result, Err(ValidationError::DataChunksTooLow { data_chunks: 1 }));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }

    /// Property: built-in pools reject erasure coding regardless of chunk validity.
    #[test]
    fn prop_builtin_pool_never_erasure_coded(
        index in 0usize..BUILTIN_POOL_NAMES.len(),
        erasure_coded in erasure_coded_strategy(),
        replicated in prop_oneof![Just(ReplicatedSpec::default()), replicated_strategy()],
    ) {
        let reserved = BUILTIN_POOL_NAMES[index];
        let mut pool = block_pool("builtin", PoolSpec { replicated, erasure_coded, ..Default::default() });
        pool.spec.name = reserved.to_string();

        let result = PoolSpecValidator::default().validate_create(&pool);
        prop_assert_eq!(
            result,
            Err(ValidationError::ReservedPoolErasureCoded { pool: reserved.to_string() })
        );
    }

    /// Property: coding chunk minimum never fires for unsigned counts.
    #[test]
    fn prop_coding_chunk_minimum_unreachable(
        name in pool_name_strategy(),
        erasure_coded in erasure_coded_strategy(),
        replicated in prop_oneof![Just(ReplicatedSpec::default()), replicated_strategy()],
    ) {
        let spec = PoolSpec { replicated, erasure_coded, ..Default::default() };

        let result = PoolSpecValidator::default().validate_create(&block_pool(&name, spec));
        let is_coding_error = matches!(result, Err(ValidationError::CodingChunksTooLow { .. }));
        prop_assert!(!is_coding_error);
    }

    /// Property: validating the same input twice yields the same decision.
    #[test]
    fn prop_create_deterministic(
        name in pool_name_strategy(),
        replicated in prop_oneof![Just(ReplicatedSpec::default()), replicated_strategy()],
        erasure_coded in prop_oneof![Just(ErasureCodedSpec::default()), erasure_coded_strategy()],
    ) {
        let pool = block_pool(&name, PoolSpec { replicated, erasure_coded, ..Default::default() });
        let validator = PoolSpecValidator::default();

        prop_assert_eq!(validator.validate_create(&pool), validator.validate_create(&pool));
    }
}

// =============================================================================
// Update Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: a valid pool cannot be renamed on update.
    #[test]
    fn prop_rename_rejected(
        old_name in pool_name_strategy(),
        new_name in pool_name_strategy(),
        replicated in replicated_strategy(),
    ) {
        prop_assume!(old_name != new_name);

        let spec = PoolSpec { replicated, ..Default::default() };
        let old = block_pool(&old_name, spec.clone());
        let new = block_pool(&new_name, spec);

        let result = PoolSpecValidator::default().validate_update(&new, &old);
        prop_assert_eq!(
            result,
            Err(ValidationError::ImmutableNameChanged { old: old_name, new: new_name })
        );
    }

    /// Property: an unchanged valid pool is always accepted on update.
    #[test]
    fn prop_unchanged_update_accepted(
        name in pool_name_strategy(),
        replicated in replicated_strategy(),
    ) {
        let pool = block_pool(&name, PoolSpec { replicated, ..Default::default() });

        prop_assert_eq!(PoolSpecValidator::default().validate_update(&pool, &pool), Ok(()));
    }
}
