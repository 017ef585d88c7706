//! CephBlockPool admission hooks
//!
//! Validates:
//! - Built-in pool names are never erasure coded
//! - The pool spec is consistent (see [`validate_pool_spec`])
//! - On UPDATE, the pool name and redundancy strategy are unchanged

use tracing::{debug, instrument, warn};

use super::pool_spec::validate_pool_spec;
use super::strategy::{Strategy, StrategyKind};
use super::{PoolSpecValidator, Validator};
use crate::config::ValidatorConfig;
use crate::crd::CephBlockPool;
use crate::error::ValidationError;

/// Validate a CephBlockPool's spec, including the built-in pool name rule
pub fn validate_ceph_block_pool(
    pool: &CephBlockPool,
    config: &ValidatorConfig,
) -> Result<(), ValidationError> {
    let named = pool.to_named_pool_spec();

    if config.is_reserved(&named.name) && named.spec.is_erasure_coded() {
        return Err(ValidationError::ReservedPoolErasureCoded { pool: named.name });
    }

    validate_pool_spec(&named)
}

/// Tier 2 checks: identity and strategy may not change after creation
fn validate_transition(new: &CephBlockPool, old: &CephBlockPool) -> Result<(), ValidationError> {
    if new.pool_name() != old.pool_name() {
        return Err(ValidationError::ImmutableNameChanged {
            old: old.pool_name().to_string(),
            new: new.pool_name().to_string(),
        });
    }

    let previous = &old.spec.pool_spec;
    match Strategy::classify(&new.spec.pool_spec)?.kind() {
        Some(StrategyKind::ErasureCoded) if previous.replicated.is_configured() => {
            Err(ValidationError::StrategyChangeForbidden {
                from: StrategyKind::Replicated,
                to: StrategyKind::ErasureCoded,
            })
        }
        Some(StrategyKind::Replicated) if previous.erasure_coded.is_requested() => {
            Err(ValidationError::StrategyChangeForbidden {
                from: StrategyKind::ErasureCoded,
                to: StrategyKind::Replicated,
            })
        }
        _ => Ok(()),
    }
}

fn log_decision(operation: &str, result: &Result<(), ValidationError>) {
    match result {
        Ok(()) => debug!(operation, "CephBlockPool admitted"),
        Err(e) => warn!(operation, reason = e.reason(), error = %e, "CephBlockPool rejected"),
    }
}

impl Validator<CephBlockPool> for PoolSpecValidator {
    #[instrument(skip(self, pool), fields(pool = %pool.pool_name()))]
    fn validate_create(&self, pool: &CephBlockPool) -> Result<(), ValidationError> {
        let result = validate_ceph_block_pool(pool, self.config());
        log_decision("create", &result);
        result
    }

    #[instrument(skip(self, pool, old), fields(pool = %pool.pool_name()))]
    fn validate_update(
        &self,
        pool: &CephBlockPool,
        old: &CephBlockPool,
    ) -> Result<(), ValidationError> {
        let result = validate_ceph_block_pool(pool, self.config())
            .and_then(|()| validate_transition(pool, old));
        log_decision("update", &result);
        result
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{CephBlockPoolSpec, ErasureCodedSpec, PoolSpec, ReplicatedSpec};
    use assert_matches::assert_matches;

    fn replicated_pool(name: &str, size: u32) -> CephBlockPool {
        CephBlockPool::new(
            name,
            CephBlockPoolSpec {
                name: String::new(),
                pool_spec: PoolSpec {
                    replicated: ReplicatedSpec {
                        size,
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
        )
    }

    fn ec_pool(name: &str, data_chunks: u32, coding_chunks: u32) -> CephBlockPool {
        CephBlockPool::new(
            name,
            CephBlockPoolSpec {
                name: String::new(),
                pool_spec: PoolSpec {
                    erasure_coded: ErasureCodedSpec {
                        data_chunks,
                        coding_chunks,
                        algorithm: String::new(),
                    },
                    ..Default::default()
                },
            },
        )
    }

    fn validator() -> PoolSpecValidator {
        PoolSpecValidator::default()
    }

    // =========================================================================
    // Create Tests
    // =========================================================================

    #[test]
    fn test_create_replicated() {
        assert_eq!(validator().validate_create(&replicated_pool("pool1", 3)), Ok(()));
    }

    #[test]
    fn test_create_erasure_coded() {
        let mut pool = ec_pool("ecpool", 4, 2);
        pool.spec.pool_spec.erasure_coded.algorithm = "jerasure".to_string();
        assert_eq!(validator().validate_create(&pool), Ok(()));
    }

    #[test]
    fn test_create_reserved_erasure_coded() {
        for name in [".mgr", ".nfs", "device_health_metrics"] {
            let mut pool = ec_pool("builtin", 4, 2);
            pool.spec.name = name.to_string();
            assert_eq!(
                validator().validate_create(&pool),
                Err(ValidationError::ReservedPoolErasureCoded {
                    pool: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_create_reserved_check_precedes_chunk_minimum() {
        let mut pool = ec_pool("builtin", 1, 0);
        pool.spec.name = ".mgr".to_string();
        assert_matches!(
            validator().validate_create(&pool),
            Err(ValidationError::ReservedPoolErasureCoded { .. })
        );
    }

    #[test]
    fn test_create_reserved_replicated_allowed() {
        let mut pool = replicated_pool("builtin-mgr", 3);
        pool.spec.name = ".mgr".to_string();
        assert_eq!(validator().validate_create(&pool), Ok(()));
    }

    #[test]
    fn test_create_reserved_algorithm_only_is_not_erasure_coded() {
        let mut pool = replicated_pool("builtin-nfs", 0);
        pool.spec.name = ".nfs".to_string();
        pool.spec.pool_spec.erasure_coded.algorithm = "jerasure".to_string();
        assert_eq!(
            validator().validate_create(&pool),
            Err(ValidationError::NoStrategyConfigured)
        );
    }

    #[test]
    fn test_create_custom_reserved_names() {
        let validator = PoolSpecValidator::new(ValidatorConfig {
            reserved_pool_names: vec!["metadata".to_string()],
        });
        assert_matches!(
            validator.validate_create(&ec_pool("metadata", 4, 2)),
            Err(ValidationError::ReservedPoolErasureCoded { pool }) if pool == "metadata"
        );
        let mut mgr = ec_pool("builtin-mgr", 4, 2);
        mgr.spec.name = ".mgr".to_string();
        assert_matches!(
            validator.validate_create(&mgr),
            Err(ValidationError::ReservedPoolErasureCoded { pool }) if pool == ".mgr"
        );
        assert_eq!(validator.validate_create(&ec_pool("ecpool", 4, 2)), Ok(()));
    }

    #[test]
    fn test_create_builtin_names_survive_empty_config() {
        let config = ValidatorConfig::from_yaml("reservedPoolNames: []").unwrap();
        let validator = PoolSpecValidator::new(config);

        let mut pool = ec_pool("builtin", 4, 2);
        pool.spec.name = ".mgr".to_string();
        assert_eq!(
            validator.validate_create(&pool),
            Err(ValidationError::ReservedPoolErasureCoded {
                pool: ".mgr".to_string()
            })
        );
    }

    #[test]
    fn test_create_data_chunks_too_low() {
        assert_matches!(
            validator().validate_create(&ec_pool("ecpool", 1, 1)),
            Err(ValidationError::DataChunksTooLow { data_chunks: 1 })
        );
    }

    #[test]
    fn test_create_is_idempotent() {
        let pool = ec_pool("ecpool", 1, 1);
        let v = validator();
        assert_eq!(v.validate_create(&pool), v.validate_create(&pool));
    }

    // =========================================================================
    // Update Tests
    // =========================================================================

    #[test]
    fn test_update_unchanged() {
        let old = replicated_pool("pool1", 3);
        let new = replicated_pool("pool1", 2);
        assert_eq!(validator().validate_update(&new, &old), Ok(()));
    }

    #[test]
    fn test_update_revalidates_new_spec() {
        let old = replicated_pool("pool1", 3);
        let new = replicated_pool("pool1", 0);
        assert_eq!(
            validator().validate_update(&new, &old),
            Err(ValidationError::NoStrategyConfigured)
        );
    }

    #[test]
    fn test_update_name_change() {
        let old = replicated_pool("pool1", 3);
        let new = replicated_pool("pool2", 3);
        assert_eq!(
            validator().validate_update(&new, &old),
            Err(ValidationError::ImmutableNameChanged {
                old: "pool1".to_string(),
                new: "pool2".to_string(),
            })
        );
    }

    #[test]
    fn test_update_spec_name_override_change() {
        let old = replicated_pool("pool1", 3);
        let mut new = replicated_pool("pool1", 3);
        new.spec.name = "renamed".to_string();
        assert_matches!(
            validator().validate_update(&new, &old),
            Err(ValidationError::ImmutableNameChanged { .. })
        );
    }

    #[test]
    fn test_update_replicated_to_erasure_coded() {
        let old = replicated_pool("pool1", 3);
        let new = ec_pool("pool1", 4, 2);
        assert_eq!(
            validator().validate_update(&new, &old),
            Err(ValidationError::StrategyChangeForbidden {
                from: StrategyKind::Replicated,
                to: StrategyKind::ErasureCoded,
            })
        );
    }

    #[test]
    fn test_update_target_ratio_to_erasure_coded() {
        let mut old = replicated_pool("pool1", 0);
        old.spec.pool_spec.replicated.target_size_ratio = 0.2;
        let new = ec_pool("pool1", 4, 2);
        assert_eq!(
            validator().validate_update(&new, &old),
            Err(ValidationError::StrategyChangeForbidden {
                from: StrategyKind::Replicated,
                to: StrategyKind::ErasureCoded,
            })
        );
    }

    #[test]
    fn test_update_erasure_coded_to_replicated() {
        let old = ec_pool("pool1", 4, 2);
        let new = replicated_pool("pool1", 3);
        assert_eq!(
            validator().validate_update(&new, &old),
            Err(ValidationError::StrategyChangeForbidden {
                from: StrategyKind::ErasureCoded,
                to: StrategyKind::Replicated,
            })
        );
    }

    #[test]
    fn test_update_from_algorithm_only_to_replicated() {
        let mut old = replicated_pool("pool1", 0);
        old.spec.pool_spec.erasure_coded.algorithm = "isa".to_string();
        let new = replicated_pool("pool1", 3);
        assert_matches!(
            validator().validate_update(&new, &old),
            Err(ValidationError::StrategyChangeForbidden { .. })
        );
    }

    #[test]
    fn test_update_erasure_coded_chunk_change_allowed() {
        let old = ec_pool("pool1", 4, 2);
        let new = ec_pool("pool1", 6, 3);
        assert_eq!(validator().validate_update(&new, &old), Ok(()));
    }

    #[test]
    fn test_update_spec_check_precedes_name_check() {
        let old = replicated_pool("pool1", 3);
        let new = ec_pool("pool2", 1, 1);
        assert_matches!(
            validator().validate_update(&new, &old),
            Err(ValidationError::DataChunksTooLow { .. })
        );
    }

    // =========================================================================
    // Delete Tests
    // =========================================================================

    #[test]
    fn test_delete_always_allowed() {
        assert_eq!(validator().validate_delete(&replicated_pool("pool1", 0)), Ok(()));
        assert_eq!(validator().validate_delete(&ec_pool(".mgr", 4, 2)), Ok(()));
    }
}
