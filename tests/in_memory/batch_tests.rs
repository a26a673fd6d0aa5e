//! Batch composition across several calls.

use super::helpers::{Registry, address, config_id, registry, sel};
use dispatch_registry::resolver::{
    domain::{BatchState, ModuleAddress, ModuleId, ResolverDomainError, Version},
    services::ResolverServiceError,
};
use rstest::rstest;

#[rstest]
fn large_configuration_is_built_in_chunks(registry: Registry) {
    let cfg = config_id("large");
    let modules: Vec<ModuleId> = (1..=12_u8)
        .map(|n| registry.module(&format!("m{n}"), n, &[u32::from(n)]))
        .collect();

    for chunk in modules.chunks(5) {
        let sealed = registry
            .admin
            .create_batch_configuration(&registry.operator, cfg, chunk, false)
            .expect("append chunk");
        assert_eq!(sealed, None);
        assert_eq!(registry.resolver.resolve(cfg, Version::LATEST, sel(1)), ModuleAddress::UNSET);
    }
    let version = registry
        .admin
        .seal_batch_configuration(&registry.operator, cfg)
        .expect("seal batch");

    assert_eq!(version, Version::new(1));
    assert_eq!(registry.resolver.module_count(cfg, version), 12);
    for n in 1..=12_u8 {
        assert_eq!(
            registry.resolver.resolve(cfg, version, sel(u32::from(n))),
            address(n)
        );
    }
}

#[rstest]
fn collision_inside_a_later_chunk_fails_fast(registry: Registry) {
    let cfg = config_id("chunks");
    let a = registry.module("a", 1, &[0x01]);
    let b = registry.module("b", 2, &[0x02]);
    let clash = registry.module("clash", 3, &[0x01]);
    registry
        .admin
        .create_batch_configuration(&registry.operator, cfg, &[a, b], false)
        .expect("first chunk");

    let result = registry
        .admin
        .create_batch_configuration(&registry.operator, cfg, &[clash], false);

    assert!(matches!(
        result,
        Err(ResolverServiceError::Domain(
            ResolverDomainError::SelectorCollision { claimed_by, .. }
        )) if claimed_by == a
    ));
    assert_eq!(
        registry.resolver.batch_state(cfg),
        BatchState::BatchOpen {
            base: Version::LATEST,
            staged: 2,
        }
    );
}

#[rstest]
fn repeated_open_cancel_cycles_never_bump_the_version(registry: Registry) {
    let cfg = config_id("cycles");
    let base = registry.module("base", 1, &[0x01]);
    let extra = registry.module("extra", 2, &[0x02]);
    registry
        .admin
        .create_configuration(&registry.operator, cfg, &[base])
        .expect("version 1");

    for _ in 0..10 {
        registry
            .admin
            .create_batch_configuration(&registry.operator, cfg, &[extra], false)
            .expect("open batch");
        registry
            .admin
            .cancel_batch_configuration(&registry.operator, cfg)
            .expect("cancel batch");
    }

    assert_eq!(registry.resolver.latest_version(cfg), Version::new(1));
    assert_eq!(registry.resolver.module_count(cfg, Version::LATEST), 1);
    assert_eq!(registry.resolver.resolve(cfg, Version::LATEST, sel(0x02)), ModuleAddress::UNSET);
    assert_eq!(registry.resolver.batch_state(cfg), BatchState::Sealed(Version::new(1)));
}

#[rstest]
fn single_shot_compose_waits_for_open_batch(registry: Registry) {
    let cfg = config_id("busy");
    let a = registry.module("a", 1, &[0x01]);
    registry
        .admin
        .create_batch_configuration(&registry.operator, cfg, &[a], false)
        .expect("open batch");

    let blocked = registry
        .admin
        .create_configuration(&registry.operator, cfg, &[a]);
    registry
        .admin
        .cancel_batch_configuration(&registry.operator, cfg)
        .expect("cancel");
    let after_cancel = registry
        .admin
        .create_configuration(&registry.operator, cfg, &[a]);

    assert_eq!(
        blocked,
        Err(ResolverServiceError::Domain(
            ResolverDomainError::BatchInProgress(cfg)
        ))
    );
    assert_eq!(after_cancel, Ok(Version::new(1)));
}

#[rstest]
fn seal_now_on_an_empty_first_batch_changes_nothing(registry: Registry) {
    let cfg = config_id("empty");

    let result = registry
        .admin
        .create_batch_configuration(&registry.operator, cfg, &[], true);

    assert_eq!(
        result,
        Err(ResolverServiceError::Domain(
            ResolverDomainError::EmptyModuleList(cfg)
        ))
    );
    assert_eq!(registry.resolver.batch_state(cfg), BatchState::New);
    assert!(registry.events.is_empty());
}
