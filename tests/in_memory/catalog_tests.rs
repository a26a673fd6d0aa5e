//! Catalog registration through the admin service.

use super::helpers::{Registry, address, module_id, registry, sel};
use dispatch_registry::resolver::{
    domain::{ErrorCategory, ModuleAddress, ModuleDeclaration, ResolverDomainError},
    services::ResolverServiceError,
};
use rstest::rstest;

#[rstest]
fn registered_module_is_retrievable(registry: Registry) {
    let id = registry.module("transfer", 0x10, &[0xa905_9cbb, 0x23b8_72dd]);

    let found = registry.resolver.module(id).expect("module is registered");

    assert_eq!(found.address(), address(0x10));
    assert_eq!(found.selectors(), &[sel(0xa905_9cbb), sel(0x23b8_72dd)]);
    assert!(registry.resolver.is_module_registered(id));
    assert_eq!(registry.events.names(), vec!["module_registered"]);
}

#[rstest]
fn catalog_entries_are_never_replaced(registry: Registry) {
    let id = registry.module("transfer", 0x10, &[0x01]);
    let replacement = ModuleDeclaration::new(id, address(0x20)).with_selectors([sel(0x02)]);

    let result = registry.admin.register_module(&registry.operator, replacement);

    assert_eq!(
        result.map(|definition| definition.id()),
        Err(ResolverServiceError::Domain(
            ResolverDomainError::ModuleAlreadyRegistered(id)
        ))
    );
    assert_eq!(
        registry.resolver.module(id).map(|definition| definition.address()),
        Ok(address(0x10))
    );
}

#[rstest]
#[case::unset_address(ModuleAddress::UNSET, &[0x01])]
#[case::no_selectors(address(1), &[])]
#[case::null_selector(address(1), &[0x00])]
#[case::repeated_selector(address(1), &[0x01, 0x01])]
fn invalid_declarations_are_input_or_conflict_errors(
    registry: Registry,
    #[case] module_address: ModuleAddress,
    #[case] values: &[u32],
) {
    let declaration = ModuleDeclaration::new(module_id("bad"), module_address)
        .with_selectors(values.iter().copied().map(sel));

    let err = registry
        .admin
        .register_module(&registry.operator, declaration)
        .expect_err("declaration is invalid");

    assert!(matches!(
        err.category(),
        ErrorCategory::Input | ErrorCategory::Conflict
    ));
    assert_eq!(registry.resolver.catalog_size(), 0);
    assert!(registry.events.is_empty());
}

#[rstest]
fn colliding_modules_coexist_in_the_catalog(registry: Registry) {
    registry.module("first", 1, &[0x01]);
    registry.module("second", 2, &[0x01]);

    let listed: Vec<_> = registry
        .resolver
        .list_catalog(0, 10)
        .iter()
        .map(|definition| definition.id())
        .collect();

    assert_eq!(listed, vec![module_id("first"), module_id("second")]);
}
