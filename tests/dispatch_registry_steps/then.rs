//! Then steps for dispatch registry BDD scenarios.

use super::world::{RegistryWorld, parse_config};
use dispatch_registry::resolver::{
    domain::{ModuleAddress, ResolverDomainError, Selector, Version},
    services::ResolverServiceError,
};
use rstest_bdd_macros::then;

fn resolve_latest(
    world: &RegistryWorld,
    selector: &str,
    config: &str,
) -> Result<ModuleAddress, eyre::Report> {
    let parsed = selector.parse::<Selector>()?;
    Ok(world
        .resolver
        .resolve(parse_config(config)?, Version::LATEST, parsed))
}

#[then(r#"selector "{selector}" of "{config}" resolves to module "{name}""#)]
fn selector_resolves_to_module(
    world: &mut RegistryWorld,
    selector: String,
    config: String,
    name: String,
) -> Result<(), eyre::Report> {
    let expected = world.module(&name)?.address;
    let resolved = resolve_latest(world, &selector, &config)?;
    if resolved != expected {
        return Err(eyre::eyre!(
            "expected {selector} to resolve to {name} ({expected}), got {resolved}"
        ));
    }
    Ok(())
}

#[then(r#"selector "{selector}" of "{config}" resolves to the unset address"#)]
fn selector_resolves_to_unset(
    world: &mut RegistryWorld,
    selector: String,
    config: String,
) -> Result<(), eyre::Report> {
    let resolved = resolve_latest(world, &selector, &config)?;
    if !resolved.is_unset() {
        return Err(eyre::eyre!("expected {selector} to be unresolved, got {resolved}"));
    }
    Ok(())
}

#[then(r#"the latest version of "{config}" is {version:u64}"#)]
fn latest_version_is(
    world: &mut RegistryWorld,
    config: String,
    version: u64,
) -> Result<(), eyre::Report> {
    let latest = world.resolver.latest_version(parse_config(&config)?);
    if latest.get() != version {
        return Err(eyre::eyre!("expected version {version}, found {}", latest.get()));
    }
    Ok(())
}

#[then(r#"listing modules of "{config}" returns "{modules}""#)]
fn listing_modules_returns(
    world: &mut RegistryWorld,
    config: String,
    modules: String,
) -> Result<(), eyre::Report> {
    let expected = world.module_ids(&modules)?;
    let listed = world
        .resolver
        .list_module_ids(parse_config(&config)?, Version::LATEST, 0, 10);
    if listed != expected {
        return Err(eyre::eyre!("expected modules {expected:?}, found {listed:?}"));
    }
    Ok(())
}

#[then(r#"no batch is open for "{config}""#)]
fn no_batch_is_open(world: &mut RegistryWorld, config: String) -> Result<(), eyre::Report> {
    if world.resolver.is_batch_open(parse_config(&config)?) {
        return Err(eyre::eyre!("expected no open batch for {config}"));
    }
    Ok(())
}

#[then("the last call fails with a selector collision")]
fn last_call_fails_with_collision(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(
        result,
        Err(ResolverServiceError::Domain(
            ResolverDomainError::SelectorCollision { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected selector collision, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the last call fails with selector "{selector}" blacklisted"#)]
fn last_call_fails_with_blacklisted(
    world: &mut RegistryWorld,
    selector: String,
) -> Result<(), eyre::Report> {
    let expected = selector.parse::<Selector>()?;
    let result = world.last_result()?;
    match result {
        Err(ResolverServiceError::Domain(ResolverDomainError::SelectorBlacklisted {
            selector: vetoed,
            ..
        })) if *vetoed == expected => Ok(()),
        other => Err(eyre::eyre!(
            "expected {selector} to be reported blacklisted, got {other:?}"
        )),
    }
}

#[then("the last call is denied access")]
fn last_call_is_denied(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(result, Err(ResolverServiceError::AccessDenied { .. })) {
        return Err(eyre::eyre!("expected access denied, got {result:?}"));
    }
    Ok(())
}

#[then("the last call fails because the registry is paused")]
fn last_call_fails_paused(world: &mut RegistryWorld) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if !matches!(result, Err(ResolverServiceError::Paused)) {
        return Err(eyre::eyre!("expected paused error, got {result:?}"));
    }
    Ok(())
}
