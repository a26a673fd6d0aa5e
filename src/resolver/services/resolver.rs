//! Read-side façade a proxy consults on every call.
//!
//! Reads only ever see sealed versions. [`Version::LATEST`] selects the most
//! recent one for every query, and misses are answered with sentinel values
//! rather than errors, except for [`DispatchResolver::module`] and
//! [`DispatchResolver::check_configuration_registered`].

use crate::resolver::{
    adapters::InMemoryRegistryStore,
    domain::{
        BatchState, CapabilityTag, Configuration, ConfigurationId, ModuleAddress,
        ModuleDefinition, ModuleId, RegistryState, ResolverDomainError, ResolverDomainResult,
        SealedVersion, Selector, Version, page,
    },
};
use std::sync::Arc;
use tracing::trace;

/// Selector resolution and enumeration over sealed configurations.
#[derive(Debug, Clone)]
pub struct DispatchResolver {
    store: Arc<InMemoryRegistryStore>,
}

impl DispatchResolver {
    /// Creates a resolver reading from `store`.
    #[must_use]
    pub const fn new(store: Arc<InMemoryRegistryStore>) -> Self {
        Self { store }
    }

    /// Returns the address implementing `selector`, or
    /// [`ModuleAddress::UNSET`] when the configuration, version or selector
    /// is unknown or the selector is blacklisted.
    #[must_use]
    pub fn resolve(
        &self,
        configuration: ConfigurationId,
        version: Version,
        selector: Selector,
    ) -> ModuleAddress {
        let address = self.store.read(|state| -> Option<ModuleAddress> {
            if state
                .blacklist(configuration)
                .is_some_and(|blacklist| blacklist.contains(selector))
            {
                return None;
            }
            let owner = state
                .sealed_version(configuration, version)?
                .selector_owner(selector)?;
            state
                .catalog()
                .find(owner)
                .map(ModuleDefinition::address)
        });

        address.unwrap_or_else(|| {
            trace!(
                configuration = %configuration,
                version = %version,
                selector = %selector,
                "selector unresolved"
            );
            ModuleAddress::UNSET
        })
    }

    /// Returns `true` when some module of the selected version declares
    /// `tag`.
    #[must_use]
    pub fn supports_capability(
        &self,
        configuration: ConfigurationId,
        version: Version,
        tag: CapabilityTag,
    ) -> bool {
        self.read_version(configuration, version, |_, sealed| sealed.supports(tag))
            .unwrap_or(false)
    }

    /// Returns the latest sealed version, or [`Version::LATEST`] (zero) when
    /// the configuration was never sealed.
    #[must_use]
    pub fn latest_version(&self, configuration: ConfigurationId) -> Version {
        self.store.read(|state| {
            state
                .configuration(configuration)
                .map_or(Version::LATEST, Configuration::latest_version)
        })
    }

    /// Returns `true` when the selected version is sealed.
    #[must_use]
    pub fn is_configuration_registered(
        &self,
        configuration: ConfigurationId,
        version: Version,
    ) -> bool {
        self.read_version(configuration, version, |_, _| ())
            .is_some()
    }

    /// Asserts the selected version is sealed and returns its concrete
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ConfigurationNotRegistered`] otherwise.
    pub fn check_configuration_registered(
        &self,
        configuration: ConfigurationId,
        version: Version,
    ) -> ResolverDomainResult<Version> {
        self.read_version(configuration, version, |_, sealed| sealed.version())
            .ok_or(ResolverDomainError::ConfigurationNotRegistered {
                configuration,
                version,
            })
    }

    /// Returns the catalog record of `module`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ModuleNotRegistered`] when absent.
    pub fn module(&self, module: ModuleId) -> ResolverDomainResult<ModuleDefinition> {
        self.store
            .read(|state| state.catalog().get(module).cloned())
    }

    /// Returns `true` when `module` is in the catalog.
    #[must_use]
    pub fn is_module_registered(&self, module: ModuleId) -> bool {
        self.store.read(|state| state.catalog().contains(module))
    }

    /// Returns the number of catalogued modules.
    #[must_use]
    pub fn catalog_size(&self) -> usize {
        self.store.read(|state| state.catalog().len())
    }

    /// Lists catalogued modules in registration order.
    #[must_use]
    pub fn list_catalog(&self, offset: usize, limit: usize) -> Vec<ModuleDefinition> {
        self.store.read(|state| {
            let catalog = state.catalog();
            page(catalog.ids(), offset, limit)
                .iter()
                .filter_map(|id| catalog.find(*id))
                .cloned()
                .collect()
        })
    }

    /// Lists the modules of the selected version in composition order.
    #[must_use]
    pub fn list_modules(
        &self,
        configuration: ConfigurationId,
        version: Version,
        offset: usize,
        limit: usize,
    ) -> Vec<ModuleDefinition> {
        self.read_version(configuration, version, |state, sealed| {
            page(sealed.modules(), offset, limit)
                .iter()
                .filter_map(|id| state.catalog().find(*id))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
    }

    /// Lists the module ids of the selected version in composition order.
    #[must_use]
    pub fn list_module_ids(
        &self,
        configuration: ConfigurationId,
        version: Version,
        offset: usize,
        limit: usize,
    ) -> Vec<ModuleId> {
        self.read_version(configuration, version, |_, sealed| {
            page(sealed.modules(), offset, limit).to_vec()
        })
        .unwrap_or_default()
    }

    /// Lists the module addresses of the selected version in composition
    /// order.
    #[must_use]
    pub fn list_module_addresses(
        &self,
        configuration: ConfigurationId,
        version: Version,
        offset: usize,
        limit: usize,
    ) -> Vec<ModuleAddress> {
        self.list_modules(configuration, version, offset, limit)
            .iter()
            .map(ModuleDefinition::address)
            .collect()
    }

    /// Returns the number of modules in the selected version, zero when
    /// unknown.
    #[must_use]
    pub fn module_count(&self, configuration: ConfigurationId, version: Version) -> usize {
        self.read_version(configuration, version, |_, sealed| sealed.module_count())
            .unwrap_or(0)
    }

    /// Returns the module owning `selector` in the selected version.
    ///
    /// Ignores the blacklist.
    #[must_use]
    pub fn selector_owner(
        &self,
        configuration: ConfigurationId,
        version: Version,
        selector: Selector,
    ) -> Option<ModuleId> {
        self.read_version(configuration, version, |_, sealed| {
            sealed.selector_owner(selector)
        })
        .flatten()
    }

    /// Lists the selectors `module` contributes to the selected version, in
    /// declaration order. Empty when the module is not part of it.
    #[must_use]
    pub fn selectors_of_module(
        &self,
        configuration: ConfigurationId,
        version: Version,
        module: ModuleId,
        offset: usize,
        limit: usize,
    ) -> Vec<Selector> {
        self.read_member(configuration, version, module, |definition| {
            page(definition.selectors(), offset, limit).to_vec()
        })
        .unwrap_or_default()
    }

    /// Returns how many selectors `module` contributes to the selected
    /// version.
    #[must_use]
    pub fn selector_count_of_module(
        &self,
        configuration: ConfigurationId,
        version: Version,
        module: ModuleId,
    ) -> usize {
        self.read_member(configuration, version, module, |definition| {
            definition.selectors().len()
        })
        .unwrap_or(0)
    }

    /// Returns the record of `module` when it is part of the selected
    /// version.
    #[must_use]
    pub fn module_of(
        &self,
        configuration: ConfigurationId,
        version: Version,
        module: ModuleId,
    ) -> Option<ModuleDefinition> {
        self.read_member(configuration, version, module, Clone::clone)
    }

    /// Returns the capability set of the selected version in ascending
    /// order.
    #[must_use]
    pub fn list_capabilities(
        &self,
        configuration: ConfigurationId,
        version: Version,
    ) -> Vec<CapabilityTag> {
        self.read_version(configuration, version, |_, sealed| {
            sealed.capabilities().collect()
        })
        .unwrap_or_default()
    }

    /// Returns the number of configurations with at least one sealed
    /// version.
    #[must_use]
    pub fn configuration_count(&self) -> usize {
        self.store.read(|state| state.sealed_configurations().len())
    }

    /// Lists sealed configurations in the order of their first seal.
    #[must_use]
    pub fn list_configurations(&self, offset: usize, limit: usize) -> Vec<ConfigurationId> {
        self.store
            .read(|state| page(state.sealed_configurations(), offset, limit).to_vec())
    }

    /// Returns `true` when `selector` is vetoed in `configuration`.
    #[must_use]
    pub fn is_selector_blacklisted(
        &self,
        configuration: ConfigurationId,
        selector: Selector,
    ) -> bool {
        self.store.read(|state| {
            state
                .blacklist(configuration)
                .is_some_and(|blacklist| blacklist.contains(selector))
        })
    }

    /// Lists the vetoed selectors of `configuration` in ascending order.
    #[must_use]
    pub fn list_blacklist(&self, configuration: ConfigurationId) -> Vec<Selector> {
        self.store.read(|state| {
            state
                .blacklist(configuration)
                .map(|blacklist| blacklist.iter().collect())
                .unwrap_or_default()
        })
    }

    /// Returns the lifecycle state of `configuration`.
    #[must_use]
    pub fn batch_state(&self, configuration: ConfigurationId) -> BatchState {
        self.store.read(|state| {
            state
                .configuration(configuration)
                .map_or(BatchState::New, Configuration::state)
        })
    }

    /// Returns `true` while a batch session is open for `configuration`.
    #[must_use]
    pub fn is_batch_open(&self, configuration: ConfigurationId) -> bool {
        matches!(
            self.batch_state(configuration),
            BatchState::BatchOpen { .. }
        )
    }

    fn read_version<R>(
        &self,
        configuration: ConfigurationId,
        version: Version,
        f: impl FnOnce(&RegistryState, &SealedVersion) -> R,
    ) -> Option<R> {
        self.store.read(|state| {
            state
                .sealed_version(configuration, version)
                .map(|sealed| f(state, sealed))
        })
    }

    fn read_member<R>(
        &self,
        configuration: ConfigurationId,
        version: Version,
        module: ModuleId,
        f: impl FnOnce(&ModuleDefinition) -> R,
    ) -> Option<R> {
        self.read_version(configuration, version, |state, sealed| {
            sealed
                .contains_module(module)
                .then(|| state.catalog().find(module))
                .flatten()
                .map(f)
        })
        .flatten()
    }
}
