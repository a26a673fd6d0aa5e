//! Authoritative registry state and its atomic mutations.
//!
//! Every mutation validates completely before it writes, so a failed call
//! leaves the state exactly as it was.

use super::{
    Blacklist, Configuration, ConfigurationId, ModuleCatalog, ModuleDeclaration,
    ModuleDefinition, ModuleId, ResolverDomainError, ResolverDomainResult, SealedVersion,
    Selector, Version,
};
use crate::resolver::config::RegistryConfig;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Outcome of a batch append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAppend {
    /// Modules added by this call.
    pub appended: Vec<ModuleId>,
    /// Whether this call opened the session.
    pub opened: bool,
    /// Version sealed by this call, when sealing was requested.
    pub sealed: Option<SealedSummary>,
}

/// Summary of a freshly sealed version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedSummary {
    /// The new version number.
    pub version: Version,
    /// Number of modules in the new version.
    pub module_count: usize,
}

/// Catalog plus every configuration, keyed by id.
#[derive(Debug, Default)]
pub struct RegistryState {
    catalog: ModuleCatalog,
    configurations: HashMap<ConfigurationId, Configuration>,
    sealed_order: Vec<ConfigurationId>,
}

impl RegistryState {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the module catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Returns the configuration with `id`, sealed or not.
    #[must_use]
    pub fn configuration(&self, id: ConfigurationId) -> Option<&Configuration> {
        self.configurations.get(&id)
    }

    /// Returns the sealed version selected by `(id, version)`.
    #[must_use]
    pub fn sealed_version(&self, id: ConfigurationId, version: Version) -> Option<&SealedVersion> {
        self.configurations.get(&id)?.version(version)
    }

    /// Returns sealed configuration ids in first-seal order.
    #[must_use]
    pub fn sealed_configurations(&self) -> &[ConfigurationId] {
        &self.sealed_order
    }

    /// Registers a module in the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog validation errors of [`ModuleCatalog::register`].
    pub fn register_module(
        &mut self,
        declaration: ModuleDeclaration,
        config: &RegistryConfig,
        now: DateTime<Utc>,
    ) -> ResolverDomainResult<ModuleDefinition> {
        self.catalog
            .register(declaration, config.max_selectors_per_module, now)
    }

    /// Seals exactly `modules` as the next version of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`],
    /// [`ResolverDomainError::BatchInProgress`], any composition error, or
    /// [`ResolverDomainError::EmptyModuleList`].
    pub fn create_configuration(
        &mut self,
        id: ConfigurationId,
        modules: &[ModuleId],
        config: &RegistryConfig,
        now: DateTime<Utc>,
    ) -> ResolverDomainResult<SealedSummary> {
        ensure_configuration_id(id)?;
        let fresh = Configuration::new(id);
        let current = self.configurations.get(&id).unwrap_or(&fresh);
        let composition =
            current.compose(modules, &self.catalog, config.max_modules_per_configuration)?;

        let configuration = self
            .configurations
            .entry(id)
            .or_insert_with(|| Configuration::new(id));
        let first_seal = !configuration.is_sealed();
        let module_count = composition.len();
        let version = configuration.seal(composition, &self.catalog, now);
        if first_seal {
            self.sealed_order.push(id);
        }
        Ok(SealedSummary {
            version,
            module_count,
        })
    }

    /// Appends `modules` to the batch of `id`, opening it when needed, and
    /// optionally seals it in the same step.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`], any composition
    /// error, or, when `seal_now` is set, any seal error. Nothing is applied
    /// when an error is returned.
    pub fn append_batch(
        &mut self,
        id: ConfigurationId,
        modules: &[ModuleId],
        seal_now: bool,
        config: &RegistryConfig,
        now: DateTime<Utc>,
    ) -> ResolverDomainResult<BatchAppend> {
        ensure_configuration_id(id)?;
        let fresh = Configuration::new(id);
        let current = self.configurations.get(&id).unwrap_or(&fresh);
        let pending = current.prepare_append(
            modules,
            &self.catalog,
            config.max_modules_per_configuration,
            now,
        )?;
        if seal_now {
            current.ensure_sealable_after(&pending, &self.catalog)?;
        }

        let appended = pending.modules().to_vec();
        let opened = pending.opens_session();
        let configuration = self
            .configurations
            .entry(id)
            .or_insert_with(|| Configuration::new(id));
        configuration.commit_append(pending);

        let sealed = if seal_now {
            Some(self.seal_open_batch(id, now)?)
        } else {
            None
        };

        Ok(BatchAppend {
            appended,
            opened,
            sealed,
        })
    }

    /// Seals the open batch of `id` as the next version.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`],
    /// [`ResolverDomainError::NoOpenBatch`],
    /// [`ResolverDomainError::EmptyModuleList`] or
    /// [`ResolverDomainError::SelectorBlacklisted`]. A failed seal leaves the
    /// batch open and unchanged.
    pub fn seal_batch(
        &mut self,
        id: ConfigurationId,
        now: DateTime<Utc>,
    ) -> ResolverDomainResult<SealedSummary> {
        ensure_configuration_id(id)?;
        self.configurations
            .get(&id)
            .ok_or(ResolverDomainError::NoOpenBatch(id))?
            .ensure_batch_sealable(&self.catalog)?;
        self.seal_open_batch(id, now)
    }

    /// Discards the open batch of `id` and returns the modules it had staged.
    ///
    /// A configuration that only existed because of the batch is removed
    /// entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`] or
    /// [`ResolverDomainError::NoOpenBatch`].
    pub fn cancel_batch(&mut self, id: ConfigurationId) -> ResolverDomainResult<Vec<ModuleId>> {
        ensure_configuration_id(id)?;
        let configuration = self
            .configurations
            .get_mut(&id)
            .ok_or(ResolverDomainError::NoOpenBatch(id))?;
        let session = configuration.take_batch()?;
        self.remove_if_vacant(id);
        Ok(session.staged().to_vec())
    }

    /// Adds selectors to the blacklist of `id` and returns the newly added
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`] or
    /// [`ResolverDomainError::NullSelector`].
    pub fn blacklist_selectors(
        &mut self,
        id: ConfigurationId,
        selectors: &[Selector],
    ) -> ResolverDomainResult<Vec<Selector>> {
        ensure_configuration_id(id)?;
        ensure_no_null_selector(selectors)?;
        let added = self
            .configurations
            .entry(id)
            .or_insert_with(|| Configuration::new(id))
            .blacklist_mut()
            .insert_all(selectors);
        self.remove_if_vacant(id);
        Ok(added)
    }

    /// Removes selectors from the blacklist of `id` and returns those that
    /// were present.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`] or
    /// [`ResolverDomainError::NullSelector`].
    pub fn unblacklist_selectors(
        &mut self,
        id: ConfigurationId,
        selectors: &[Selector],
    ) -> ResolverDomainResult<Vec<Selector>> {
        ensure_configuration_id(id)?;
        ensure_no_null_selector(selectors)?;
        let Some(configuration) = self.configurations.get_mut(&id) else {
            return Ok(Vec::new());
        };
        let removed = configuration.blacklist_mut().remove_all(selectors);
        self.remove_if_vacant(id);
        Ok(removed)
    }

    /// Returns the blacklist of `id`, which may be empty.
    #[must_use]
    pub fn blacklist(&self, id: ConfigurationId) -> Option<&Blacklist> {
        self.configurations.get(&id).map(Configuration::blacklist)
    }

    fn seal_open_batch(
        &mut self,
        id: ConfigurationId,
        now: DateTime<Utc>,
    ) -> ResolverDomainResult<SealedSummary> {
        let configuration = self
            .configurations
            .get_mut(&id)
            .ok_or(ResolverDomainError::NoOpenBatch(id))?;
        let composition = configuration.take_batch()?.into_composition();
        let first_seal = !configuration.is_sealed();
        let module_count = composition.len();
        let version = configuration.seal(composition, &self.catalog, now);
        if first_seal {
            self.sealed_order.push(id);
        }
        Ok(SealedSummary {
            version,
            module_count,
        })
    }

    fn remove_if_vacant(&mut self, id: ConfigurationId) {
        if self
            .configurations
            .get(&id)
            .is_some_and(Configuration::is_vacant)
        {
            self.configurations.remove(&id);
        }
    }
}

fn ensure_configuration_id(id: ConfigurationId) -> ResolverDomainResult<()> {
    if id.is_zero() {
        return Err(ResolverDomainError::ZeroConfigurationId);
    }
    Ok(())
}

fn ensure_no_null_selector(selectors: &[Selector]) -> ResolverDomainResult<()> {
    if selectors.contains(&Selector::NULL) {
        return Err(ResolverDomainError::NullSelector);
    }
    Ok(())
}
