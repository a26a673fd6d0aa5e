//! Staging arena for a module list that has not been sealed yet.

use super::{
    Blacklist, ConfigurationId, ModuleCatalog, ModuleDefinition, ModuleId, ResolverDomainError,
    ResolverDomainResult, SealedVersion, Selector,
};
use std::collections::{HashMap, HashSet};

/// Ordered, duplicate-free module list with its selector reverse index.
///
/// Appends are validated against the reverse index before anything is
/// written, so a rejected append leaves the composition untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    modules: Vec<ModuleId>,
    selector_owner: HashMap<Selector, ModuleId>,
}

/// A validated append, ready to be applied.
#[derive(Debug)]
pub(crate) struct Extension {
    modules: Vec<ModuleId>,
    claims: HashMap<Selector, ModuleId>,
}

impl Extension {
    pub(crate) fn modules(&self) -> &[ModuleId] {
        &self.modules
    }
}

impl Composition {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composition holding the module list of a sealed version.
    #[must_use]
    pub fn seeded_from(version: &SealedVersion) -> Self {
        Self {
            modules: version.modules().to_vec(),
            selector_owner: version.selector_index().clone(),
        }
    }

    /// Returns the staged module ids in order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }

    /// Returns the number of staged modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns `true` when `module` is staged.
    #[must_use]
    pub fn contains(&self, module: ModuleId) -> bool {
        self.modules.contains(&module)
    }

    /// Returns the staged owner of `selector`.
    #[must_use]
    pub fn owner_of(&self, selector: Selector) -> Option<ModuleId> {
        self.selector_owner.get(&selector).copied()
    }

    pub(crate) fn into_parts(self) -> (Vec<ModuleId>, HashMap<Selector, ModuleId>) {
        (self.modules, self.selector_owner)
    }

    /// Validates appending `incoming` without modifying the composition.
    ///
    /// Each rule is checked across the whole append before the next one:
    /// catalog membership, duplicate modules, selector collisions, blacklist,
    /// then the size limit.
    pub(crate) fn prepare(
        &self,
        configuration: ConfigurationId,
        incoming: &[ModuleId],
        catalog: &ModuleCatalog,
        blacklist: &Blacklist,
        max_modules: usize,
    ) -> ResolverDomainResult<Extension> {
        let definitions = incoming
            .iter()
            .map(|id| catalog.get(*id))
            .collect::<ResolverDomainResult<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(definitions.len());
        for definition in &definitions {
            let id = definition.id();
            if self.contains(id) || !seen.insert(id) {
                return Err(ResolverDomainError::DuplicateModuleInConfiguration {
                    configuration,
                    module: id,
                });
            }
        }

        let mut claims: HashMap<Selector, ModuleId> = HashMap::new();
        for definition in &definitions {
            for selector in definition.selectors() {
                let claimed_by = self
                    .selector_owner
                    .get(selector)
                    .or_else(|| claims.get(selector))
                    .copied();
                if let Some(claimed_by) = claimed_by {
                    return Err(ResolverDomainError::SelectorCollision {
                        configuration,
                        selector: *selector,
                        claimed_by,
                        incoming: definition.id(),
                    });
                }
                claims.insert(*selector, definition.id());
            }
        }

        blacklist.ensure_allows(
            configuration,
            definitions.iter().copied().flat_map(ModuleDefinition::selectors),
        )?;

        let count = self.modules.len() + definitions.len();
        if count > max_modules {
            return Err(ResolverDomainError::ConfigurationTooLarge {
                configuration,
                count,
                limit: max_modules,
            });
        }

        Ok(Extension {
            modules: definitions.iter().map(|definition| definition.id()).collect(),
            claims,
        })
    }

    pub(crate) fn apply(&mut self, extension: Extension) {
        self.modules.extend(extension.modules);
        self.selector_owner.extend(extension.claims);
    }

    /// Checks the staged list can become a sealed version.
    pub(crate) fn ensure_sealable(
        &self,
        configuration: ConfigurationId,
        catalog: &ModuleCatalog,
        blacklist: &Blacklist,
    ) -> ResolverDomainResult<()> {
        if self.modules.is_empty() {
            return Err(ResolverDomainError::EmptyModuleList(configuration));
        }
        self.ensure_allowed(configuration, catalog, blacklist)
    }

    /// Re-checks every staged selector against the blacklist, which may have
    /// changed since the modules were staged.
    pub(crate) fn ensure_allowed(
        &self,
        configuration: ConfigurationId,
        catalog: &ModuleCatalog,
        blacklist: &Blacklist,
    ) -> ResolverDomainResult<()> {
        for module in &self.modules {
            let definition = catalog.get(*module)?;
            blacklist.ensure_allows(configuration, definition.selectors())?;
        }
        Ok(())
    }
}
