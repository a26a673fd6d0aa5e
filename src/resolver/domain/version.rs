//! Immutable sealed versions and their derived indexes.

use super::{CapabilityTag, Composition, ModuleCatalog, ModuleId, Selector, Version};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

/// One sealed revision of a configuration.
///
/// Holds the ordered module list together with the selector index
/// (selector → owning module) and the capability index built at seal time.
/// Nothing in a sealed version changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedVersion {
    version: Version,
    modules: Vec<ModuleId>,
    selector_index: HashMap<Selector, ModuleId>,
    capability_index: BTreeSet<CapabilityTag>,
    sealed_at: DateTime<Utc>,
}

impl SealedVersion {
    pub(crate) fn seal(
        version: Version,
        composition: Composition,
        catalog: &ModuleCatalog,
        sealed_at: DateTime<Utc>,
    ) -> Self {
        let (modules, selector_index) = composition.into_parts();
        let capability_index = modules
            .iter()
            .filter_map(|id| catalog.find(*id))
            .flat_map(|definition| definition.capabilities().iter().copied())
            .collect();

        Self {
            version,
            modules,
            selector_index,
            capability_index,
            sealed_at,
        }
    }

    /// Returns the version number.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns module ids in composition order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }

    /// Returns the number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when `module` is part of this version.
    #[must_use]
    pub fn contains_module(&self, module: ModuleId) -> bool {
        self.modules.contains(&module)
    }

    /// Returns the module owning `selector` in this version.
    #[must_use]
    pub fn selector_owner(&self, selector: Selector) -> Option<ModuleId> {
        self.selector_index.get(&selector).copied()
    }

    /// Returns the full selector index.
    #[must_use]
    pub const fn selector_index(&self) -> &HashMap<Selector, ModuleId> {
        &self.selector_index
    }

    /// Returns `true` when some module of this version declares `tag`.
    #[must_use]
    pub fn supports(&self, tag: CapabilityTag) -> bool {
        self.capability_index.contains(&tag)
    }

    /// Iterates the capability index in ascending order.
    pub fn capabilities(&self) -> impl Iterator<Item = CapabilityTag> + '_ {
        self.capability_index.iter().copied()
    }

    /// Returns the seal timestamp.
    #[must_use]
    pub const fn sealed_at(&self) -> DateTime<Utc> {
        self.sealed_at
    }
}
