//! Append-only module catalog.

use super::{
    ModuleDeclaration, ModuleDefinition, ModuleId, ResolverDomainError, ResolverDomainResult,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Every module ever registered, keyed by id, in registration order.
///
/// Entries are never removed or replaced.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<ModuleId, ModuleDefinition>,
    order: Vec<ModuleId>,
}

impl ModuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and records a new module.
    ///
    /// No cross-module validation happens here; selector collisions are only
    /// detected when modules are combined into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ModuleAlreadyRegistered`] when the id is
    /// known, or any error of [`ModuleDefinition::from_declaration`].
    pub fn register(
        &mut self,
        declaration: ModuleDeclaration,
        max_selectors: usize,
        registered_at: DateTime<Utc>,
    ) -> ResolverDomainResult<ModuleDefinition> {
        let id = declaration.id();
        if id.is_zero() {
            return Err(ResolverDomainError::ZeroModuleId);
        }
        if self.modules.contains_key(&id) {
            return Err(ResolverDomainError::ModuleAlreadyRegistered(id));
        }

        let definition =
            ModuleDefinition::from_declaration(declaration, max_selectors, registered_at)?;
        self.order.push(id);
        self.modules.insert(id, definition.clone());
        Ok(definition)
    }

    /// Returns the module with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ModuleNotRegistered`] when absent.
    pub fn get(&self, id: ModuleId) -> ResolverDomainResult<&ModuleDefinition> {
        self.modules
            .get(&id)
            .ok_or(ResolverDomainError::ModuleNotRegistered(id))
    }

    /// Returns the module with `id`, or `None` when absent.
    #[must_use]
    pub fn find(&self, id: ModuleId) -> Option<&ModuleDefinition> {
        self.modules.get(&id)
    }

    /// Returns `true` when `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    /// Returns the number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no module is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns module ids in registration order.
    #[must_use]
    pub fn ids(&self) -> &[ModuleId] {
        &self.order
    }
}
