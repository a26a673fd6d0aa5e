//! Module declarations and the validated catalog record.

use super::{
    CapabilityTag, ModuleAddress, ModuleId, ResolverDomainError, ResolverDomainResult, Selector,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Unvalidated module description submitted for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeclaration {
    id: ModuleId,
    address: ModuleAddress,
    selectors: Vec<Selector>,
    capabilities: Vec<CapabilityTag>,
}

impl ModuleDeclaration {
    /// Creates a declaration with no selectors or capability tags.
    #[must_use]
    pub const fn new(id: ModuleId, address: ModuleAddress) -> Self {
        Self {
            id,
            address,
            selectors: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Sets the declared selectors.
    #[must_use]
    pub fn with_selectors(mut self, selectors: impl IntoIterator<Item = Selector>) -> Self {
        self.selectors = selectors.into_iter().collect();
        self
    }

    /// Sets the declared capability tags.
    #[must_use]
    pub fn with_capabilities(mut self, tags: impl IntoIterator<Item = CapabilityTag>) -> Self {
        self.capabilities = tags.into_iter().collect();
        self
    }

    /// Returns the declared module id.
    #[must_use]
    pub const fn id(&self) -> ModuleId {
        self.id
    }

    /// Returns the declared address.
    #[must_use]
    pub const fn address(&self) -> ModuleAddress {
        self.address
    }

    /// Returns the declared selectors.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Returns the declared capability tags.
    #[must_use]
    pub fn capabilities(&self) -> &[CapabilityTag] {
        &self.capabilities
    }
}

/// A module as recorded in the catalog.
///
/// Selectors are non-empty, free of the null selector and of duplicates.
/// Capability tags keep declaration order with duplicates collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDefinition {
    id: ModuleId,
    address: ModuleAddress,
    selectors: Vec<Selector>,
    capabilities: Vec<CapabilityTag>,
    registered_at: DateTime<Utc>,
}

impl ModuleDefinition {
    /// Validates a declaration into a catalog record.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroModuleId`],
    /// [`ResolverDomainError::UnsetModuleAddress`],
    /// [`ResolverDomainError::EmptySelectorSet`],
    /// [`ResolverDomainError::NullSelector`],
    /// [`ResolverDomainError::DuplicateSelectorInModule`] or
    /// [`ResolverDomainError::TooManySelectors`], checked in that order.
    pub fn from_declaration(
        declaration: ModuleDeclaration,
        max_selectors: usize,
        registered_at: DateTime<Utc>,
    ) -> ResolverDomainResult<Self> {
        let ModuleDeclaration {
            id,
            address,
            selectors,
            capabilities,
        } = declaration;

        if id.is_zero() {
            return Err(ResolverDomainError::ZeroModuleId);
        }
        if address.is_unset() {
            return Err(ResolverDomainError::UnsetModuleAddress(id));
        }
        if selectors.is_empty() {
            return Err(ResolverDomainError::EmptySelectorSet(id));
        }
        if selectors.contains(&Selector::NULL) {
            return Err(ResolverDomainError::NullSelector);
        }

        let mut seen = HashSet::with_capacity(selectors.len());
        for selector in &selectors {
            if !seen.insert(*selector) {
                return Err(ResolverDomainError::DuplicateSelectorInModule {
                    module: id,
                    selector: *selector,
                });
            }
        }

        if selectors.len() > max_selectors {
            return Err(ResolverDomainError::TooManySelectors {
                module: id,
                count: selectors.len(),
                limit: max_selectors,
            });
        }

        let mut seen_tags = HashSet::with_capacity(capabilities.len());
        let unique_tags = capabilities
            .into_iter()
            .filter(|tag| seen_tags.insert(*tag))
            .collect();

        Ok(Self {
            id,
            address,
            selectors,
            capabilities: unique_tags,
            registered_at,
        })
    }

    /// Returns the module id.
    #[must_use]
    pub const fn id(&self) -> ModuleId {
        self.id
    }

    /// Returns the address calls are delegated to.
    #[must_use]
    pub const fn address(&self) -> ModuleAddress {
        self.address
    }

    /// Returns the declared selectors in declaration order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Returns the declared capability tags in declaration order.
    #[must_use]
    pub fn capabilities(&self) -> &[CapabilityTag] {
        &self.capabilities
    }

    /// Returns `true` when the module declares `selector`.
    #[must_use]
    pub fn declares(&self, selector: Selector) -> bool {
        self.selectors.contains(&selector)
    }

    /// Returns `true` when the module declares `tag`.
    #[must_use]
    pub fn supports(&self, tag: CapabilityTag) -> bool {
        self.capabilities.contains(&tag)
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
