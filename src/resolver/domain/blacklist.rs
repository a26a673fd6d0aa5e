//! Per-configuration selector veto set.

use super::{ConfigurationId, ResolverDomainError, ResolverDomainResult, Selector};
use std::collections::BTreeSet;

/// Selectors that must never resolve within one configuration.
///
/// The set is independent of versions and survives every seal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    selectors: BTreeSet<Selector>,
}

impl Blacklist {
    /// Creates an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `selector` is vetoed.
    #[must_use]
    pub fn contains(&self, selector: Selector) -> bool {
        self.selectors.contains(&selector)
    }

    /// Returns the number of vetoed selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Returns `true` when nothing is vetoed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Iterates vetoed selectors in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Selector> + '_ {
        self.selectors.iter().copied()
    }

    /// Adds selectors and returns those that were not yet present.
    pub fn insert_all(&mut self, selectors: &[Selector]) -> Vec<Selector> {
        selectors
            .iter()
            .copied()
            .filter(|selector| self.selectors.insert(*selector))
            .collect()
    }

    /// Removes selectors and returns those that were present.
    pub fn remove_all(&mut self, selectors: &[Selector]) -> Vec<Selector> {
        selectors
            .iter()
            .copied()
            .filter(|selector| self.selectors.remove(selector))
            .collect()
    }

    /// Checks that none of `selectors` is vetoed.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::SelectorBlacklisted`] for the first
    /// vetoed selector.
    pub fn ensure_allows<'a>(
        &self,
        configuration: ConfigurationId,
        selectors: impl IntoIterator<Item = &'a Selector>,
    ) -> ResolverDomainResult<()> {
        match selectors.into_iter().find(|selector| self.contains(**selector)) {
            Some(selector) => Err(ResolverDomainError::SelectorBlacklisted {
                configuration,
                selector: *selector,
            }),
            None => Ok(()),
        }
    }
}
