//! Mutating registry operations behind the authorization and pause gates.
//!
//! Every call checks, in order, the sentinel identifier, the caller's role
//! and the pause switch before the registry state is touched. Committed
//! mutations are published to the event sink while the write lock is still
//! held, so sinks observe them in commit order.

use crate::resolver::{
    adapters::InMemoryRegistryStore,
    config::RegistryConfig,
    domain::{
        BatchAppend, CallerId, ConfigurationId, ErrorCategory, ModuleDeclaration, ModuleDefinition,
        ModuleId, RegistryAction, RegistryEvent, RegistryEventKind, ResolverDomainError,
        ResolverDomainResult, SealedSummary, Selector, Version,
    },
    ports::{AccessControl, PauseState, RegistryEventSink},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ResolverDomainError),

    /// The caller does not hold the role the action requires.
    #[error("caller {caller} is not authorized to {action}")]
    AccessDenied {
        /// Rejected caller.
        caller: CallerId,
        /// Requested action.
        action: RegistryAction,
    },

    /// Mutations are refused while the registry is paused.
    #[error("registry is paused")]
    Paused,
}

impl ResolverServiceError {
    /// Returns the error taxonomy bucket.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(err) => err.category(),
            Self::AccessDenied { .. } => ErrorCategory::Authorization,
            Self::Paused => ErrorCategory::Paused,
        }
    }
}

/// Result type for registry service operations.
pub type ResolverServiceResult<T> = Result<T, ResolverServiceError>;

/// Administrative entry point for catalog, configuration and blacklist
/// mutations.
pub struct RegistryAdminService<A, P, E, C>
where
    A: AccessControl,
    P: PauseState,
    E: RegistryEventSink,
    C: Clock + Send + Sync,
{
    store: Arc<InMemoryRegistryStore>,
    access: Arc<A>,
    pause: Arc<P>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<A, P, E, C> RegistryAdminService<A, P, E, C>
where
    A: AccessControl,
    P: PauseState,
    E: RegistryEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a service enforcing the limits held by `store`.
    #[must_use]
    pub fn new(
        store: Arc<InMemoryRegistryStore>,
        access: Arc<A>,
        pause: Arc<P>,
        events: Arc<E>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            access,
            pause,
            events,
            clock,
        }
    }

    /// Returns the registry limits in force.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        self.store.config()
    }

    /// Adds a module to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroModuleId`] before any gate,
    /// [`ResolverServiceError::AccessDenied`],
    /// [`ResolverServiceError::Paused`], or a catalog validation error.
    pub fn register_module(
        &self,
        caller: &CallerId,
        declaration: ModuleDeclaration,
    ) -> ResolverServiceResult<ModuleDefinition> {
        if declaration.id().is_zero() {
            return Err(self.reject(ResolverDomainError::ZeroModuleId.into()));
        }
        self.gate(caller, RegistryAction::RegisterModule)?;

        let definition = self
            .store
            .write(|state| -> ResolverDomainResult<ModuleDefinition> {
                let now = self.clock.utc();
                let definition = state.register_module(declaration, self.store.config(), now)?;
                self.publish(
                    caller,
                    RegistryEventKind::ModuleRegistered {
                        module: definition.id(),
                        address: definition.address(),
                    },
                    now,
                );
                Ok(definition)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(
            module = %definition.id(),
            address = %definition.address(),
            selectors = definition.selectors().len(),
            "module registered"
        );
        Ok(definition)
    }

    /// Seals exactly `modules` as the next version of `configuration`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`],
    /// [`ResolverServiceError::AccessDenied`],
    /// [`ResolverServiceError::Paused`],
    /// [`ResolverDomainError::BatchInProgress`] or a composition error.
    pub fn create_configuration(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
        modules: &[ModuleId],
    ) -> ResolverServiceResult<Version> {
        self.gate_configuration(caller, configuration)?;

        let summary = self
            .store
            .write(|state| -> ResolverDomainResult<SealedSummary> {
                let now = self.clock.utc();
                let summary =
                    state.create_configuration(configuration, modules, self.store.config(), now)?;
                self.publish(
                    caller,
                    RegistryEventKind::ConfigurationSealed {
                        configuration,
                        version: summary.version,
                        module_count: summary.module_count,
                    },
                    now,
                );
                Ok(summary)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(
            configuration = %configuration,
            version = %summary.version,
            modules = summary.module_count,
            "configuration sealed"
        );
        Ok(summary.version)
    }

    /// Appends `modules` to the batch of `configuration`, opening one seeded
    /// from the latest sealed version when none is open.
    ///
    /// Returns the sealed version when `seal_now` is set.
    ///
    /// # Errors
    ///
    /// Returns the gate errors of [`Self::create_configuration`], a
    /// composition error, or, with `seal_now`, a seal error. A failed call
    /// leaves the batch exactly as it was.
    pub fn create_batch_configuration(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
        modules: &[ModuleId],
        seal_now: bool,
    ) -> ResolverServiceResult<Option<Version>> {
        self.gate_configuration(caller, configuration)?;

        let outcome = self
            .store
            .write(|state| -> ResolverDomainResult<BatchAppend> {
                let now = self.clock.utc();
                let outcome =
                    state.append_batch(configuration, modules, seal_now, self.store.config(), now)?;
                self.publish_append(caller, configuration, &outcome, now);
                Ok(outcome)
            })
            .map_err(|err| self.reject(err.into()))?;

        if outcome.opened {
            debug!(configuration = %configuration, "batch session opened");
        }
        info!(
            configuration = %configuration,
            appended = outcome.appended.len(),
            "modules staged"
        );
        if let Some(sealed) = outcome.sealed {
            info!(
                configuration = %configuration,
                version = %sealed.version,
                modules = sealed.module_count,
                "configuration sealed"
            );
        }
        Ok(outcome.sealed.map(|sealed| sealed.version))
    }

    /// Seals the open batch of `configuration` as its next version.
    ///
    /// # Errors
    ///
    /// Returns the gate errors, [`ResolverDomainError::NoOpenBatch`],
    /// [`ResolverDomainError::EmptyModuleList`] or
    /// [`ResolverDomainError::SelectorBlacklisted`].
    pub fn seal_batch_configuration(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
    ) -> ResolverServiceResult<Version> {
        self.gate_configuration(caller, configuration)?;

        let summary = self
            .store
            .write(|state| -> ResolverDomainResult<SealedSummary> {
                let now = self.clock.utc();
                let summary = state.seal_batch(configuration, now)?;
                self.publish(
                    caller,
                    RegistryEventKind::ConfigurationSealed {
                        configuration,
                        version: summary.version,
                        module_count: summary.module_count,
                    },
                    now,
                );
                Ok(summary)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(
            configuration = %configuration,
            version = %summary.version,
            modules = summary.module_count,
            "configuration sealed"
        );
        Ok(summary.version)
    }

    /// Discards the open batch of `configuration` and returns the modules
    /// it had staged.
    ///
    /// # Errors
    ///
    /// Returns the gate errors or [`ResolverDomainError::NoOpenBatch`].
    pub fn cancel_batch_configuration(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
    ) -> ResolverServiceResult<Vec<ModuleId>> {
        self.gate_configuration(caller, configuration)?;

        let discarded = self
            .store
            .write(|state| -> ResolverDomainResult<Vec<ModuleId>> {
                let now = self.clock.utc();
                let discarded = state.cancel_batch(configuration)?;
                self.publish(
                    caller,
                    RegistryEventKind::BatchCancelled {
                        configuration,
                        discarded: discarded.clone(),
                    },
                    now,
                );
                Ok(discarded)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(
            configuration = %configuration,
            discarded = discarded.len(),
            "batch cancelled"
        );
        Ok(discarded)
    }

    /// Vetoes `selectors` in `configuration` and returns those newly added.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::ZeroConfigurationId`],
    /// [`ResolverServiceError::AccessDenied`],
    /// [`ResolverServiceError::Paused`] or
    /// [`ResolverDomainError::NullSelector`].
    pub fn add_selectors_to_blacklist(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
        selectors: &[Selector],
    ) -> ResolverServiceResult<Vec<Selector>> {
        self.gate_blacklist(caller, configuration)?;

        let added = self
            .store
            .write(|state| -> ResolverDomainResult<Vec<Selector>> {
                let now = self.clock.utc();
                let added = state.blacklist_selectors(configuration, selectors)?;
                if !added.is_empty() {
                    self.publish(
                        caller,
                        RegistryEventKind::SelectorsBlacklisted {
                            configuration,
                            selectors: added.clone(),
                        },
                        now,
                    );
                }
                Ok(added)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(configuration = %configuration, added = added.len(), "selectors blacklisted");
        Ok(added)
    }

    /// Lifts the veto on `selectors` in `configuration` and returns those
    /// that were vetoed.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::add_selectors_to_blacklist`].
    pub fn remove_selectors_from_blacklist(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
        selectors: &[Selector],
    ) -> ResolverServiceResult<Vec<Selector>> {
        self.gate_blacklist(caller, configuration)?;

        let removed = self
            .store
            .write(|state| -> ResolverDomainResult<Vec<Selector>> {
                let now = self.clock.utc();
                let removed = state.unblacklist_selectors(configuration, selectors)?;
                if !removed.is_empty() {
                    self.publish(
                        caller,
                        RegistryEventKind::SelectorsUnblacklisted {
                            configuration,
                            selectors: removed.clone(),
                        },
                        now,
                    );
                }
                Ok(removed)
            })
            .map_err(|err| self.reject(err.into()))?;

        info!(
            configuration = %configuration,
            removed = removed.len(),
            "selectors unblacklisted"
        );
        Ok(removed)
    }

    fn gate_configuration(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
    ) -> ResolverServiceResult<()> {
        if configuration.is_zero() {
            return Err(self.reject(ResolverDomainError::ZeroConfigurationId.into()));
        }
        self.gate(caller, RegistryAction::ComposeConfiguration)
    }

    fn gate_blacklist(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
    ) -> ResolverServiceResult<()> {
        if configuration.is_zero() {
            return Err(self.reject(ResolverDomainError::ZeroConfigurationId.into()));
        }
        self.gate(caller, RegistryAction::ManageBlacklist)
    }

    fn gate(&self, caller: &CallerId, action: RegistryAction) -> ResolverServiceResult<()> {
        if !self.access.is_authorized(caller, action) {
            return Err(self.reject(ResolverServiceError::AccessDenied {
                caller: caller.clone(),
                action,
            }));
        }
        if self.pause.is_paused() {
            return Err(self.reject(ResolverServiceError::Paused));
        }
        Ok(())
    }

    fn reject(&self, err: ResolverServiceError) -> ResolverServiceError {
        debug!(
            error = %err,
            category = err.category().as_str(),
            "registry mutation rejected"
        );
        err
    }

    fn publish_append(
        &self,
        caller: &CallerId,
        configuration: ConfigurationId,
        outcome: &BatchAppend,
        now: DateTime<Utc>,
    ) {
        if outcome.opened || !outcome.appended.is_empty() {
            self.publish(
                caller,
                RegistryEventKind::BatchAppended {
                    configuration,
                    modules: outcome.appended.clone(),
                },
                now,
            );
        }
        if let Some(sealed) = outcome.sealed {
            self.publish(
                caller,
                RegistryEventKind::ConfigurationSealed {
                    configuration,
                    version: sealed.version,
                    module_count: sealed.module_count,
                },
                now,
            );
        }
    }

    fn publish(&self, caller: &CallerId, kind: RegistryEventKind, now: DateTime<Utc>) {
        self.events
            .publish(&RegistryEvent::new(caller.clone(), kind, now));
    }
}
