//! Shared world state for dispatch registry BDD scenarios.

use dispatch_registry::resolver::{
    adapters::{InMemoryEventLog, InMemoryRegistryStore, PauseSwitch, StaticAccessControl},
    domain::{
        CallerId, ConfigurationId, ModuleAddress, ModuleId, RegistryAction, Selector, Version,
    },
    services::{DispatchResolver, RegistryAdminService, ResolverServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::collections::HashMap;
use std::sync::Arc;

/// Admin service type used by the BDD world.
pub type TestAdmin =
    RegistryAdminService<StaticAccessControl, PauseSwitch, InMemoryEventLog, DefaultClock>;

/// A module registered during the scenario.
#[derive(Debug, Clone, Copy)]
pub struct KnownModule {
    /// Catalog id.
    pub id: ModuleId,
    /// Address its selectors resolve to.
    pub address: ModuleAddress,
}

/// Scenario world for dispatch registry behaviour tests.
pub struct RegistryWorld {
    /// Role table shared with the admin service.
    pub access: Arc<StaticAccessControl>,
    /// Pause switch shared with the admin service.
    pub pause: Arc<PauseSwitch>,
    /// Mutating side.
    pub admin: TestAdmin,
    /// Read side.
    pub resolver: DispatchResolver,
    /// Caller issuing every mutation.
    pub caller: CallerId,
    /// Modules registered so far, by scenario name.
    pub modules: HashMap<String, KnownModule>,
    /// Outcome of the last mutation issued by a `when` step.
    pub last_result: Option<Result<Option<Version>, ResolverServiceError>>,
}

impl RegistryWorld {
    /// Creates a world whose caller holds every role.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryRegistryStore::new());
        let access = Arc::new(StaticAccessControl::new());
        let pause = Arc::new(PauseSwitch::new());
        let caller = CallerId::new("scenario-admin").expect("valid scenario caller");
        access.grant_all(&caller);

        let admin = RegistryAdminService::new(
            Arc::clone(&store),
            Arc::clone(&access),
            Arc::clone(&pause),
            Arc::new(InMemoryEventLog::new()),
            Arc::new(DefaultClock),
        );

        Self {
            access,
            pause,
            admin,
            resolver: DispatchResolver::new(store),
            caller,
            modules: HashMap::new(),
            last_result: None,
        }
    }

    /// Looks up a module registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when no module has that name.
    pub fn module(&self, name: &str) -> Result<KnownModule, eyre::Report> {
        self.modules
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("module '{name}' was not registered in this scenario"))
    }

    /// Resolves a comma-separated list of module names.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name.
    pub fn module_ids(&self, names: &str) -> Result<Vec<ModuleId>, eyre::Report> {
        split_list(names)
            .map(|name| self.module(name).map(|known| known.id))
            .collect()
    }

    /// Revokes every role from the scenario caller.
    pub fn revoke_all(&self) {
        for action in RegistryAction::ALL {
            self.access.revoke(&self.caller, action);
        }
    }

    /// Returns the outcome of the last mutation.
    ///
    /// # Errors
    ///
    /// Returns an error when no `when` step ran.
    pub fn last_result(
        &self,
    ) -> Result<&Result<Option<Version>, ResolverServiceError>, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing mutation result in scenario world"))
    }
}

impl Default for RegistryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}

/// Splits a comma-separated list, ignoring blanks.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Parses a comma-separated list of hex selectors.
///
/// # Errors
///
/// Returns an error for malformed selectors.
pub fn parse_selectors(raw: &str) -> Result<Vec<Selector>, eyre::Report> {
    split_list(raw)
        .map(|item| item.parse::<Selector>().map_err(eyre::Report::from))
        .collect()
}

/// Parses a configuration label.
///
/// # Errors
///
/// Returns an error for an invalid label.
pub fn parse_config(raw: &str) -> Result<ConfigurationId, eyre::Report> {
    ConfigurationId::from_label(raw).map_err(eyre::Report::from)
}
