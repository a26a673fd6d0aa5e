//! Shared wiring for in-memory registry integration tests.

use dispatch_registry::resolver::{
    adapters::{InMemoryEventLog, InMemoryRegistryStore, PauseSwitch, StaticAccessControl},
    config::RegistryConfig,
    domain::{
        CallerId, ConfigurationId, ModuleAddress, ModuleDeclaration, ModuleId, Selector,
    },
    services::{DispatchResolver, RegistryAdminService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Admin service type wired to the in-memory adapters.
pub type Admin =
    RegistryAdminService<StaticAccessControl, PauseSwitch, InMemoryEventLog, DefaultClock>;

/// A registry sharing one store between its admin and read sides.
pub struct Registry {
    /// Role table.
    pub access: Arc<StaticAccessControl>,
    /// Pause switch.
    pub pause: Arc<PauseSwitch>,
    /// Recorded events.
    pub events: Arc<InMemoryEventLog>,
    /// Mutating side.
    pub admin: Arc<Admin>,
    /// Read side.
    pub resolver: DispatchResolver,
    /// Caller holding every role.
    pub operator: CallerId,
}

impl Registry {
    /// Builds a registry with `config` and one fully privileged operator.
    pub fn with_config(config: RegistryConfig) -> Self {
        let store = Arc::new(InMemoryRegistryStore::with_config(config));
        let access = Arc::new(StaticAccessControl::new());
        let pause = Arc::new(PauseSwitch::new());
        let events = Arc::new(InMemoryEventLog::new());
        let operator = caller("operator");
        access.grant_all(&operator);

        let admin = RegistryAdminService::new(
            Arc::clone(&store),
            Arc::clone(&access),
            Arc::clone(&pause),
            Arc::clone(&events),
            Arc::new(DefaultClock),
        );

        Self {
            access,
            pause,
            events,
            admin: Arc::new(admin),
            resolver: DispatchResolver::new(store),
            operator,
        }
    }

    /// Registers a module whose address is `byte` repeated.
    pub fn module(&self, label: &str, byte: u8, values: &[u32]) -> ModuleId {
        let declaration = ModuleDeclaration::new(module_id(label), address(byte))
            .with_selectors(values.iter().copied().map(Selector::from_u32));
        self.admin
            .register_module(&self.operator, declaration)
            .expect("module registration should succeed")
            .id()
    }
}

/// Provides a registry with default limits.
#[fixture]
pub fn registry() -> Registry {
    Registry::with_config(RegistryConfig::default())
}

/// Builds a caller id.
pub fn caller(name: &str) -> CallerId {
    CallerId::new(name).expect("valid caller id")
}

/// Builds a module id from a label.
pub fn module_id(label: &str) -> ModuleId {
    ModuleId::from_label(label).expect("valid module label")
}

/// Builds a configuration id from a label.
pub fn config_id(label: &str) -> ConfigurationId {
    ConfigurationId::from_label(label).expect("valid configuration label")
}

/// Builds an address with every byte set to `byte`.
pub fn address(byte: u8) -> ModuleAddress {
    ModuleAddress::from_bytes([byte; 20])
}

/// Builds a selector from its integer value.
pub fn sel(value: u32) -> Selector {
    Selector::from_u32(value)
}
