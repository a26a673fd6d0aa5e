//! Unit tests for the dispatch registry.


use crate::resolver::{
    adapters::{InMemoryEventLog, InMemoryRegistryStore, PauseSwitch, StaticAccessControl},
    config::RegistryConfig,
    domain::{
        CallerId, CapabilityTag, ConfigurationId, ModuleAddress, ModuleDeclaration, ModuleId,
        Selector,
    },
    services::{DispatchResolver, RegistryAdminService},
};
use mockable::DefaultClock;
use std::sync::Arc;

pub(super) type TestAdmin =
    RegistryAdminService<StaticAccessControl, PauseSwitch, InMemoryEventLog, DefaultClock>;

pub(super) fn module_id(label: &str) -> ModuleId {
    ModuleId::from_label(label).expect("valid module label")
}

pub(super) fn config_id(label: &str) -> ConfigurationId {
    ConfigurationId::from_label(label).expect("valid configuration label")
}

pub(super) fn address(byte: u8) -> ModuleAddress {
    ModuleAddress::from_bytes([byte; 20])
}

pub(super) fn selectors(values: &[u32]) -> Vec<Selector> {
    values.iter().copied().map(Selector::from_u32).collect()
}

pub(super) fn declaration(label: &str, byte: u8, values: &[u32]) -> ModuleDeclaration {
    ModuleDeclaration::new(module_id(label), address(byte)).with_selectors(selectors(values))
}

pub(super) fn tag(value: u32) -> CapabilityTag {
    CapabilityTag::from_u32(value)
}

/// Fully wired registry with one administrator holding every role.
pub(super) struct Harness {
    pub(super) access: Arc<StaticAccessControl>,
    pub(super) pause: Arc<PauseSwitch>,
    pub(super) events: Arc<InMemoryEventLog>,
    pub(super) admin: TestAdmin,
    pub(super) resolver: DispatchResolver,
    pub(super) caller: CallerId,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub(super) fn with_config(config: RegistryConfig) -> Self {
        let store = Arc::new(InMemoryRegistryStore::with_config(config));
        let access = Arc::new(StaticAccessControl::new());
        let pause = Arc::new(PauseSwitch::new());
        let events = Arc::new(InMemoryEventLog::new());
        let caller = CallerId::new("admin").expect("valid caller id");
        access.grant_all(&caller);

        let admin = RegistryAdminService::new(
            Arc::clone(&store),
            Arc::clone(&access),
            Arc::clone(&pause),
            Arc::clone(&events),
            Arc::new(DefaultClock),
        );
        let resolver = DispatchResolver::new(store);

        Self {
            access,
            pause,
            events,
            admin,
            resolver,
            caller,
        }
    }

    pub(super) fn register(&self, label: &str, byte: u8, values: &[u32]) -> ModuleId {
        self.admin
            .register_module(&self.caller, declaration(label, byte, values))
            .expect("module registration should succeed")
            .id()
    }

    /// Registers module A `{0x01, 0x02}` and module B `{0x03}` and seals
    /// them as version 1 of `CFG1`.
    pub(super) fn seed_cfg1(&self) -> (ModuleId, ModuleId) {
        let a = self.register("A", 0xaa, &[0x01, 0x02]);
        let b = self.register("B", 0xbb, &[0x03]);
        let version = self
            .admin
            .create_configuration(&self.caller, config_id("CFG1"), &[a, b])
            .expect("configuration should seal");
        assert_eq!(version.get(), 1);
        (a, b)
    }
}
