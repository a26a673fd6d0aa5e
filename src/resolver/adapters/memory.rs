//! In-memory registry store and event log.

use crate::resolver::{
    config::RegistryConfig,
    domain::{RegistryEvent, RegistryState},
    ports::RegistryEventSink,
};
use parking_lot::{Mutex, RwLock};

/// Thread-safe holder of the authoritative [`RegistryState`] and the
/// limits it is mutated under.
///
/// Readers share the lock; a mutation holds it exclusively from validation
/// through event delivery, so readers observe either the state before a
/// call or the state after it.
#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    state: RwLock<RegistryState>,
    config: RegistryConfig,
}

impl InMemoryRegistryStore {
    /// Creates an empty store with the default [`RegistryConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store enforcing `config`.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            state: RwLock::default(),
            config,
        }
    }

    /// Returns the limits in force.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Runs `f` against a shared view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&RegistryState) -> R) -> R {
        f(&*self.state.read())
    }

    /// Runs `f` with exclusive access to the state.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut *self.state.write())
    }
}

/// Event sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<RegistryEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Returns the recorded event names in delivery order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .iter()
            .map(|event| event.kind().name())
            .collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl RegistryEventSink for InMemoryEventLog {
    fn publish(&self, event: &RegistryEvent) {
        self.events.lock().push(event.clone());
    }
}
