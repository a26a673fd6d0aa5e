//! Event sink port.

use crate::resolver::domain::RegistryEvent;
use std::sync::Arc;

/// Receives one event per committed mutation.
///
/// Events are delivered while the registry write lock is held, in commit
/// order. Implementations must not call back into the registry.
pub trait RegistryEventSink: Send + Sync {
    /// Records `event`.
    fn publish(&self, event: &RegistryEvent);
}

impl<T: RegistryEventSink + ?Sized> RegistryEventSink for Arc<T> {
    fn publish(&self, event: &RegistryEvent) {
        (**self).publish(event);
    }
}
