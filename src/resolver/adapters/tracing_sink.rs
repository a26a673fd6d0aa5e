//! Event sink that writes structured log records.

use crate::resolver::{domain::RegistryEvent, ports::RegistryEventSink};
use tracing::{info, warn};

/// Logs each event at `info` level with its JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl RegistryEventSink for TracingEventSink {
    fn publish(&self, event: &RegistryEvent) {
        match serde_json::to_string(event.kind()) {
            Ok(payload) => info!(
                event = event.kind().name(),
                caller = %event.caller(),
                occurred_at = %event.occurred_at(),
                payload = %payload,
                "registry event"
            ),
            Err(err) => warn!(
                event = event.kind().name(),
                error = %err,
                "registry event could not be serialized"
            ),
        }
    }
}
