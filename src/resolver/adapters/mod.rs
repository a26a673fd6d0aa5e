//! Adapter implementations for the dispatch registry ports.

pub mod access;
pub mod memory;
pub mod tracing_sink;

pub use access::{PauseSwitch, StaticAccessControl};
pub use memory::{InMemoryEventLog, InMemoryRegistryStore};
pub use tracing_sink::TracingEventSink;
