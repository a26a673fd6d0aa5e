//! Port definitions for the dispatch registry.

pub mod access;
pub mod events;

pub use access::{AccessControl, PauseState};
pub use events::RegistryEventSink;
