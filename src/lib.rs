//! Dispatch registry: versioned selector-to-module routing for proxies.
//!
//! A proxy forwards each incoming call to the module that implements its
//! selector. This crate keeps the catalog of pluggable modules, composes them
//! into immutable, versioned configurations and answers resolution and
//! capability queries against any sealed version.
//!
//! # Architecture
//!
//! The registry follows hexagonal architecture principles:
//!
//! - **Domain**: identifiers, catalog, compositions, sealed versions and
//!   blacklists, with no locking or authorization concerns
//! - **Ports**: access control, pause and event sink traits
//! - **Adapters**: in-memory store, role table, pause switch and event sinks
//! - **Services**: the gated admin service and the read-only resolver
//!
//! # Modules
//!
//! - [`resolver`]: the dispatch registry bounded context

pub mod resolver;
