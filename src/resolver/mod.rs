//! Versioned dynamic-dispatch registry.
//!
//! A proxy asks this module which pluggable module implements a call
//! selector for a given configuration and version. Administrators register
//! modules in an append-only catalog, compose them into versioned
//! configurations (in one call or through a batch session spanning several
//! calls) and maintain a per-configuration selector blacklist. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Registry limits in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
