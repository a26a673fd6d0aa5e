//! Domain model for the dispatch registry.
//!
//! The registry domain models the module catalog, the staging composition
//! used while a configuration is assembled, sealed versions with their
//! selector and capability indexes, and the per-configuration blacklist.
//! Locking, authorization and event delivery stay outside this boundary.

mod blacklist;
mod caller;
mod catalog;
mod composition;
mod configuration;
mod error;
mod event;
mod ids;
mod module;
mod page;
mod registry;
mod version;

pub use blacklist::Blacklist;
pub use caller::{CallerId, RegistryAction};
pub use catalog::ModuleCatalog;
pub use composition::Composition;
pub use configuration::{BatchSession, BatchState, Configuration};
pub use error::{ErrorCategory, ParseIdentifierError, ResolverDomainError, ResolverDomainResult};
pub use event::{RegistryEvent, RegistryEventKind};
pub use ids::{CapabilityTag, ConfigurationId, ModuleAddress, ModuleId, Selector, Version};
pub use module::{ModuleDeclaration, ModuleDefinition};
pub use page::page;
pub use registry::{BatchAppend, RegistryState, SealedSummary};
pub use version::SealedVersion;
