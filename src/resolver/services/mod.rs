//! Service layer for the dispatch registry.

pub mod admin;
pub mod resolver;

pub use admin::{RegistryAdminService, ResolverServiceError, ResolverServiceResult};
pub use resolver::DispatchResolver;
