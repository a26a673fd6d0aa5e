//! Caller identity and the actions the access-control port is asked about.

use super::ResolverDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the account issuing a mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    /// Creates a caller id from a non-blank string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverDomainError::EmptyCallerId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ResolverDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ResolverDomainError::EmptyCallerId);
        }
        Ok(Self(normalized))
    }

    /// Returns the caller id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CallerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role-gated registry action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    /// Adding a module to the catalog.
    RegisterModule,
    /// Creating, appending to, sealing or cancelling configurations.
    ComposeConfiguration,
    /// Adding or removing blacklisted selectors.
    ManageBlacklist,
}

impl RegistryAction {
    /// Every gated action.
    pub const ALL: [Self; 3] = [
        Self::RegisterModule,
        Self::ComposeConfiguration,
        Self::ManageBlacklist,
    ];

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegisterModule => "register_module",
            Self::ComposeConfiguration => "compose_configuration",
            Self::ManageBlacklist => "manage_blacklist",
        }
    }
}

impl fmt::Display for RegistryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
