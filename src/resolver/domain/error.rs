//! Error types for dispatch registry validation and identifier parsing.

use super::{ConfigurationId, ModuleId, Selector, Version};
use serde::Serialize;
use thiserror::Error;

/// Result type for registry domain operations.
pub type ResolverDomainResult<T> = Result<T, ResolverDomainError>;

/// Coarse classification of registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input such as a sentinel id or an empty selector set.
    Input,
    /// An unregistered module, configuration or version was referenced.
    NotFound,
    /// The request clashes with existing state.
    Conflict,
    /// The configuration is not in a state that allows the operation.
    State,
    /// The caller lacks the role for the action.
    Authorization,
    /// The host is paused.
    Paused,
}

impl ErrorCategory {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::State => "state",
            Self::Authorization => "authorization",
            Self::Paused => "paused",
        }
    }
}

/// Errors returned by registry domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolverDomainError {
    /// A mutating call used the zero module id.
    #[error("module id must not be the zero sentinel")]
    ZeroModuleId,

    /// A mutating call used the zero configuration id.
    #[error("configuration id must not be the zero sentinel")]
    ZeroConfigurationId,

    /// The caller identity is blank.
    #[error("caller id must not be empty")]
    EmptyCallerId,

    /// A module was declared at the unset address.
    #[error("module {0} must not be registered at the unset address")]
    UnsetModuleAddress(ModuleId),

    /// A module declared no selectors.
    #[error("module {0} declares no selectors")]
    EmptySelectorSet(ModuleId),

    /// The null selector appeared where a real selector is required.
    #[error("the null selector is not a valid selector")]
    NullSelector,

    /// A module declared more selectors than the registry allows.
    #[error("module {module} declares {count} selectors, above the limit of {limit}")]
    TooManySelectors {
        /// Declaring module.
        module: ModuleId,
        /// Number of declared selectors.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A composition grew beyond the registry limit.
    #[error("configuration {configuration} would hold {count} modules, above the limit of {limit}")]
    ConfigurationTooLarge {
        /// Configuration being composed.
        configuration: ConfigurationId,
        /// Module count after the rejected append.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A seal was attempted on a composition with no modules.
    #[error("configuration {0} cannot be sealed without modules")]
    EmptyModuleList(ConfigurationId),

    /// The module is not in the catalog.
    #[error("module {0} is not registered")]
    ModuleNotRegistered(ModuleId),

    /// The configuration, or the requested version of it, was never sealed.
    #[error("configuration {configuration} has no sealed version {version}")]
    ConfigurationNotRegistered {
        /// Requested configuration.
        configuration: ConfigurationId,
        /// Requested version.
        version: Version,
    },

    /// The module id is already in the catalog.
    #[error("module {0} is already registered")]
    ModuleAlreadyRegistered(ModuleId),

    /// A module declaration repeats a selector.
    #[error("module {module} declares selector {selector} more than once")]
    DuplicateSelectorInModule {
        /// Declaring module.
        module: ModuleId,
        /// Repeated selector.
        selector: Selector,
    },

    /// A module appears twice in one composition.
    #[error("module {module} appears more than once in configuration {configuration}")]
    DuplicateModuleInConfiguration {
        /// Configuration being composed.
        configuration: ConfigurationId,
        /// Repeated module.
        module: ModuleId,
    },

    /// Two modules of one composition claim the same selector.
    #[error(
        "selector {selector} of module {incoming} is already claimed by module {claimed_by} in configuration {configuration}"
    )]
    SelectorCollision {
        /// Configuration being composed.
        configuration: ConfigurationId,
        /// Contested selector.
        selector: Selector,
        /// Module that already owns the selector.
        claimed_by: ModuleId,
        /// Module whose append was rejected.
        incoming: ModuleId,
    },

    /// A composition includes a selector on the configuration's blacklist.
    #[error("selector {selector} is blacklisted in configuration {configuration}")]
    SelectorBlacklisted {
        /// Configuration being composed.
        configuration: ConfigurationId,
        /// Vetoed selector.
        selector: Selector,
    },

    /// Seal or cancel was requested without an open batch.
    #[error("configuration {0} has no open batch")]
    NoOpenBatch(ConfigurationId),

    /// A single-shot composition was requested while a batch is open.
    #[error("configuration {0} has an open batch")]
    BatchInProgress(ConfigurationId),
}

impl ResolverDomainError {
    /// Returns the coarse category of the error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ZeroModuleId
            | Self::ZeroConfigurationId
            | Self::EmptyCallerId
            | Self::UnsetModuleAddress(_)
            | Self::EmptySelectorSet(_)
            | Self::NullSelector
            | Self::TooManySelectors { .. }
            | Self::ConfigurationTooLarge { .. }
            | Self::EmptyModuleList(_) => ErrorCategory::Input,
            Self::ModuleNotRegistered(_) | Self::ConfigurationNotRegistered { .. } => {
                ErrorCategory::NotFound
            }
            Self::ModuleAlreadyRegistered(_)
            | Self::DuplicateSelectorInModule { .. }
            | Self::DuplicateModuleInConfiguration { .. }
            | Self::SelectorCollision { .. }
            | Self::SelectorBlacklisted { .. } => ErrorCategory::Conflict,
            Self::NoOpenBatch(_) | Self::BatchInProgress(_) => ErrorCategory::State,
        }
    }
}

/// Error returned while parsing an identifier from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdentifierError {
    /// Hex input lacks the `0x` prefix.
    #[error("{kind} '{value}' must start with '0x'")]
    MissingHexPrefix {
        /// Identifier kind.
        kind: &'static str,
        /// Rejected input.
        value: String,
    },

    /// Hex input is empty or longer than the identifier width.
    #[error("{kind} '{value}' must hold between 1 and {expected} bytes")]
    InvalidLength {
        /// Identifier kind.
        kind: &'static str,
        /// Identifier width in bytes.
        expected: usize,
        /// Rejected input.
        value: String,
    },

    /// Hex input contains non-hex characters.
    #[error("{kind} '{value}' is not valid hex")]
    InvalidHex {
        /// Identifier kind.
        kind: &'static str,
        /// Rejected input.
        value: String,
    },

    /// A label is blank.
    #[error("{kind} label must not be empty")]
    EmptyLabel {
        /// Identifier kind.
        kind: &'static str,
    },

    /// A label does not fit in the identifier.
    #[error("{kind} label '{value}' exceeds {max} bytes")]
    LabelTooLong {
        /// Identifier kind.
        kind: &'static str,
        /// Identifier width in bytes.
        max: usize,
        /// Rejected input.
        value: String,
    },
}
