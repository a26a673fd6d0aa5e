//! Events describing committed registry mutations.

use super::{CallerId, ConfigurationId, ModuleAddress, ModuleId, Selector, Version};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a committed mutation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEventKind {
    /// A module entered the catalog.
    ModuleRegistered {
        /// Registered module.
        module: ModuleId,
        /// Its address.
        address: ModuleAddress,
    },
    /// Modules were staged in a batch session.
    BatchAppended {
        /// Configuration being composed.
        configuration: ConfigurationId,
        /// Modules appended by the call.
        modules: Vec<ModuleId>,
    },
    /// A new version became visible to readers.
    ConfigurationSealed {
        /// Sealed configuration.
        configuration: ConfigurationId,
        /// The new version.
        version: Version,
        /// Number of modules in the new version.
        module_count: usize,
    },
    /// A batch session was discarded.
    BatchCancelled {
        /// Configuration whose batch was discarded.
        configuration: ConfigurationId,
        /// Modules the session had staged.
        discarded: Vec<ModuleId>,
    },
    /// Selectors were added to a blacklist.
    SelectorsBlacklisted {
        /// Affected configuration.
        configuration: ConfigurationId,
        /// Newly vetoed selectors.
        selectors: Vec<Selector>,
    },
    /// Selectors were removed from a blacklist.
    SelectorsUnblacklisted {
        /// Affected configuration.
        configuration: ConfigurationId,
        /// Selectors no longer vetoed.
        selectors: Vec<Selector>,
    },
}

impl RegistryEventKind {
    /// Returns the canonical event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ModuleRegistered { .. } => "module_registered",
            Self::BatchAppended { .. } => "batch_appended",
            Self::ConfigurationSealed { .. } => "configuration_sealed",
            Self::BatchCancelled { .. } => "batch_cancelled",
            Self::SelectorsBlacklisted { .. } => "selectors_blacklisted",
            Self::SelectorsUnblacklisted { .. } => "selectors_unblacklisted",
        }
    }
}

/// A committed mutation, attributed to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEvent {
    caller: CallerId,
    #[serde(flatten)]
    kind: RegistryEventKind,
    occurred_at: DateTime<Utc>,
}

impl RegistryEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(
        caller: CallerId,
        kind: RegistryEventKind,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            caller,
            kind,
            occurred_at,
        }
    }

    /// Returns the caller that issued the mutation.
    #[must_use]
    pub const fn caller(&self) -> &CallerId {
        &self.caller
    }

    /// Returns what changed.
    #[must_use]
    pub const fn kind(&self) -> &RegistryEventKind {
        &self.kind
    }

    /// Returns when the mutation was committed.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
