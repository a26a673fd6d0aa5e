//! Registry limits and their loading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds applied by the registry.
///
/// Missing fields take their [`Default`] values when deserialising.
///
/// # Examples
///
/// ```
/// use dispatch_registry::resolver::config::RegistryConfig;
///
/// let config = RegistryConfig::from_json_str(r#"{"max_selectors_per_module": 50}"#)
///     .expect("valid registry config");
/// assert_eq!(config.max_selectors_per_module, 50);
/// assert_eq!(
///     config.max_modules_per_configuration,
///     RegistryConfig::default().max_modules_per_configuration
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Largest module list a configuration version may hold.
    pub max_modules_per_configuration: usize,
    /// Largest selector set a module may declare.
    pub max_selectors_per_module: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_modules_per_configuration: 500,
            max_selectors_per_module: 1_000,
        }
    }
}

/// Errors returned while loading a [`RegistryConfig`].
#[derive(Debug, Error)]
pub enum RegistryConfigError {
    /// The document is not valid registry configuration JSON.
    #[error("invalid registry configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A limit is zero.
    #[error("registry limit `{0}` must be greater than zero")]
    ZeroLimit(&'static str),
}

impl RegistryConfig {
    /// Creates a configuration with reduced limits.
    ///
    /// Useful for resource-constrained hosts.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_modules_per_configuration: 64,
            max_selectors_per_module: 128,
        }
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryConfigError::Parse`] for malformed JSON or unknown
    /// fields and [`RegistryConfigError::ZeroLimit`] for a zero limit.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every limit is positive.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryConfigError::ZeroLimit`] naming the first zero limit.
    pub const fn validate(&self) -> Result<(), RegistryConfigError> {
        if self.max_modules_per_configuration == 0 {
            return Err(RegistryConfigError::ZeroLimit(
                "max_modules_per_configuration",
            ));
        }
        if self.max_selectors_per_module == 0 {
            return Err(RegistryConfigError::ZeroLimit("max_selectors_per_module"));
        }
        Ok(())
    }
}
