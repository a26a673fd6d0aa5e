//! Authorization and pause ports consulted before every mutation.

use crate::resolver::domain::{CallerId, RegistryAction};
use std::sync::Arc;

/// Decides whether a caller may perform a gated action.
///
/// Read operations never consult this port.
pub trait AccessControl: Send + Sync {
    /// Returns `true` when `caller` may perform `action`.
    fn is_authorized(&self, caller: &CallerId, action: RegistryAction) -> bool;
}

/// Global switch that refuses all mutations while set.
pub trait PauseState: Send + Sync {
    /// Returns `true` while mutations are refused.
    fn is_paused(&self) -> bool;
}

impl<T: AccessControl + ?Sized> AccessControl for Arc<T> {
    fn is_authorized(&self, caller: &CallerId, action: RegistryAction) -> bool {
        (**self).is_authorized(caller, action)
    }
}

impl<T: PauseState + ?Sized> PauseState for Arc<T> {
    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }
}
