//! Role table and pause switch adapters.

use crate::resolver::{
    domain::{CallerId, RegistryAction},
    ports::{AccessControl, PauseState},
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Access control backed by an explicit grant table.
///
/// Callers hold nothing until granted.
#[derive(Debug, Default)]
pub struct StaticAccessControl {
    grants: RwLock<HashMap<CallerId, HashSet<RegistryAction>>>,
}

impl StaticAccessControl {
    /// Creates an empty grant table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `action` to `caller`.
    pub fn grant(&self, caller: &CallerId, action: RegistryAction) {
        self.grants
            .write()
            .entry(caller.clone())
            .or_default()
            .insert(action);
        info!(caller = %caller, action = %action, "registry role granted");
    }

    /// Grants every gated action to `caller`.
    pub fn grant_all(&self, caller: &CallerId) {
        for action in RegistryAction::ALL {
            self.grant(caller, action);
        }
    }

    /// Revokes `action` from `caller`.
    pub fn revoke(&self, caller: &CallerId, action: RegistryAction) {
        let mut grants = self.grants.write();
        if let Some(actions) = grants.get_mut(caller) {
            actions.remove(&action);
            if actions.is_empty() {
                grants.remove(caller);
            }
        }
        info!(caller = %caller, action = %action, "registry role revoked");
    }
}

impl AccessControl for StaticAccessControl {
    fn is_authorized(&self, caller: &CallerId, action: RegistryAction) -> bool {
        self.grants
            .read()
            .get(caller)
            .is_some_and(|actions| actions.contains(&action))
    }
}

/// Process-wide pause flag.
#[derive(Debug, Default)]
pub struct PauseSwitch {
    paused: AtomicBool,
}

impl PauseSwitch {
    /// Creates an unpaused switch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
        }
    }

    /// Refuses mutations until [`Self::resume`] is called.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        info!("registry paused");
    }

    /// Accepts mutations again.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        info!("registry resumed");
    }
}

impl PauseState for PauseSwitch {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}
