//! Lifecycle states for loaded extensions.
//!
//! An extension record occupies exactly one [`LifecycleState`] at any
//! time. The legal transitions are encoded in
//! [`LifecycleState::can_transition`]; `vitrail-exthost` enforces them
//! and rejects everything else with a state-conflict error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime state of an extension record.
///
/// ```text
/// Registered -> Loading -> Active <-> Inactive
///                  |          |   \___
///                  v          v       v
///                Error      Error  Reloading -> Active | Error
///                  \__________|__________/
///                             v
///                         Unloaded (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Manifest stored, no runtime record yet.
    Registered,
    /// Sandbox acquisition and activation in progress.
    Loading,
    /// Activation routine completed; the extension is running.
    Active,
    /// Deactivated but still loaded; can be reloaded.
    Inactive,
    /// A reload is replacing the running instance.
    Reloading,
    /// Activation or deactivation failed; the cause is captured on the
    /// record.
    Error,
    /// Terminal: sandbox torn down, record removed from the active set.
    Unloaded,
}

impl LifecycleState {
    /// True if `self -> to` is a legal transition.
    pub fn can_transition(self, to: LifecycleState) -> bool {
        use LifecycleState::*;
        match (self, to) {
            (Registered, Loading) => true,
            (Loading, Active) | (Loading, Error) => true,
            (Active, Inactive) | (Active, Error) | (Active, Reloading) => true,
            (Inactive, Reloading) => true,
            (Reloading, Active) | (Reloading, Inactive) | (Reloading, Error) => true,
            // Unload is allowed from any non-terminal state.
            (from, Unloaded) => from != Unloaded,
            _ => false,
        }
    }

    /// True once the record has reached its terminal state.
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Unloaded
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Registered => "registered",
            Self::Loading => "loading",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Reloading => "reloading",
            Self::Error => "error",
            Self::Unloaded => "unloaded",
        };
        f.write_str(s)
    }
}
