//! Lifecycle transition enforcement and activation drivers.
//!
//! [`LifecycleController`] is the only place that moves a record between
//! [`LifecycleState`]s: illegal requests fail with a state-conflict
//! error instead of silently succeeding, and failures thrown by the
//! extension's own activation/deactivation routines are captured into
//! [`ExtHostError::Activation`] / [`ExtHostError::Deactivation`] rather
//! than crossing the manager boundary as panics.

use std::sync::Arc;

use tracing::debug;

use vitrail_types::{ExtHostError, LifecycleState};

use crate::sandbox::ExtensionInstance;

/// State machine guard and activation/deactivation driver.
pub struct LifecycleController;

impl LifecycleController {
    /// Validate and perform `from -> to`, returning the new state.
    pub fn transition(
        extension: &str,
        from: LifecycleState,
        to: LifecycleState,
        operation: &str,
    ) -> Result<LifecycleState, ExtHostError> {
        if !from.can_transition(to) {
            return Err(ExtHostError::StateConflict {
                extension: extension.to_string(),
                state: from,
                operation: operation.to_string(),
            });
        }
        debug!(extension = %extension, from = %from, to = %to, "lifecycle transition");
        Ok(to)
    }

    /// Run the instance's activation routine, capturing its failure.
    pub async fn activate(
        extension: &str,
        instance: &Arc<dyn ExtensionInstance>,
    ) -> Result<(), ExtHostError> {
        debug!(extension = %extension, "activating");
        instance
            .activate()
            .await
            .map_err(|e| ExtHostError::Activation(e.to_string()))
    }

    /// Run the instance's deactivation routine, capturing its failure.
    pub async fn deactivate(
        extension: &str,
        instance: &Arc<dyn ExtensionInstance>,
    ) -> Result<(), ExtHostError> {
        debug!(extension = %extension, "deactivating");
        instance
            .deactivate()
            .await
            .map_err(|e| ExtHostError::Deactivation(e.to_string()))
    }
}
