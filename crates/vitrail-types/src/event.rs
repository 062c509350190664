//! Lifecycle and extension-emitted events.
//!
//! [`ExtensionEvent`] is the payload delivered to event bus subscribers
//! for every lifecycle transition and for events emitted by extension
//! code through its capability surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of an extension event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionEventType {
    /// A manifest was registered.
    Loaded,
    /// An extension reached the Active state.
    Activated,
    /// An extension was deactivated or unloaded.
    Deactivated,
    /// An extension entered the Error state.
    Error,
    /// A capability call was denied by the permission check.
    PermissionDenied,
}

/// An event observed on the extension host's bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub event: ExtensionEventType,

    /// The extension this event concerns.
    pub extension_id: String,

    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,

    /// Optional event-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl ExtensionEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        event: ExtensionEventType,
        extension_id: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        Self {
            event,
            extension_id: extension_id.into(),
            timestamp: Utc::now(),
            payload,
        }
    }
}
