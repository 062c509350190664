//! Permission-checked capability surface handed to extension code.
//!
//! [`CapabilityFactory`] is pure construction: it bundles the host's
//! collaborator implementations and stamps out one [`CapabilityApi`] per
//! loaded extension, carrying an immutable [`PermissionSet`] snapshot.
//! Every method on the surface checks the snapshot first; a denied call
//! returns [`ExtHostError::PermissionDenied`] to the extension without
//! touching any collaborator, and also emits a `permission_denied` event
//! so the host can observe misbehaving extensions. The denial never
//! reaches the host application as an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use vitrail_types::{
    ExtHostError, ExtensionEventType, PermissionLevel, PermissionSet, PermissionType,
};

use crate::bus::{EventBus, EventHandler, SubscriptionId};

/// Framework-level collaborator: component creation and metrics.
/// Gated by the `components` / `performance` permission types.
#[async_trait]
pub trait FrameworkOps: Send + Sync {
    /// Create a component from a definition; returns the created
    /// component's descriptor.
    async fn create_component(
        &self,
        definition: serde_json::Value,
    ) -> Result<serde_json::Value, ExtHostError>;

    /// Current framework performance metrics.
    async fn metrics(&self) -> Result<serde_json::Value, ExtHostError>;
}

/// Host-environment collaborator: element creation, queries, event
/// listeners. Gated by the `dom` / `events` permission types.
#[async_trait]
pub trait EnvironmentOps: Send + Sync {
    /// Create an element of the given tag; returns its descriptor.
    async fn create_element(&self, tag: &str) -> Result<serde_json::Value, ExtHostError>;

    /// Query for an element; `None` when nothing matches.
    async fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError>;

    /// Attach a listener for an environment event on behalf of the
    /// extension.
    async fn add_event_listener(
        &self,
        extension_id: &str,
        event: &str,
    ) -> Result<(), ExtHostError>;
}

/// Persistent storage collaborator, keyed per extension id.
/// Gated by the `storage` permission type.
#[async_trait]
pub trait PersistentStorageOps: Send + Sync {
    async fn get(
        &self,
        extension_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError>;

    async fn set(
        &self,
        extension_id: &str,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ExtHostError>;

    async fn remove(&self, extension_id: &str, key: &str) -> Result<(), ExtHostError>;
}

/// The host's collaborator bundle. One factory serves every extension.
pub struct CapabilityFactory {
    framework: Arc<dyn FrameworkOps>,
    environment: Arc<dyn EnvironmentOps>,
    storage: Arc<dyn PersistentStorageOps>,
    bus: Arc<EventBus>,
}

impl CapabilityFactory {
    pub fn new(
        framework: Arc<dyn FrameworkOps>,
        environment: Arc<dyn EnvironmentOps>,
        storage: Arc<dyn PersistentStorageOps>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            framework,
            environment,
            storage,
            bus,
        }
    }

    /// Build the capability surface for one extension. Holds no mutable
    /// state beyond the immutable permission snapshot.
    pub fn build(
        &self,
        extension_id: impl Into<String>,
        permissions: Arc<PermissionSet>,
    ) -> Arc<CapabilityApi> {
        Arc::new(CapabilityApi {
            extension_id: extension_id.into(),
            permissions,
            framework: Arc::clone(&self.framework),
            environment: Arc::clone(&self.environment),
            storage: Arc::clone(&self.storage),
            bus: Arc::clone(&self.bus),
        })
    }
}

/// Permission-checked facade over collaborator operations, handed to one
/// extension's code inside its sandbox.
pub struct CapabilityApi {
    extension_id: String,
    permissions: Arc<PermissionSet>,
    framework: Arc<dyn FrameworkOps>,
    environment: Arc<dyn EnvironmentOps>,
    storage: Arc<dyn PersistentStorageOps>,
    bus: Arc<EventBus>,
}

impl CapabilityApi {
    /// The extension this surface belongs to.
    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    fn check(
        &self,
        permission: PermissionType,
        level: PermissionLevel,
    ) -> Result<(), ExtHostError> {
        if self.permissions.allows(permission, level) {
            return Ok(());
        }
        warn!(
            extension = %self.extension_id,
            permission = %permission,
            level = %level,
            "capability call denied"
        );
        self.bus.emit(
            ExtensionEventType::PermissionDenied,
            &self.extension_id,
            Some(serde_json::json!({
                "permission": permission,
                "level": level,
            })),
        );
        Err(ExtHostError::PermissionDenied { permission, level })
    }

    /// Create a framework component. Requires `components.write`.
    pub async fn create_component(
        &self,
        definition: serde_json::Value,
    ) -> Result<serde_json::Value, ExtHostError> {
        self.check(PermissionType::Components, PermissionLevel::Write)?;
        self.framework.create_component(definition).await
    }

    /// Read framework performance metrics. Requires `performance.read`.
    pub async fn framework_metrics(&self) -> Result<serde_json::Value, ExtHostError> {
        self.check(PermissionType::Performance, PermissionLevel::Read)?;
        self.framework.metrics().await
    }

    /// Create an element in the host environment. Requires `dom.write`.
    pub async fn create_element(&self, tag: &str) -> Result<serde_json::Value, ExtHostError> {
        self.check(PermissionType::Dom, PermissionLevel::Write)?;
        self.environment.create_element(tag).await
    }

    /// Query the host environment. Requires `dom.read`.
    pub async fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError> {
        self.check(PermissionType::Dom, PermissionLevel::Read)?;
        self.environment.query_selector(selector).await
    }

    /// Listen for an environment event. Requires `events.write`.
    pub async fn add_event_listener(&self, event: &str) -> Result<(), ExtHostError> {
        self.check(PermissionType::Events, PermissionLevel::Write)?;
        self.environment
            .add_event_listener(&self.extension_id, event)
            .await
    }

    /// Read a value from the extension's storage namespace. Requires
    /// `storage.read`.
    pub async fn storage_get(
        &self,
        key: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError> {
        self.check(PermissionType::Storage, PermissionLevel::Read)?;
        self.storage.get(&self.extension_id, key).await
    }

    /// Write a value to the extension's storage namespace. Requires
    /// `storage.write`.
    pub async fn storage_set(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ExtHostError> {
        self.check(PermissionType::Storage, PermissionLevel::Write)?;
        self.storage.set(&self.extension_id, key, value).await
    }

    /// Remove a value from the extension's storage namespace. Requires
    /// `storage.write`.
    pub async fn storage_remove(&self, key: &str) -> Result<(), ExtHostError> {
        self.check(PermissionType::Storage, PermissionLevel::Write)?;
        self.storage.remove(&self.extension_id, key).await
    }

    /// Emit an event on the host bus under this extension's id.
    /// Requires `events.write`.
    pub fn emit_event(
        &self,
        event: ExtensionEventType,
        payload: Option<serde_json::Value>,
    ) -> Result<(), ExtHostError> {
        self.check(PermissionType::Events, PermissionLevel::Write)?;
        self.bus.emit(event, &self.extension_id, payload);
        Ok(())
    }

    /// Subscribe to host events. Requires `events.read`.
    pub fn subscribe(
        &self,
        event: ExtensionEventType,
        handler: EventHandler,
    ) -> Result<SubscriptionId, ExtHostError> {
        self.check(PermissionType::Events, PermissionLevel::Read)?;
        Ok(self.bus.on(event, handler))
    }

    /// Remove a subscription. Requires `events.read`.
    pub fn unsubscribe(
        &self,
        event: ExtensionEventType,
        id: SubscriptionId,
    ) -> Result<bool, ExtHostError> {
        self.check(PermissionType::Events, PermissionLevel::Read)?;
        Ok(self.bus.off(event, id))
    }
}
