//! Sandbox provider contract.
//!
//! The host never touches an isolation mechanism directly. Whatever the
//! surrounding subsystem provides -- a hidden iframe, a worker thread, a
//! subprocess with message-passing IPC, a WASM instance -- it implements
//! [`SandboxProvider`] and keeps exclusive ownership of the real
//! resource. The host only holds [`SandboxHandle`] references and
//! guarantees that `destroy_sandbox` is invoked at most once per created
//! sandbox (providers should still be idempotent, since error recovery
//! may retry teardown).

use std::sync::Arc;

use async_trait::async_trait;

use vitrail_types::{ExtHostError, ExtensionManifest};

use crate::capability::CapabilityApi;

/// Opaque reference to an isolated execution context.
///
/// The provider owns the actual context; the host's record holds only
/// this handle.
#[derive(Debug, Clone)]
pub struct SandboxHandle {
    /// Id of the extension hosted in this sandbox.
    pub extension_id: String,
    /// Whether the context is actually isolated. Mirrors
    /// `manifest.sandboxed`; a trusted in-process extension may run
    /// unisolated.
    pub isolated: bool,
}

/// The loaded extension's own surface: its activation and deactivation
/// routines, and whatever it exports to the host.
#[async_trait]
pub trait ExtensionInstance: Send + Sync {
    /// Run the extension's activation routine.
    async fn activate(&self) -> Result<(), ExtHostError>;

    /// Run the extension's deactivation routine.
    async fn deactivate(&self) -> Result<(), ExtHostError>;

    /// Values the extension exports to the host. Defaults to null.
    fn exports(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

/// Contract for the external subsystem that owns isolation.
#[async_trait]
pub trait SandboxProvider: Send + Sync {
    /// Create an isolated context for the given manifest.
    async fn create_sandbox(
        &self,
        manifest: &ExtensionManifest,
    ) -> Result<SandboxHandle, ExtHostError>;

    /// Load the manifest's entry point inside the sandbox and hand it
    /// its capability surface. Entry-point resolution happens behind the
    /// isolation boundary, which is why it belongs to the provider.
    async fn instantiate(
        &self,
        handle: &SandboxHandle,
        manifest: &ExtensionManifest,
        api: Arc<CapabilityApi>,
    ) -> Result<Arc<dyn ExtensionInstance>, ExtHostError>;

    /// Tear the context down. Failures are logged by the caller and do
    /// not block the terminal Unloaded transition.
    async fn destroy_sandbox(&self, handle: &SandboxHandle) -> Result<(), ExtHostError>;
}
