//! Extension manager: the host's public contract.
//!
//! Composes the manifest registry, permission validator, dependency
//! resolver, capability factory, lifecycle controller, and event bus
//! into one orchestrator. There is no module-level state: a host
//! process constructs one [`ExtensionManager`], calls
//! [`initialize`](ExtensionManager::initialize) once, and passes it by
//! reference to whoever needs it.
//!
//! # Concurrency
//!
//! Mutating operations (`load_extension`, `deactivate_extension`,
//! `reload_extension`, `unload_extension`) are serialized per extension
//! id through a keyed async mutex. A duplicate `load` for an id with an
//! operation already in flight queues behind it, then observes the
//! settled record and returns its outcome instead of creating a second
//! sandbox. Operations on distinct ids run concurrently; the record map
//! is updated atomically per id. An `unload` requested during an
//! in-flight `load` queues behind it and applies after the load settles
//! -- preemptive abort is not supported.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use vitrail_types::{
    ExtHostConfig, ExtHostError, ExtensionEventType, ExtensionManifest, LifecycleState,
    PermissionLevel, PermissionSet, PermissionType,
};

use crate::bus::EventBus;
use crate::capability::{CapabilityFactory, EnvironmentOps, FrameworkOps, PersistentStorageOps};
use crate::lifecycle::LifecycleController;
use crate::permissions::PermissionValidator;
use crate::registry::ManifestRegistry;
use crate::resolver::{DependencyView, resolve_dependencies};
use crate::sandbox::{ExtensionInstance, SandboxHandle, SandboxProvider};

/// Runtime record for one loaded extension. Owned exclusively by the
/// manager; everything external sees [`ExtensionStatus`] views.
struct ExtensionRecord {
    manifest: Arc<ExtensionManifest>,
    state: LifecycleState,
    permissions: Arc<PermissionSet>,
    /// Reference only; the sandbox provider owns the real context.
    sandbox: Option<SandboxHandle>,
    instance: Option<Arc<dyn ExtensionInstance>>,
    /// Non-owning links to dependency records, by id.
    dependencies: Vec<String>,
    /// Captured cause when `state` is Error.
    failure: Option<String>,
}

/// Read-only view of a loaded extension's runtime state.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionStatus {
    pub id: String,
    pub state: LifecycleState,
    pub sandboxed: bool,
    pub trusted: bool,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Aggregate counts over the loaded extension set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionMetrics {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub errors: usize,
    pub sandboxed: usize,
    pub trusted: usize,
}

/// Orchestrator for the extension host.
pub struct ExtensionManager {
    config: ExtHostConfig,
    validator: PermissionValidator,
    registry: RwLock<ManifestRegistry>,
    records: RwLock<HashMap<String, ExtensionRecord>>,
    bus: Arc<EventBus>,
    factory: CapabilityFactory,
    provider: Arc<dyn SandboxProvider>,
    /// Per-id operation locks. Entries are never removed: dropping one
    /// while a waiter still holds the old Arc would let two operations
    /// on the same id run concurrently.
    op_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
    initialized: AtomicBool,
}

impl ExtensionManager {
    /// Construct a manager from its configuration, sandbox provider, and
    /// collaborator implementations. Call
    /// [`initialize`](Self::initialize) before using it.
    pub fn new(
        config: ExtHostConfig,
        provider: Arc<dyn SandboxProvider>,
        framework: Arc<dyn FrameworkOps>,
        environment: Arc<dyn EnvironmentOps>,
        storage: Arc<dyn PersistentStorageOps>,
    ) -> Self {
        let bus = Arc::new(EventBus::new());
        let factory = CapabilityFactory::new(framework, environment, storage, Arc::clone(&bus));
        let validator = PermissionValidator::new(config.trusted_domains.clone());
        Self {
            config,
            validator,
            registry: RwLock::new(ManifestRegistry::new()),
            records: RwLock::new(HashMap::new()),
            bus,
            factory,
            provider,
            op_locks: StdMutex::new(HashMap::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Prepare the host for use. A second call fails with
    /// [`ExtHostError::AlreadyInitialized`].
    pub fn initialize(&self) -> Result<(), ExtHostError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(ExtHostError::AlreadyInitialized);
        }
        info!(
            trusted_domains = self.config.trusted_domains.len(),
            policy = ?self.config.dependency_policy,
            "extension host initialized"
        );
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), ExtHostError> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ExtHostError::NotInitialized)
        }
    }

    /// The host's event bus, for host-side subscribers.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Validate and register a manifest. Any failure aborts with no
    /// partial state; success emits a `loaded` event.
    pub async fn register_extension(
        &self,
        manifest: ExtensionManifest,
    ) -> Result<Arc<ExtensionManifest>, ExtHostError> {
        self.ensure_initialized()?;
        manifest.validate()?;
        self.validator.validate_permissions(&manifest)?;
        if manifest.trusted {
            self.validator.validate_trust(&manifest)?;
        }

        let manifest = self.registry.write().await.register(manifest)?;
        info!(extension = %manifest.id, version = %manifest.version, "extension registered");
        self.bus.emit(
            ExtensionEventType::Loaded,
            &manifest.id,
            Some(serde_json::json!({
                "name": manifest.name,
                "version": manifest.version,
            })),
        );
        Ok(manifest)
    }

    /// Remove a manifest from the registry. The extension must not have
    /// a runtime record; unload it first.
    pub async fn unregister_extension(&self, id: &str) -> Result<(), ExtHostError> {
        self.ensure_initialized()?;
        let op_lock = self.op_lock(id);
        let _guard = op_lock.lock().await;

        if let Some(record) = self.records.read().await.get(id) {
            return Err(ExtHostError::StateConflict {
                extension: id.to_string(),
                state: record.state,
                operation: "unregister".into(),
            });
        }
        self.registry
            .write()
            .await
            .remove(id)
            .ok_or_else(|| ExtHostError::NotFound(id.to_string()))?;
        info!(extension = %id, "extension unregistered");
        Ok(())
    }

    /// Load a registered extension: resolve dependencies, acquire a
    /// sandbox, build the capability surface, and drive it to Active.
    ///
    /// Activation failures park the record in Error and surface as a
    /// failed result; they are never thrown past this boundary. Never
    /// returns while the record is still Loading.
    pub async fn load_extension(&self, id: &str) -> Result<(), ExtHostError> {
        self.ensure_initialized()?;
        let op_lock = self.op_lock(id);
        let _guard = op_lock.lock().await;

        // A record already present means a previous load settled while
        // we waited: coalesce into its outcome.
        {
            let records = self.records.read().await;
            if let Some(record) = records.get(id) {
                return match record.state {
                    LifecycleState::Active => Ok(()),
                    LifecycleState::Error => Err(ExtHostError::Activation(
                        record.failure.clone().unwrap_or_else(|| "unknown".into()),
                    )),
                    state => Err(ExtHostError::StateConflict {
                        extension: id.to_string(),
                        state,
                        operation: "load".into(),
                    }),
                };
            }
        }

        let manifest = self
            .registry
            .read()
            .await
            .get(id)
            .ok_or_else(|| ExtHostError::NotFound(id.to_string()))?;

        let dependencies = {
            let records = self.records.read().await;
            let snapshot: HashMap<String, DependencyView> = records
                .iter()
                .map(|(dep_id, record)| {
                    (
                        dep_id.clone(),
                        DependencyView {
                            state: record.state,
                            version: record.manifest.version.clone(),
                        },
                    )
                })
                .collect();
            resolve_dependencies(&manifest, &snapshot, self.config.dependency_policy)?
        };

        let permissions = Arc::new(PermissionSet::from_manifest(&manifest));
        self.records.write().await.insert(
            id.to_string(),
            ExtensionRecord {
                manifest: Arc::clone(&manifest),
                state: LifecycleState::Loading,
                permissions: Arc::clone(&permissions),
                sandbox: None,
                instance: None,
                dependencies,
                failure: None,
            },
        );

        let sandbox = match self.provider.create_sandbox(&manifest).await {
            Ok(handle) => handle,
            Err(e) => return self.fail_load(id, e).await,
        };
        if let Some(record) = self.records.write().await.get_mut(id) {
            record.sandbox = Some(sandbox.clone());
        }

        let api = self.factory.build(id, permissions);
        let instance = match self.provider.instantiate(&sandbox, &manifest, api).await {
            Ok(instance) => instance,
            Err(e) => return self.fail_load(id, e).await,
        };

        match LifecycleController::activate(id, &instance).await {
            Ok(()) => {
                let mut records = self.records.write().await;
                if let Some(record) = records.get_mut(id) {
                    record.state = LifecycleController::transition(
                        id,
                        record.state,
                        LifecycleState::Active,
                        "load",
                    )?;
                    record.instance = Some(instance);
                }
                drop(records);
                info!(extension = %id, "extension active");
                self.bus.emit(ExtensionEventType::Activated, id, None);
                Ok(())
            }
            Err(e) => {
                // Keep the instance for diagnostics; the sandbox is torn
                // down at unload.
                if let Some(record) = self.records.write().await.get_mut(id) {
                    record.instance = Some(instance);
                }
                self.fail_load(id, e).await
            }
        }
    }

    /// Park the record in Error with the captured cause and report the
    /// failure to the caller.
    async fn fail_load(&self, id: &str, error: ExtHostError) -> Result<(), ExtHostError> {
        let message = error.to_string();
        {
            let mut records = self.records.write().await;
            if let Some(record) = records.get_mut(id) {
                record.state = LifecycleState::Error;
                record.failure = Some(message.clone());
            }
        }
        warn!(extension = %id, error = %message, "load failed");
        self.bus.emit(
            ExtensionEventType::Error,
            id,
            Some(serde_json::json!({ "message": message })),
        );
        Err(error)
    }

    /// Deactivate an Active extension. A failure in the extension's own
    /// deactivation routine moves the record to Error and is still
    /// reported.
    pub async fn deactivate_extension(&self, id: &str) -> Result<(), ExtHostError> {
        self.ensure_initialized()?;
        let op_lock = self.op_lock(id);
        let _guard = op_lock.lock().await;

        let instance = {
            let records = self.records.read().await;
            let record = records
                .get(id)
                .ok_or_else(|| ExtHostError::NotFound(id.to_string()))?;
            if record.state != LifecycleState::Active {
                return Err(ExtHostError::StateConflict {
                    extension: id.to_string(),
                    state: record.state,
                    operation: "deactivate".into(),
                });
            }
            record.instance.clone()
        };

        let Some(instance) = instance else {
            return Err(ExtHostError::NotFound(id.to_string()));
        };

        match LifecycleController::deactivate(id, &instance).await {
            Ok(()) => {
                self.set_state(id, LifecycleState::Inactive, None).await;
                self.bus.emit(ExtensionEventType::Deactivated, id, None);
                Ok(())
            }
            Err(e) => {
                self.set_state(id, LifecycleState::Error, Some(e.to_string()))
                    .await;
                self.bus.emit(
                    ExtensionEventType::Error,
                    id,
                    Some(serde_json::json!({ "message": e.to_string() })),
                );
                Err(e)
            }
        }
    }

    /// Reload an extension: deactivate the running instance (if Active),
    /// instantiate the entry point afresh in the existing sandbox, and
    /// activate it.
    ///
    /// If the fresh activation fails and the record was Active before,
    /// the prior instance is re-activated; on rollback success the
    /// record is Active again and the reload failure is still returned.
    /// A record that was Inactive simply returns to Inactive. The record
    /// never rests in Reloading.
    pub async fn reload_extension(&self, id: &str) -> Result<(), ExtHostError> {
        self.ensure_initialized()?;
        let op_lock = self.op_lock(id);
        let _guard = op_lock.lock().await;

        let (was_active, old_instance, sandbox, manifest, permissions) = {
            let records = self.records.read().await;
            let record = records
                .get(id)
                .ok_or_else(|| ExtHostError::NotFound(id.to_string()))?;
            match record.state {
                LifecycleState::Active | LifecycleState::Inactive => {}
                state => {
                    return Err(ExtHostError::StateConflict {
                        extension: id.to_string(),
                        state,
                        operation: "reload".into(),
                    });
                }
            }
            let Some(sandbox) = record.sandbox.clone() else {
                return Err(ExtHostError::NotFound(id.to_string()));
            };
            (
                record.state == LifecycleState::Active,
                record.instance.clone(),
                sandbox,
                Arc::clone(&record.manifest),
                Arc::clone(&record.permissions),
            )
        };

        self.set_state(id, LifecycleState::Reloading, None).await;

        if was_active {
            if let Some(old) = &old_instance {
                if let Err(e) = LifecycleController::deactivate(id, old).await {
                    self.set_state(id, LifecycleState::Error, Some(e.to_string()))
                        .await;
                    self.bus.emit(
                        ExtensionEventType::Error,
                        id,
                        Some(serde_json::json!({ "message": e.to_string() })),
                    );
                    return Err(e);
                }
            }
        }

        let api = self.factory.build(id, permissions);
        let activation = match self.provider.instantiate(&sandbox, &manifest, api).await {
            Ok(fresh) => match LifecycleController::activate(id, &fresh).await {
                Ok(()) => {
                    let mut records = self.records.write().await;
                    if let Some(record) = records.get_mut(id) {
                        record.instance = Some(fresh);
                        record.state = LifecycleState::Active;
                        record.failure = None;
                    }
                    drop(records);
                    info!(extension = %id, "extension reloaded");
                    self.bus.emit(ExtensionEventType::Activated, id, None);
                    return Ok(());
                }
                Err(e) => e,
            },
            Err(e) => e,
        };

        // Fresh activation failed: roll back to the prior state.
        warn!(extension = %id, error = %activation, "reload failed; rolling back");
        if let (true, Some(old)) = (was_active, &old_instance) {
            match LifecycleController::activate(id, old).await {
                Ok(()) => {
                    self.set_state(id, LifecycleState::Active, None).await;
                }
                Err(rollback) => {
                    warn!(extension = %id, error = %rollback, "rollback activation failed");
                    self.set_state(id, LifecycleState::Error, Some(activation.to_string()))
                        .await;
                    self.bus.emit(
                        ExtensionEventType::Error,
                        id,
                        Some(serde_json::json!({ "message": activation.to_string() })),
                    );
                }
            }
        } else {
            self.set_state(id, LifecycleState::Inactive, None).await;
        }
        Err(activation)
    }

    /// Unload an extension: best-effort deactivation, sandbox teardown
    /// (always attempted, exactly once), terminal Unloaded transition,
    /// and removal from the active set. The manifest stays registered so
    /// the extension can be loaded again without re-registration.
    pub async fn unload_extension(&self, id: &str) -> Result<(), ExtHostError> {
        self.ensure_initialized()?;
        let op_lock = self.op_lock(id);
        let _guard = op_lock.lock().await;

        let (state, instance) = {
            let records = self.records.read().await;
            let record = records
                .get(id)
                .ok_or_else(|| ExtHostError::NotFound(id.to_string()))?;
            (record.state, record.instance.clone())
        };

        // Best-effort deactivation; failure never blocks teardown.
        if state == LifecycleState::Active {
            if let Some(instance) = &instance {
                if let Err(e) = LifecycleController::deactivate(id, instance).await {
                    warn!(
                        extension = %id,
                        error = %e,
                        "deactivation during unload failed; continuing"
                    );
                }
            }
        }

        // Take the handle so teardown runs at most once even if unload
        // is retried during error recovery.
        let sandbox = {
            let mut records = self.records.write().await;
            records.get_mut(id).and_then(|record| record.sandbox.take())
        };
        if let Some(handle) = sandbox {
            if let Err(e) = self.provider.destroy_sandbox(&handle).await {
                warn!(extension = %id, error = %e, "sandbox teardown failed; unloading anyway");
            }
        }

        {
            let mut records = self.records.write().await;
            if let Some(record) = records.get_mut(id) {
                record.state = LifecycleController::transition(
                    id,
                    record.state,
                    LifecycleState::Unloaded,
                    "unload",
                )?;
            }
            records.remove(id);
        }
        info!(extension = %id, "extension unloaded");
        self.bus.emit(ExtensionEventType::Deactivated, id, None);
        Ok(())
    }

    /// Runtime view of one loaded extension.
    pub async fn get_extension(&self, id: &str) -> Option<ExtensionStatus> {
        let records = self.records.read().await;
        records.get(id).map(|record| Self::status(id, record))
    }

    /// Runtime views of all loaded extensions, sorted by id.
    pub async fn get_extensions(&self) -> Vec<ExtensionStatus> {
        let records = self.records.read().await;
        let mut statuses: Vec<ExtensionStatus> = records
            .iter()
            .map(|(id, record)| Self::status(id, record))
            .collect();
        statuses.sort_by(|a, b| a.id.cmp(&b.id));
        statuses
    }

    /// All registered manifests (including unloaded extensions).
    pub async fn get_registry(&self) -> Vec<Arc<ExtensionManifest>> {
        self.registry.read().await.list()
    }

    /// Aggregate counts over the loaded set. Never fails.
    pub async fn get_metrics(&self) -> ExtensionMetrics {
        let records = self.records.read().await;
        let mut metrics = ExtensionMetrics {
            total: records.len(),
            ..Default::default()
        };
        for record in records.values() {
            match record.state {
                LifecycleState::Active => metrics.active += 1,
                LifecycleState::Inactive => metrics.inactive += 1,
                LifecycleState::Error => metrics.errors += 1,
                _ => {}
            }
            let isolated = record
                .sandbox
                .as_ref()
                .map(|handle| handle.isolated)
                .unwrap_or(record.manifest.sandboxed);
            if isolated {
                metrics.sandboxed += 1;
            }
            if record.manifest.trusted {
                metrics.trusted += 1;
            }
        }
        metrics
    }

    /// True iff the loaded extension holds the grant (exact level or
    /// `full`).
    pub async fn has_permission(
        &self,
        id: &str,
        permission: PermissionType,
        level: PermissionLevel,
    ) -> bool {
        let records = self.records.read().await;
        records
            .get(id)
            .map(|record| record.permissions.allows(permission, level))
            .unwrap_or(false)
    }

    fn status(id: &str, record: &ExtensionRecord) -> ExtensionStatus {
        ExtensionStatus {
            id: id.to_string(),
            state: record.state,
            sandboxed: record
                .sandbox
                .as_ref()
                .map(|handle| handle.isolated)
                .unwrap_or(record.manifest.sandboxed),
            trusted: record.manifest.trusted,
            dependencies: record.dependencies.clone(),
            failure: record.failure.clone(),
        }
    }

    async fn set_state(&self, id: &str, state: LifecycleState, failure: Option<String>) {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(id) {
            record.state = state;
            record.failure = failure;
        }
    }

    fn op_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.op_locks.lock().expect("op lock map poisoned");
        Arc::clone(locks.entry(id.to_string()).or_default())
    }
}
