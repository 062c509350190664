//! End-to-end tests for the extension host: registration, loading,
//! permission enforcement, dependency resolution, lifecycle transitions,
//! reload rollback, unload, and metrics, driven through a scripted
//! in-memory sandbox provider.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vitrail_exthost::{
    EnvironmentOps, EventBus, ExtensionInstance, ExtensionManager, FrameworkOps,
    PersistentStorageOps, SandboxHandle, SandboxProvider,
};
use vitrail_types::{
    DependencyPolicy, ExtHostConfig, ExtHostError, ExtensionEventType, ExtensionManifest,
    LifecycleState, PermissionLevel, PermissionType,
};

/// Shared scripting state for the mock provider. Tests flip flags here
/// to make specific phases fail.
#[derive(Default)]
struct Script {
    /// Ids whose sandbox creation fails.
    fail_sandbox: Mutex<HashSet<String>>,
    /// Ids whose entry-point instantiation fails.
    fail_instantiate: Mutex<HashSet<String>>,
    /// Instance generations (1-based, in instantiation order) whose
    /// activation routine fails.
    fail_activation_gens: Mutex<HashSet<usize>>,
    /// Ids whose deactivation routine fails.
    fail_deactivation: Mutex<HashSet<String>>,
    /// Per-id delay injected into activation, for concurrency tests.
    activation_delay: Mutex<HashMap<String, Duration>>,
    instantiations: AtomicUsize,
    sandboxes_created: AtomicUsize,
    sandboxes_destroyed: AtomicUsize,
}

struct ScriptedInstance {
    id: String,
    generation: usize,
    script: Arc<Script>,
}

#[async_trait]
impl ExtensionInstance for ScriptedInstance {
    async fn activate(&self) -> Result<(), ExtHostError> {
        let delay = self
            .script
            .activation_delay
            .lock()
            .unwrap()
            .get(&self.id)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self
            .script
            .fail_activation_gens
            .lock()
            .unwrap()
            .contains(&self.generation)
        {
            return Err(ExtHostError::Collaborator(format!(
                "scripted activation failure for {}",
                self.id
            )));
        }
        Ok(())
    }

    async fn deactivate(&self) -> Result<(), ExtHostError> {
        if self.script.fail_deactivation.lock().unwrap().contains(&self.id) {
            return Err(ExtHostError::Collaborator(format!(
                "scripted deactivation failure for {}",
                self.id
            )));
        }
        Ok(())
    }
}

struct MockProvider {
    script: Arc<Script>,
}

#[async_trait]
impl SandboxProvider for MockProvider {
    async fn create_sandbox(
        &self,
        manifest: &ExtensionManifest,
    ) -> Result<SandboxHandle, ExtHostError> {
        if self.script.fail_sandbox.lock().unwrap().contains(&manifest.id) {
            return Err(ExtHostError::SandboxCreation(format!(
                "scripted sandbox failure for {}",
                manifest.id
            )));
        }
        self.script.sandboxes_created.fetch_add(1, Ordering::SeqCst);
        Ok(SandboxHandle {
            extension_id: manifest.id.clone(),
            isolated: manifest.sandboxed,
        })
    }

    async fn instantiate(
        &self,
        handle: &SandboxHandle,
        _manifest: &ExtensionManifest,
        _api: Arc<vitrail_exthost::CapabilityApi>,
    ) -> Result<Arc<dyn ExtensionInstance>, ExtHostError> {
        if self
            .script
            .fail_instantiate
            .lock()
            .unwrap()
            .contains(&handle.extension_id)
        {
            return Err(ExtHostError::Activation(format!(
                "scripted instantiation failure for {}",
                handle.extension_id
            )));
        }
        let generation = self.script.instantiations.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Arc::new(ScriptedInstance {
            id: handle.extension_id.clone(),
            generation,
            script: Arc::clone(&self.script),
        }))
    }

    async fn destroy_sandbox(&self, _handle: &SandboxHandle) -> Result<(), ExtHostError> {
        self.script.sandboxes_destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct NoopFramework;

#[async_trait]
impl FrameworkOps for NoopFramework {
    async fn create_component(
        &self,
        definition: serde_json::Value,
    ) -> Result<serde_json::Value, ExtHostError> {
        Ok(definition)
    }

    async fn metrics(&self) -> Result<serde_json::Value, ExtHostError> {
        Ok(serde_json::json!({}))
    }
}

struct NoopEnvironment;

#[async_trait]
impl EnvironmentOps for NoopEnvironment {
    async fn create_element(&self, tag: &str) -> Result<serde_json::Value, ExtHostError> {
        Ok(serde_json::json!({ "tag": tag }))
    }

    async fn query_selector(
        &self,
        _selector: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError> {
        Ok(None)
    }

    async fn add_event_listener(
        &self,
        _extension_id: &str,
        _event: &str,
    ) -> Result<(), ExtHostError> {
        Ok(())
    }
}

#[derive(Default)]
struct MemoryStorage {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

#[async_trait]
impl PersistentStorageOps for MemoryStorage {
    async fn get(
        &self,
        extension_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, ExtHostError> {
        Ok(self
            .values
            .lock()
            .unwrap()
            .get(&format!("{extension_id}::{key}"))
            .cloned())
    }

    async fn set(
        &self,
        extension_id: &str,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ExtHostError> {
        self.values
            .lock()
            .unwrap()
            .insert(format!("{extension_id}::{key}"), value);
        Ok(())
    }

    async fn remove(&self, extension_id: &str, key: &str) -> Result<(), ExtHostError> {
        self.values
            .lock()
            .unwrap()
            .remove(&format!("{extension_id}::{key}"));
        Ok(())
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

fn host_with_config(config: ExtHostConfig) -> (Arc<ExtensionManager>, Arc<Script>) {
    init_logging();
    let script = Arc::new(Script::default());
    let provider = Arc::new(MockProvider {
        script: Arc::clone(&script),
    });
    let manager = Arc::new(ExtensionManager::new(
        config,
        provider,
        Arc::new(NoopFramework),
        Arc::new(NoopEnvironment),
        Arc::new(MemoryStorage::default()),
    ));
    manager.initialize().unwrap();
    (manager, script)
}

fn host() -> (Arc<ExtensionManager>, Arc<Script>) {
    host_with_config(ExtHostConfig::default())
}

fn manifest(id: &str) -> ExtensionManifest {
    ExtensionManifest::from_json(
        &serde_json::json!({
            "id": id,
            "name": format!("Extension {id}"),
            "version": "1.0.0",
            "entry_point": "index",
        })
        .to_string(),
    )
    .unwrap()
}

fn manifest_with_deps(id: &str, deps: &[(&str, &str)]) -> ExtensionManifest {
    let mut m = manifest(id);
    m.dependencies = deps
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    m
}

/// Collects emitted event types in order.
fn record_events(bus: &Arc<EventBus>, event: ExtensionEventType) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    bus.on(
        event,
        Box::new(move |evt| {
            seen_clone.lock().unwrap().push(evt.extension_id.clone());
            Ok(())
        }),
    );
    seen
}

#[tokio::test]
async fn register_load_and_observe() {
    let (manager, script) = host();
    let loaded = record_events(manager.bus(), ExtensionEventType::Loaded);
    let activated = record_events(manager.bus(), ExtensionEventType::Activated);

    manager.register_extension(manifest("theme-pack")).await.unwrap();
    manager.load_extension("theme-pack").await.unwrap();

    let status = manager.get_extension("theme-pack").await.unwrap();
    assert_eq!(status.state, LifecycleState::Active);
    assert!(status.sandboxed);
    assert!(!status.trusted);
    assert!(status.failure.is_none());

    assert_eq!(*loaded.lock().unwrap(), vec!["theme-pack"]);
    assert_eq!(*activated.lock().unwrap(), vec!["theme-pack"]);
    assert_eq!(script.sandboxes_created.load(Ordering::SeqCst), 1);

    let metrics = manager.get_metrics().await;
    assert_eq!(metrics.total, 1);
    assert_eq!(metrics.active, 1);
    assert_eq!(metrics.sandboxed, 1);
    assert_eq!(metrics.errors, 0);
}

#[tokio::test]
async fn operations_require_initialization() {
    let script = Arc::new(Script::default());
    let manager = ExtensionManager::new(
        ExtHostConfig::default(),
        Arc::new(MockProvider { script }),
        Arc::new(NoopFramework),
        Arc::new(NoopEnvironment),
        Arc::new(MemoryStorage::default()),
    );

    let err = manager.register_extension(manifest("early")).await.unwrap_err();
    assert!(matches!(err, ExtHostError::NotInitialized));
    let err = manager.load_extension("early").await.unwrap_err();
    assert!(matches!(err, ExtHostError::NotInitialized));

    manager.initialize().unwrap();
    assert!(matches!(
        manager.initialize().unwrap_err(),
        ExtHostError::AlreadyInitialized
    ));
}

#[tokio::test]
async fn invalid_manifest_is_rejected_atomically() {
    let (manager, _) = host();
    let mut bad = manifest("bad-ext");
    bad.id = "bad ext!".into();

    assert!(matches!(
        manager.register_extension(bad).await.unwrap_err(),
        ExtHostError::Validation(_)
    ));
    assert!(manager.get_registry().await.is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (manager, _) = host();
    manager.register_extension(manifest("dup")).await.unwrap();
    assert!(matches!(
        manager.register_extension(manifest("dup")).await.unwrap_err(),
        ExtHostError::Duplicate(_)
    ));
    assert_eq!(manager.get_registry().await.len(), 1);
}

#[tokio::test]
async fn trusted_manifest_requires_allowlisted_author_domain() {
    let (manager, _) = host();

    let mut untrusted_author = manifest("sneaky");
    untrusted_author.trusted = true;
    untrusted_author.author = "dev@evil.example".into();
    assert!(matches!(
        manager.register_extension(untrusted_author).await.unwrap_err(),
        ExtHostError::Trust(_)
    ));

    let mut ok = manifest("official");
    ok.trusted = true;
    ok.author = "releases@ci.github.com".into();
    manager.register_extension(ok).await.unwrap();
}

#[tokio::test]
async fn load_of_unregistered_extension_is_not_found() {
    let (manager, _) = host();
    assert!(matches!(
        manager.load_extension("ghost").await.unwrap_err(),
        ExtHostError::NotFound(_)
    ));
}

#[tokio::test]
async fn activation_failure_parks_record_in_error() {
    let (manager, script) = host();
    let errors = record_events(manager.bus(), ExtensionEventType::Error);

    manager.register_extension(manifest("flaky")).await.unwrap();
    script.fail_activation_gens.lock().unwrap().insert(1);

    let err = manager.load_extension("flaky").await.unwrap_err();
    assert!(matches!(err, ExtHostError::Activation(_)));

    let status = manager.get_extension("flaky").await.unwrap();
    assert_eq!(status.state, LifecycleState::Error);
    assert!(status.failure.as_deref().unwrap().contains("flaky"));
    assert_eq!(*errors.lock().unwrap(), vec!["flaky"]);

    let metrics = manager.get_metrics().await;
    assert_eq!(metrics.errors, 1);
    assert_eq!(metrics.active, 0);
}

#[tokio::test]
async fn sandbox_creation_failure_parks_record_in_error() {
    let (manager, script) = host();
    manager.register_extension(manifest("boxed")).await.unwrap();
    script.fail_sandbox.lock().unwrap().insert("boxed".into());

    let err = manager.load_extension("boxed").await.unwrap_err();
    assert!(matches!(err, ExtHostError::SandboxCreation(_)));
    assert_eq!(
        manager.get_extension("boxed").await.unwrap().state,
        LifecycleState::Error
    );
}

#[tokio::test]
async fn concurrent_loads_coalesce_into_one_sandbox() {
    let (manager, script) = host();
    manager.register_extension(manifest("slow")).await.unwrap();
    script
        .activation_delay
        .lock()
        .unwrap()
        .insert("slow".into(), Duration::from_millis(50));

    let m1 = Arc::clone(&manager);
    let m2 = Arc::clone(&manager);
    let (a, b) = tokio::join!(
        tokio::spawn(async move { m1.load_extension("slow").await }),
        tokio::spawn(async move { m2.load_extension("slow").await }),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    assert_eq!(script.sandboxes_created.load(Ordering::SeqCst), 1);
    assert_eq!(script.instantiations.load(Ordering::SeqCst), 1);
    assert_eq!(
        manager.get_extension("slow").await.unwrap().state,
        LifecycleState::Active
    );
}

#[tokio::test]
async fn duplicate_load_of_errored_extension_reports_captured_failure() {
    let (manager, script) = host();
    manager.register_extension(manifest("flaky")).await.unwrap();
    script.fail_activation_gens.lock().unwrap().insert(1);
    let _ = manager.load_extension("flaky").await;

    let err = manager.load_extension("flaky").await.unwrap_err();
    match err {
        ExtHostError::Activation(msg) => assert!(msg.contains("flaky")),
        other => panic!("expected Activation, got: {other}"),
    }
    // No second sandbox was attempted.
    assert_eq!(script.sandboxes_created.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dependency_must_be_active_before_dependent_loads() {
    let (manager, _) = host();
    manager.register_extension(manifest("base")).await.unwrap();
    manager
        .register_extension(manifest_with_deps("addon", &[("base", "^1.0")]))
        .await
        .unwrap();

    let err = manager.load_extension("addon").await.unwrap_err();
    assert!(matches!(err, ExtHostError::MissingDependency { .. }));

    manager.load_extension("base").await.unwrap();
    manager.load_extension("addon").await.unwrap();

    let status = manager.get_extension("addon").await.unwrap();
    assert_eq!(status.dependencies, vec!["base"]);
}

#[tokio::test]
async fn dependency_version_mismatch_fails_load() {
    let (manager, _) = host();
    manager.register_extension(manifest("base")).await.unwrap();
    manager
        .register_extension(manifest_with_deps("addon", &[("base", "^2.0")]))
        .await
        .unwrap();
    manager.load_extension("base").await.unwrap();

    assert!(matches!(
        manager.load_extension("addon").await.unwrap_err(),
        ExtHostError::MissingDependency { .. }
    ));
}

#[tokio::test]
async fn optional_policy_loads_without_missing_dependency() {
    let config = ExtHostConfig {
        dependency_policy: DependencyPolicy::Optional,
        ..Default::default()
    };
    let (manager, _) = host_with_config(config);
    manager
        .register_extension(manifest_with_deps("addon", &[("base", "*")]))
        .await
        .unwrap();

    manager.load_extension("addon").await.unwrap();
    let status = manager.get_extension("addon").await.unwrap();
    assert_eq!(status.state, LifecycleState::Active);
    assert!(status.dependencies.is_empty());
}

#[tokio::test]
async fn deactivate_moves_active_to_inactive() {
    let (manager, _) = host();
    let deactivated = record_events(manager.bus(), ExtensionEventType::Deactivated);
    manager.register_extension(manifest("toggle")).await.unwrap();
    manager.load_extension("toggle").await.unwrap();

    manager.deactivate_extension("toggle").await.unwrap();
    assert_eq!(
        manager.get_extension("toggle").await.unwrap().state,
        LifecycleState::Inactive
    );
    assert_eq!(*deactivated.lock().unwrap(), vec!["toggle"]);

    // Second deactivation is a state conflict, not a silent no-op.
    assert!(matches!(
        manager.deactivate_extension("toggle").await.unwrap_err(),
        ExtHostError::StateConflict { .. }
    ));
}

#[tokio::test]
async fn deactivation_failure_moves_record_to_error() {
    let (manager, script) = host();
    manager.register_extension(manifest("sticky")).await.unwrap();
    manager.load_extension("sticky").await.unwrap();
    script.fail_deactivation.lock().unwrap().insert("sticky".into());

    let err = manager.deactivate_extension("sticky").await.unwrap_err();
    assert!(matches!(err, ExtHostError::Deactivation(_)));
    assert_eq!(
        manager.get_extension("sticky").await.unwrap().state,
        LifecycleState::Error
    );
}

#[tokio::test]
async fn reload_swaps_instance_in_same_sandbox() {
    let (manager, script) = host();
    manager.register_extension(manifest("hot")).await.unwrap();
    manager.load_extension("hot").await.unwrap();

    manager.reload_extension("hot").await.unwrap();

    assert_eq!(script.sandboxes_created.load(Ordering::SeqCst), 1);
    assert_eq!(script.instantiations.load(Ordering::SeqCst), 2);
    assert_eq!(
        manager.get_extension("hot").await.unwrap().state,
        LifecycleState::Active
    );
}

#[tokio::test]
async fn failed_reload_rolls_back_to_previous_instance() {
    let (manager, script) = host();
    manager.register_extension(manifest("hot")).await.unwrap();
    manager.load_extension("hot").await.unwrap();

    // Generation 2 is the fresh instance built by the reload; the
    // original generation 1 still activates cleanly for rollback.
    script.fail_activation_gens.lock().unwrap().insert(2);

    let err = manager.reload_extension("hot").await.unwrap_err();
    assert!(matches!(err, ExtHostError::Activation(_)));
    assert_eq!(
        manager.get_extension("hot").await.unwrap().state,
        LifecycleState::Active
    );
}

#[tokio::test]
async fn failed_reload_of_inactive_extension_returns_to_inactive() {
    let (manager, script) = host();
    manager.register_extension(manifest("cold")).await.unwrap();
    manager.load_extension("cold").await.unwrap();
    manager.deactivate_extension("cold").await.unwrap();

    script.fail_activation_gens.lock().unwrap().insert(2);
    assert!(manager.reload_extension("cold").await.is_err());
    assert_eq!(
        manager.get_extension("cold").await.unwrap().state,
        LifecycleState::Inactive
    );
}

#[tokio::test]
async fn reload_from_error_state_is_a_conflict() {
    let (manager, script) = host();
    manager.register_extension(manifest("flaky")).await.unwrap();
    script.fail_activation_gens.lock().unwrap().insert(1);
    let _ = manager.load_extension("flaky").await;

    assert!(matches!(
        manager.reload_extension("flaky").await.unwrap_err(),
        ExtHostError::StateConflict { .. }
    ));
}

#[tokio::test]
async fn unload_tears_down_and_keeps_registration() {
    let (manager, script) = host();
    manager.register_extension(manifest("round-trip")).await.unwrap();
    manager.load_extension("round-trip").await.unwrap();

    manager.unload_extension("round-trip").await.unwrap();

    assert_eq!(script.sandboxes_destroyed.load(Ordering::SeqCst), 1);
    assert!(manager.get_extension("round-trip").await.is_none());
    assert_eq!(manager.get_metrics().await.total, 0);

    // The manifest survives unload; a fresh load needs no re-register.
    assert_eq!(manager.get_registry().await.len(), 1);
    manager.load_extension("round-trip").await.unwrap();
    assert_eq!(
        manager.get_extension("round-trip").await.unwrap().state,
        LifecycleState::Active
    );
    assert_eq!(script.sandboxes_created.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn second_unload_fails_and_teardown_runs_once() {
    let (manager, script) = host();
    manager.register_extension(manifest("once")).await.unwrap();
    manager.load_extension("once").await.unwrap();

    manager.unload_extension("once").await.unwrap();
    assert!(matches!(
        manager.unload_extension("once").await.unwrap_err(),
        ExtHostError::NotFound(_)
    ));
    assert_eq!(script.sandboxes_destroyed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unload_survives_failing_deactivation() {
    let (manager, script) = host();
    manager.register_extension(manifest("stubborn")).await.unwrap();
    manager.load_extension("stubborn").await.unwrap();
    script.fail_deactivation.lock().unwrap().insert("stubborn".into());

    manager.unload_extension("stubborn").await.unwrap();
    assert!(manager.get_extension("stubborn").await.is_none());
    assert_eq!(script.sandboxes_destroyed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unload_of_errored_extension_cleans_up() {
    let (manager, script) = host();
    manager.register_extension(manifest("flaky")).await.unwrap();
    script.fail_activation_gens.lock().unwrap().insert(1);
    let _ = manager.load_extension("flaky").await;

    manager.unload_extension("flaky").await.unwrap();
    assert!(manager.get_extension("flaky").await.is_none());
    // The sandbox existed (creation succeeded) and was destroyed.
    assert_eq!(script.sandboxes_destroyed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unregister_requires_prior_unload() {
    let (manager, _) = host();
    manager.register_extension(manifest("tidy")).await.unwrap();
    manager.load_extension("tidy").await.unwrap();

    assert!(matches!(
        manager.unregister_extension("tidy").await.unwrap_err(),
        ExtHostError::StateConflict { .. }
    ));

    manager.unload_extension("tidy").await.unwrap();
    manager.unregister_extension("tidy").await.unwrap();
    assert!(manager.get_registry().await.is_empty());
    assert!(matches!(
        manager.unregister_extension("tidy").await.unwrap_err(),
        ExtHostError::NotFound(_)
    ));
    // The id is free for a fresh registration.
    manager.register_extension(manifest("tidy")).await.unwrap();
}

#[tokio::test]
async fn metrics_count_every_bucket() {
    let (manager, script) = host();
    for id in ["a", "b", "c"] {
        manager.register_extension(manifest(id)).await.unwrap();
    }
    let mut trusted = manifest("d");
    trusted.trusted = true;
    trusted.author = "team@localhost".into();
    trusted.sandboxed = false;
    manager.register_extension(trusted).await.unwrap();

    manager.load_extension("a").await.unwrap();
    manager.load_extension("b").await.unwrap();
    manager.deactivate_extension("b").await.unwrap();
    script.fail_activation_gens.lock().unwrap().insert(3);
    let _ = manager.load_extension("c").await;
    manager.load_extension("d").await.unwrap();

    let metrics = manager.get_metrics().await;
    assert_eq!(metrics.total, 4);
    assert_eq!(metrics.active, 2);
    assert_eq!(metrics.inactive, 1);
    assert_eq!(metrics.errors, 1);
    assert_eq!(metrics.sandboxed, 3);
    assert_eq!(metrics.trusted, 1);
}

#[tokio::test]
async fn has_permission_reflects_loaded_grants() {
    let (manager, _) = host();
    let mut m = manifest("scoped");
    m.permissions = vec![vitrail_types::PermissionGrant {
        permission: PermissionType::Storage,
        scope: "preferences".into(),
        level: PermissionLevel::Full,
    }];
    manager.register_extension(m).await.unwrap();
    manager.load_extension("scoped").await.unwrap();

    assert!(
        manager
            .has_permission("scoped", PermissionType::Storage, PermissionLevel::Write)
            .await
    );
    assert!(
        !manager
            .has_permission("scoped", PermissionType::Dom, PermissionLevel::Read)
            .await
    );
    assert!(
        !manager
            .has_permission("missing", PermissionType::Storage, PermissionLevel::Read)
            .await
    );
}

#[tokio::test]
async fn get_extensions_lists_sorted_statuses() {
    let (manager, _) = host();
    for id in ["zeta", "alpha", "mid"] {
        manager.register_extension(manifest(id)).await.unwrap();
        manager.load_extension(id).await.unwrap();
    }
    let ids: Vec<String> = manager
        .get_extensions()
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
}
