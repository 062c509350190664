//! Manifest registry.
//!
//! Stores validated [`ExtensionManifest`]s by id. Registration is the
//! only mutating entry point with side effects limited to the store;
//! reads never fail. Manifest persistence is independent of runtime
//! unload: unloading an extension leaves its manifest here so it can be
//! reloaded without re-registration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use vitrail_types::{ExtHostError, ExtensionManifest};

/// Registry of extension manifests, indexed by id.
#[derive(Default)]
pub struct ManifestRegistry {
    manifests: HashMap<String, Arc<ExtensionManifest>>,
}

impl ManifestRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a manifest.
    ///
    /// Fails with [`ExtHostError::Validation`] if identity fields are
    /// missing or malformed, and with [`ExtHostError::Duplicate`] if the
    /// id is already present. On failure nothing is stored.
    pub fn register(
        &mut self,
        manifest: ExtensionManifest,
    ) -> Result<Arc<ExtensionManifest>, ExtHostError> {
        manifest.validate()?;
        if self.manifests.contains_key(&manifest.id) {
            return Err(ExtHostError::Duplicate(manifest.id));
        }
        debug!(extension = %manifest.id, version = %manifest.version, "registering manifest");
        let manifest = Arc::new(manifest);
        self.manifests
            .insert(manifest.id.clone(), Arc::clone(&manifest));
        Ok(manifest)
    }

    /// Look up a manifest by id.
    pub fn get(&self, id: &str) -> Option<Arc<ExtensionManifest>> {
        self.manifests.get(id).cloned()
    }

    /// All registered manifests, sorted by id for deterministic output.
    pub fn list(&self) -> Vec<Arc<ExtensionManifest>> {
        let mut manifests: Vec<_> = self.manifests.values().cloned().collect();
        manifests.sort_by(|a, b| a.id.cmp(&b.id));
        manifests
    }

    /// Remove a manifest. Returns it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Arc<ExtensionManifest>> {
        self.manifests.remove(id)
    }

    /// Number of registered manifests.
    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    /// True if no manifests are registered.
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}
