//! Extension manifest types.
//!
//! Defines [`ExtensionManifest`], [`PermissionGrant`], and
//! [`PermissionSet`] -- the declarative schema describing an extension's
//! identity, capabilities, and dependencies. Manifests typically arrive
//! as JSON from an extension bundle.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtHostError;

/// Extension ids: alphanumerics, hyphens, underscores.
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-_]+$").expect("id pattern is valid"));

/// Versions: dotted `major.minor.patch`, optionally followed by a
/// pre-release or build suffix.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+").expect("version pattern is valid"));

/// The closed set of capability categories an extension may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    /// Element creation and queries in the host document.
    Dom,
    /// Outbound network access.
    Network,
    /// Per-extension persistent key-value storage.
    Storage,
    /// Subscribing to and emitting host events.
    Events,
    /// Component creation through the framework.
    Components,
    /// Framework performance metrics.
    Performance,
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dom => "dom",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Events => "events",
            Self::Components => "components",
            Self::Performance => "performance",
        };
        f.write_str(s)
    }
}

/// Access level of a permission grant. `Full` subsumes `Read` and
/// `Write` for the same type and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    Read,
    Write,
    Full,
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Full => "full",
        };
        f.write_str(s)
    }
}

/// A declared `(type, scope, level)` tuple authorizing one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Capability category.
    #[serde(rename = "type")]
    pub permission: PermissionType,

    /// Resource scope, e.g. `"all"` or a resource path. Must be non-empty.
    pub scope: String,

    /// Granted access level.
    pub level: PermissionLevel,
}

/// Extension manifest: the identity and contract of a pluggable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// Unique extension identifier (`[A-Za-z0-9-_]+`).
    pub id: String,

    /// Human-readable extension name.
    pub name: String,

    /// Dotted `major.minor.patch` version, optionally suffixed.
    pub version: String,

    /// What the extension does.
    #[serde(default)]
    pub description: String,

    /// Author identity, e.g. `"dev@example.com"`. The domain portion is
    /// what trust validation inspects.
    #[serde(default)]
    pub author: String,

    /// Entry point reference resolved inside the sandbox (module path,
    /// bundle key, or similar -- interpreted by the sandbox provider).
    pub entry_point: String,

    /// Required extensions, in declaration order: extension id mapped to
    /// a semver version requirement.
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Permission grants the extension requests.
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,

    /// Whether the extension runs in an isolated context.
    #[serde(default = "default_true")]
    pub sandboxed: bool,

    /// Whether the extension claims trusted status. Trust is only
    /// granted when the author domain passes the allowlist check.
    #[serde(default)]
    pub trusted: bool,
}

fn default_true() -> bool {
    true
}

impl ExtensionManifest {
    /// Validate the manifest. Returns an error describing the first
    /// validation failure, or `Ok(())` if the manifest is valid.
    ///
    /// Permission grant contents (scope) are checked separately by the
    /// host's permission validator; this method covers identity fields
    /// and dependency version requirements.
    pub fn validate(&self) -> Result<(), ExtHostError> {
        if self.id.is_empty() {
            return Err(ExtHostError::Validation("manifest: id is required".into()));
        }
        if !ID_RE.is_match(&self.id) {
            return Err(ExtHostError::Validation(format!(
                "manifest: invalid id '{}' (allowed: [A-Za-z0-9-_]+)",
                self.id
            )));
        }
        if self.name.is_empty() {
            return Err(ExtHostError::Validation(
                "manifest: name is required".into(),
            ));
        }
        if !VERSION_RE.is_match(&self.version) {
            return Err(ExtHostError::Validation(format!(
                "manifest: invalid version '{}' (expected major.minor.patch)",
                self.version
            )));
        }
        if self.entry_point.is_empty() {
            return Err(ExtHostError::Validation(
                "manifest: entry_point is required".into(),
            ));
        }
        for (dep_id, req) in &self.dependencies {
            if semver::VersionReq::parse(req).is_err() {
                return Err(ExtHostError::Validation(format!(
                    "manifest: dependency '{dep_id}' has invalid version requirement '{req}'"
                )));
            }
        }
        Ok(())
    }

    /// Parse a manifest from a JSON string and validate it.
    ///
    /// Wire-level failures (unknown permission type, level outside the
    /// closed set) are reported as [`ExtHostError::Validation`] so the
    /// caller sees one error kind for all malformed manifests.
    pub fn from_json(json: &str) -> Result<Self, ExtHostError> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| ExtHostError::Validation(format!("manifest: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }
}

/// Immutable snapshot of an extension's granted permissions.
///
/// Built once from the registered manifest; the capability surface holds
/// this snapshot for the lifetime of the loaded extension, so later
/// manifest edits can never widen a live extension's access.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grants: Vec<PermissionGrant>,
}

impl PermissionSet {
    /// Snapshot the grants of a manifest.
    pub fn from_manifest(manifest: &ExtensionManifest) -> Self {
        Self {
            grants: manifest.permissions.clone(),
        }
    }

    /// True iff a grant exists for `permission` with the requested level
    /// or with `Full` (which subsumes `Read` and `Write`).
    pub fn allows(&self, permission: PermissionType, level: PermissionLevel) -> bool {
        self.grants.iter().any(|g| {
            g.permission == permission
                && (g.level == level || g.level == PermissionLevel::Full)
        })
    }

    /// The underlying grants, in declaration order.
    pub fn grants(&self) -> &[PermissionGrant] {
        &self.grants
    }
}
