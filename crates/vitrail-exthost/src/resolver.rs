//! Dependency resolution.
//!
//! [`resolve_dependencies`] is a pure function over a snapshot of the
//! currently loaded records: no locks, no async, trivially testable.
//! The manager builds the snapshot while holding its record lock, so
//! resolution sees a consistent view.
//!
//! The policy for a dependency that is not active is explicit
//! configuration ([`DependencyPolicy`]), applied uniformly:
//! `FailFast` (default) rejects the load; `Optional` logs and skips the
//! link.

use std::collections::HashMap;

use tracing::{debug, warn};

use vitrail_types::{DependencyPolicy, ExtHostError, ExtensionManifest, LifecycleState};

/// Snapshot of one loaded record, as seen by the resolver.
#[derive(Debug, Clone)]
pub struct DependencyView {
    pub state: LifecycleState,
    pub version: String,
}

/// Resolve the dependencies of `manifest` against the given snapshot.
///
/// Returns the dependency ids that resolved, in declaration order. A
/// dependency resolves when an Active record exists for its id and that
/// record's version satisfies the declared requirement. Anything else is
/// handled per `policy`.
pub fn resolve_dependencies(
    manifest: &ExtensionManifest,
    loaded: &HashMap<String, DependencyView>,
    policy: DependencyPolicy,
) -> Result<Vec<String>, ExtHostError> {
    let mut resolved = Vec::with_capacity(manifest.dependencies.len());

    for (dep_id, requirement) in &manifest.dependencies {
        let satisfied = loaded
            .get(dep_id)
            .filter(|view| view.state == LifecycleState::Active)
            .map(|view| version_satisfies(dep_id, &view.version, requirement))
            .unwrap_or(false);

        if satisfied {
            debug!(extension = %manifest.id, dependency = %dep_id, "dependency resolved");
            resolved.push(dep_id.clone());
            continue;
        }

        match policy {
            DependencyPolicy::FailFast => {
                return Err(ExtHostError::MissingDependency {
                    extension: manifest.id.clone(),
                    dependency: dep_id.clone(),
                });
            }
            DependencyPolicy::Optional => {
                warn!(
                    extension = %manifest.id,
                    dependency = %dep_id,
                    "dependency not active; continuing without it (optional policy)"
                );
            }
        }
    }

    Ok(resolved)
}

/// True when `version` satisfies `requirement`. A version the host
/// cannot parse as semver passes with a warning: the manifest's own
/// version pattern is wider than strict semver, and refusing to link in
/// that case would reject manifests the registry accepted.
fn version_satisfies(dep_id: &str, version: &str, requirement: &str) -> bool {
    let Ok(req) = semver::VersionReq::parse(requirement) else {
        // Unreachable for registered manifests; requirements are
        // validated at registration.
        warn!(dependency = %dep_id, requirement = %requirement, "unparseable version requirement");
        return false;
    };
    match semver::Version::parse(version) {
        Ok(v) => req.matches(&v),
        Err(_) => {
            warn!(
                dependency = %dep_id,
                version = %version,
                "dependency version is not strict semver; skipping requirement check"
            );
            true
        }
    }
}
