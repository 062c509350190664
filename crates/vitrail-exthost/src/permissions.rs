//! Permission grant validation and author trust checks.
//!
//! [`PermissionValidator`] runs at registration time: grant validation
//! for every manifest, and the trusted-domain allowlist check for
//! manifests that claim `trusted: true`. Trust relaxes author-origin
//! scrutiny only; permission scrutiny still applies to trusted
//! extensions.

use vitrail_types::{
    ExtHostError, ExtensionManifest, PermissionLevel, PermissionSet, PermissionType,
};

/// Validates permission grants and author trust against the configured
/// allowlist.
pub struct PermissionValidator {
    trusted_domains: Vec<String>,
}

impl PermissionValidator {
    /// Create a validator with the given trusted-domain allowlist.
    pub fn new(trusted_domains: Vec<String>) -> Self {
        Self { trusted_domains }
    }

    /// Check every grant in the manifest: type and level come from
    /// closed sets (enforced by the type system at the wire boundary),
    /// and scope must be non-empty. The error names the offending grant.
    pub fn validate_permissions(&self, manifest: &ExtensionManifest) -> Result<(), ExtHostError> {
        for (index, grant) in manifest.permissions.iter().enumerate() {
            if grant.scope.is_empty() {
                return Err(ExtHostError::Validation(format!(
                    "permission grant #{index} ({}.{}) has an empty scope",
                    grant.permission, grant.level
                )));
            }
        }
        Ok(())
    }

    /// Check that a trusted manifest's author belongs to an allowlisted
    /// domain. Only invoked when `manifest.trusted` is true.
    pub fn validate_trust(&self, manifest: &ExtensionManifest) -> Result<(), ExtHostError> {
        let domain = manifest
            .author
            .split_once('@')
            .map(|(_, domain)| domain)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                ExtHostError::Trust(format!(
                    "trusted extension '{}' has no author domain to verify",
                    manifest.id
                ))
            })?;

        if self
            .trusted_domains
            .iter()
            .any(|pattern| domain_matches(domain, pattern))
        {
            Ok(())
        } else {
            Err(ExtHostError::Trust(format!(
                "author domain '{domain}' of extension '{}' is not in the trusted allowlist",
                manifest.id
            )))
        }
    }
}

/// True iff a grant exists in `set` for `permission` with the requested
/// level, or with `full`.
pub fn has_permission(
    set: &PermissionSet,
    permission: PermissionType,
    level: PermissionLevel,
) -> bool {
    set.allows(permission, level)
}

/// Check whether a domain matches a pattern (exact or `*.` wildcard
/// suffix), case-insensitively.
fn domain_matches(domain: &str, pattern: &str) -> bool {
    let domain = domain.to_lowercase();
    let pattern = pattern.to_lowercase();

    if let Some(suffix) = pattern.strip_prefix("*.") {
        return domain.ends_with(&format!(".{suffix}")) || domain == suffix;
    }
    domain == pattern
}
