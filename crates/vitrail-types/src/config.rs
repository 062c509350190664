//! Extension host configuration.
//!
//! [`ExtHostConfig`] is deserialized from the framework's configuration
//! file and passed to the manager at construction. There is no implicit
//! module-level state; everything the host needs is carried here.

use serde::{Deserialize, Serialize};

/// How the dependency resolver treats a dependency that is not active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyPolicy {
    /// Loading fails with a missing-dependency error. Default.
    #[default]
    FailFast,
    /// Missing dependencies are logged and skipped; the extension loads
    /// without the link.
    Optional,
}

/// Configuration for the extension host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtHostConfig {
    /// Domains whose authors may register trusted extensions. Entries
    /// are exact domains or wildcard patterns (`*.example.com`).
    #[serde(default = "default_trusted_domains")]
    pub trusted_domains: Vec<String>,

    /// Dependency resolution policy applied uniformly to every load.
    #[serde(default)]
    pub dependency_policy: DependencyPolicy,
}

fn default_trusted_domains() -> Vec<String> {
    vec![
        "localhost".into(),
        "127.0.0.1".into(),
        "*.github.com".into(),
        "*.npm.org".into(),
    ]
}

impl Default for ExtHostConfig {
    fn default() -> Self {
        Self {
            trusted_domains: default_trusted_domains(),
            dependency_policy: DependencyPolicy::default(),
        }
    }
}
