//! Extension host error types.
//!
//! Defines [`ExtHostError`], the unified error type for registration,
//! loading, permission checks, lifecycle transitions, and sandbox
//! operations.

use thiserror::Error;

use crate::lifecycle::LifecycleState;
use crate::manifest::{PermissionLevel, PermissionType};

/// Errors produced by extension host operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtHostError {
    /// A manifest or permission grant failed structural validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An extension with the same id is already registered.
    #[error("extension already registered: {0}")]
    Duplicate(String),

    /// A trusted manifest's author domain is not in the allowlist.
    #[error("trust validation failed: {0}")]
    Trust(String),

    /// A capability call was denied by the permission check.
    ///
    /// Surfaces synchronously to the extension's own code; it never
    /// reaches the host application. Carries the structured
    /// `(permission, level)` pair so extension code can branch on it
    /// instead of matching message strings.
    #[error("permission denied: {permission}.{level}")]
    PermissionDenied {
        permission: PermissionType,
        level: PermissionLevel,
    },

    /// A declared dependency is missing or not active.
    #[error("extension '{extension}' depends on '{dependency}' which is not active")]
    MissingDependency {
        extension: String,
        dependency: String,
    },

    /// The sandbox provider failed to create an isolated context.
    #[error("sandbox creation failed: {0}")]
    SandboxCreation(String),

    /// The extension's own activation routine failed.
    #[error("activation failed: {0}")]
    Activation(String),

    /// The extension's own deactivation routine failed.
    #[error("deactivation failed: {0}")]
    Deactivation(String),

    /// `initialize()` was called on an already-initialized host.
    #[error("extension host already initialized")]
    AlreadyInitialized,

    /// A host operation was invoked before `initialize()`.
    #[error("extension host not initialized")]
    NotInitialized,

    /// No extension with the given id is registered / loaded.
    #[error("extension not found: {0}")]
    NotFound(String),

    /// An operation was requested from a lifecycle state that does not
    /// permit it.
    #[error("extension '{extension}' is {state}, cannot {operation}")]
    StateConflict {
        extension: String,
        state: LifecycleState,
        operation: String,
    },

    /// A collaborator operation failed after the permission check passed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
