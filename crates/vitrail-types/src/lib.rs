//! Shared types for the vitrail extension host.
//!
//! This crate defines the data model consumed by `vitrail-exthost` and by
//! collaborating subsystems of the vitrail component framework:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`manifest`] | [`ExtensionManifest`], [`PermissionGrant`], [`PermissionSet`] |
//! | [`lifecycle`] | [`LifecycleState`] and the legal-transition table |
//! | [`event`] | [`ExtensionEvent`], [`ExtensionEventType`] |
//! | [`error`] | [`ExtHostError`], the unified error taxonomy |
//! | [`config`] | [`ExtHostConfig`], [`DependencyPolicy`] |
//!
//! Everything here is plain data: serde round-trippable, no async, no
//! locks. The wire shapes of `id`, `version`, and `permissions` are
//! stable across framework versions.

pub mod config;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod manifest;

// Re-export core types at crate root for convenience.
pub use config::{DependencyPolicy, ExtHostConfig};
pub use error::ExtHostError;
pub use event::{ExtensionEvent, ExtensionEventType};
pub use lifecycle::LifecycleState;
pub use manifest::{
    ExtensionManifest, PermissionGrant, PermissionLevel, PermissionSet, PermissionType,
};
