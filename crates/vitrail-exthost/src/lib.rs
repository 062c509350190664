//! Extension host for the vitrail component framework.
//!
//! This crate hosts third-party extensions: it validates and registers
//! their manifests, enforces their declared permissions at every
//! capability call, resolves inter-extension dependencies, drives each
//! extension through an explicit lifecycle state machine inside an
//! isolated sandbox, and broadcasts lifecycle events to host-side
//! subscribers.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`manager`] | [`ExtensionManager`], the host's public contract |
//! | [`registry`] | Validated manifest storage keyed by extension id |
//! | [`permissions`] | Grant validation and trusted-author checks |
//! | [`capability`] | Permission-gated API surface handed to extensions |
//! | [`resolver`] | Dependency resolution over loaded records |
//! | [`lifecycle`] | State machine guard and activation drivers |
//! | [`sandbox`] | [`SandboxProvider`] and [`ExtensionInstance`] seams |
//! | [`bus`] | Synchronous lifecycle event bus |
//!
//! # Wiring
//!
//! The host application implements the collaborator traits
//! ([`FrameworkOps`], [`EnvironmentOps`], [`PersistentStorageOps`],
//! [`SandboxProvider`]) and hands them to
//! [`ExtensionManager::new`]. Extensions never see those traits
//! directly; every call goes through a [`CapabilityApi`] scoped to the
//! extension's id and permission set.

pub mod bus;
pub mod capability;
pub mod lifecycle;
pub mod manager;
pub mod permissions;
pub mod registry;
pub mod resolver;
pub mod sandbox;

// Re-export the public surface at crate root for convenience.
pub use bus::{EventBus, EventHandler, SubscriptionId};
pub use capability::{
    CapabilityApi, CapabilityFactory, EnvironmentOps, FrameworkOps, PersistentStorageOps,
};
pub use lifecycle::LifecycleController;
pub use manager::{ExtensionManager, ExtensionMetrics, ExtensionStatus};
pub use permissions::{PermissionValidator, has_permission};
pub use registry::ManifestRegistry;
pub use resolver::{DependencyView, resolve_dependencies};
pub use sandbox::{ExtensionInstance, SandboxHandle, SandboxProvider};
