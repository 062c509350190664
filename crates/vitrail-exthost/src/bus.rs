//! Event bus for lifecycle and extension-emitted events.
//!
//! Subscribers register per event type and are invoked synchronously in
//! registration order. A handler that fails is logged and skipped; it
//! never suppresses the remaining handlers and never propagates to the
//! emitter. Handlers may call back into the bus: dispatch runs against
//! a snapshot of the subscriber list taken when `emit` starts, so
//! re-entrant `emit`/`on`/`off` calls never contend with delivery.
//! Subscriptions added or removed during delivery take effect for
//! subsequent events.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use vitrail_types::{ExtHostError, ExtensionEvent, ExtensionEventType};

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An event handler. Errors are logged by the bus, not propagated.
pub type EventHandler = Box<dyn Fn(&ExtensionEvent) -> Result<(), ExtHostError> + Send + Sync>;

/// Registered form of a handler; shared so `emit` can dispatch without
/// holding the registry lock.
type StoredHandler = Arc<dyn Fn(&ExtensionEvent) -> Result<(), ExtHostError> + Send + Sync>;

/// Publish/subscribe channel for [`ExtensionEvent`]s.
///
/// Delivery is synchronous: `emit` returns after every registered
/// handler for the type has run.
#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<HashMap<ExtensionEventType, Vec<(SubscriptionId, StoredHandler)>>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an event type. Handlers fire in registration order.
    pub fn on(&self, event: ExtensionEventType, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let handler: StoredHandler = Arc::from(handler);
        let mut handlers = self.handlers.lock().expect("event bus lock poisoned");
        handlers.entry(event).or_default().push((id, handler));
        id
    }

    /// Remove a subscription. Returns true if it was present.
    pub fn off(&self, event: ExtensionEventType, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock().expect("event bus lock poisoned");
        match handlers.get_mut(&event) {
            Some(list) => {
                let before = list.len();
                list.retain(|(sub_id, _)| *sub_id != id);
                list.len() != before
            }
            None => false,
        }
    }

    /// Emit an event to every subscriber of its type.
    ///
    /// Dispatch uses a snapshot of the subscriber list, so the registry
    /// lock is released before any handler runs and handlers may call
    /// back into the bus.
    pub fn emit(
        &self,
        event: ExtensionEventType,
        extension_id: &str,
        payload: Option<serde_json::Value>,
    ) {
        let evt = ExtensionEvent::new(event, extension_id, payload);
        debug!(extension = %extension_id, event = ?event, "emitting event");
        let snapshot: Vec<(SubscriptionId, StoredHandler)> = {
            let handlers = self.handlers.lock().expect("event bus lock poisoned");
            handlers.get(&event).cloned().unwrap_or_default()
        };
        for (id, handler) in &snapshot {
            if let Err(e) = handler(&evt) {
                warn!(
                    extension = %extension_id,
                    subscription = id.0,
                    error = %e,
                    "event handler failed; continuing with remaining handlers"
                );
            }
        }
    }

    /// Number of subscriptions for an event type.
    pub fn subscriber_count(&self, event: ExtensionEventType) -> usize {
        let handlers = self.handlers.lock().expect("event bus lock poisoned");
        handlers.get(&event).map_or(0, |list| list.len())
    }
}
