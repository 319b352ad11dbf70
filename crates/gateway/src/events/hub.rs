//! Per-connector listener registry

use dashmap::DashMap;
use hbot_core::{EventKind, EventPayload};
use std::collections::HashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifies one registered listener across hubs
pub type ListenerId = Uuid;

/// Cloneable handle a hub delivers fired events into. The receiving end is
/// drained by a single task on the owning context; sending is synchronous,
/// non-blocking, and safe from any thread.
pub type EventSender = mpsc::UnboundedSender<RaisedEvent>;

/// One fired event, as handed across the thread boundary
#[derive(Debug, Clone)]
pub struct RaisedEvent {
    pub kind: EventKind,
    /// Name of the hub that fired it
    pub source: String,
    pub payload: EventPayload,
}

/// Listener registry for one market/connector (or for the application
/// itself). Registration is keyed by `(kind, listener id)`: adding the same
/// pair twice is a no-op, as is removing a pair that is not registered.
pub struct EventHub {
    source: String,
    listeners: DashMap<EventKind, HashMap<ListenerId, EventSender>>,
}

impl EventHub {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            listeners: DashMap::new(),
        }
    }

    /// Name of the connector this hub belongs to
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn add_listener(&self, kind: EventKind, id: ListenerId, sender: EventSender) {
        self.listeners.entry(kind).or_default().insert(id, sender);
    }

    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) {
        if let Some(mut entry) = self.listeners.get_mut(&kind) {
            entry.remove(&id);
        }
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(|e| e.len()).unwrap_or(0)
    }

    /// True if no listener is registered for any kind
    pub fn is_empty(&self) -> bool {
        self.listeners.iter().all(|entry| entry.is_empty())
    }

    /// Deliver an event to every listener registered for its kind.
    /// Callable from any thread; a listener whose receiver is gone is
    /// silently skipped.
    pub fn fire(&self, kind: EventKind, payload: EventPayload) {
        if let Some(entry) = self.listeners.get(&kind) {
            for sender in entry.values() {
                let _ = sender.send(RaisedEvent {
                    kind,
                    source: self.source.clone(),
                    payload: payload.clone(),
                });
            }
        }
    }
}
