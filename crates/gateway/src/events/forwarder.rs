//! Event forwarder: normalizes fired events and publishes them
//!
//! One forwarder serves all hubs. Its listener handle may be fired from any
//! thread; the drain task it spawns is the only place events are published,
//! which keeps bus access on the owning context. Events fired from one
//! thread are published in firing order; no order is defined across
//! threads.

use crate::events::hub::{EventHub, EventSender, ListenerId, RaisedEvent};
use crate::messages::telemetry::EventMessage;
use crate::transport::Publisher;
use chrono::Utc;
use hbot_core::{EventKind, MarketEventKind};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Application-level kinds bridged in addition to the market table.
/// Empty until the application defines any.
const APP_EVENT_KINDS: [EventKind; 0] = [];

/// Bridges domain events from registered hubs to the `events` topic
pub struct EventForwarder {
    listener_id: ListenerId,
    tx: EventSender,
    registrations: Vec<(Arc<EventHub>, EventKind)>,
    drain: Option<JoinHandle<()>>,
}

impl EventForwarder {
    /// Spawn the publishing task and register against every hub: each
    /// market hub gets one listener per kind in the closed market table,
    /// the application hub one per application-level kind.
    ///
    /// Must be called from within the gateway runtime.
    pub fn attach(
        publisher: Arc<dyn Publisher<EventMessage>>,
        markets: Vec<Arc<EventHub>>,
        app_events: Option<Arc<EventHub>>,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RaisedEvent>();

        let drain = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                forward_event(publisher.as_ref(), event).await;
            }
        });

        let mut forwarder = Self {
            listener_id: Uuid::new_v4(),
            tx,
            registrations: Vec::new(),
            drain: Some(drain),
        };

        for hub in markets {
            for kind in MarketEventKind::ALL {
                forwarder.register(hub.clone(), EventKind::Market(kind));
            }
            info!("bridging market events from '{}'", hub.source());
        }
        if let Some(hub) = app_events {
            for kind in APP_EVENT_KINDS {
                forwarder.register(hub.clone(), kind);
            }
        }

        forwarder
    }

    fn register(&mut self, hub: Arc<EventHub>, kind: EventKind) {
        hub.add_listener(kind, self.listener_id, self.tx.clone());
        debug!("bridged event {:?} on '{}'", kind, hub.source());
        self.registrations.push((hub, kind));
    }

    /// Remove every listener `attach` registered and stop the publishing
    /// task. Safe to call more than once.
    pub fn detach(&mut self) {
        for (hub, kind) in self.registrations.drain(..) {
            hub.remove_listener(kind, self.listener_id);
        }
        if let Some(drain) = self.drain.take() {
            drain.abort();
        }
    }

    /// Direct handle into the forwarding channel, for event sources that
    /// are not hub-backed.
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }
}

impl Drop for EventForwarder {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Normalize one fired event and publish it. Never unwinds: payloads that
/// do not convert publish with empty data, and publish failures are logged
/// and swallowed.
async fn forward_event(publisher: &dyn Publisher<EventMessage>, event: RaisedEvent) {
    let label = event.kind.label();
    let mut data = event.payload.into_map();

    let timestamp = match data.remove("timestamp").as_ref().and_then(epoch_seconds) {
        Some(ts) => ts,
        None => Utc::now().timestamp(),
    };

    let msg = EventMessage {
        timestamp,
        event_type: label.to_string(),
        data,
    };
    if let Err(e) = publisher.publish(&msg).await {
        warn!("failed to publish {} event from '{}': {}", label, event.source, e);
    }
}

fn epoch_seconds(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}
