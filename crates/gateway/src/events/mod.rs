//! Event bridge: in-process domain events out to the bus
//!
//! Markets/connectors fire events from arbitrary threads into per-connector
//! hubs; the forwarder funnels everything through one channel into a single
//! publishing task, so all bus publication happens on the owning context.

pub mod forwarder;
pub mod hub;

pub use forwarder::EventForwarder;
pub use hub::{EventHub, EventSender, ListenerId, RaisedEvent};
