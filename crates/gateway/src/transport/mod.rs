//! Transport abstraction layer
//!
//! Unified traits for message passing, implemented here with tokio
//! channels. A real bus client (MQTT, NATS, etc.) implements the same
//! traits; everything above this module is transport-agnostic. The bus
//! client owns connection establishment, reconnection, QoS, and wire
//! serialization.

pub mod channel;
pub mod config;

pub use config::{ConnectionParams, Topics};

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::oneshot;

/// Reply slot handed out with each inbound request; sending it completes
/// the request/response exchange.
pub type ReplyTo<Res> = oneshot::Sender<Res>;

/// Publisher - sends messages to a fixed topic
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Publish a message
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;
}

/// Subscriber - receives messages from a topic
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}

/// Requester - the operator side of a request/response topic pair
#[async_trait]
pub trait Requester<Req, Res>: Send + Sync
where
    Req: Serialize + Send + Sync,
    Res: DeserializeOwned + Send,
{
    /// Send a request and wait for the correlated response
    async fn request(&self, req: &Req) -> Result<Res, TransportError>;
}

/// Endpoint - the serving side of a request/response topic pair
///
/// The bus client correlates each inbound request with exactly one
/// response; the endpoint surfaces that as a `(request, reply slot)` pair.
#[async_trait]
pub trait Endpoint<Req, Res>: Send
where
    Req: DeserializeOwned + Send,
    Res: Serialize + Send,
{
    /// Wait for the next inbound request. `None` means the topic was torn
    /// down and no further requests will arrive.
    async fn next(&mut self) -> Option<(Req, ReplyTo<Res>)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure traits are object-safe
    fn _assert_publisher_object_safe(_: &dyn Publisher<String>) {}
    fn _assert_subscriber_object_safe(_: &mut dyn Subscriber<String>) {}
    fn _assert_requester_object_safe(_: &dyn Requester<String, String>) {}
    fn _assert_endpoint_object_safe(_: &mut dyn Endpoint<String, String>) {}
}
