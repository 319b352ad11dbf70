//! Tokio channel transport for single-process mode
//!
//! Broadcast channels carry the one-way topics (events, notify, log, hb);
//! an mpsc/oneshot pair carries each request/response topic. Messages are
//! passed directly with no serialization overhead, which is why this
//! transport is also what the tests run against.

use crate::error::TransportError;
use crate::transport::{Endpoint, Publisher, ReplyTo, Requester, Subscriber};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Channel-based publisher using broadcast
pub struct ChannelPublisher<M> {
    topic: String,
    tx: broadcast::Sender<M>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a publisher/subscriber pair for a topic with given capacity
    pub fn pair(topic: impl Into<String>, capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let (tx, rx) = broadcast::channel(capacity);
        (
            Self {
                topic: topic.into(),
                tx: tx.clone(),
            },
            ChannelSubscriber { rx, _tx: tx },
        )
    }

    /// Topic this publisher is bound to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Get another subscriber for this publisher's topic
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            _tx: self.tx.clone(),
        }
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.tx
            .send(msg.clone())
            .map_err(|_| TransportError::ChannelClosed)?;
        Ok(())
    }
}

/// Channel-based subscriber using a broadcast receiver
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<M>,
    // Keep sender alive to prevent channel from closing
    _tx: broadcast::Sender<M>,
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Ok(msg),
                // Skip lagged messages and continue
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            // Caller can retry after a lag
            Err(broadcast::error::TryRecvError::Lagged(_)) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(TransportError::ChannelClosed),
        }
    }
}

/// In-flight request paired with its reply slot
struct PendingRequest<Req, Res> {
    request: Req,
    reply_tx: ReplyTo<Res>,
}

/// Create a requester/endpoint pair for one request/response topic
pub fn rpc_pair<Req, Res>(
    topic: impl Into<String>,
    capacity: usize,
) -> (ChannelRequester<Req, Res>, ChannelEndpoint<Req, Res>)
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    let topic = topic.into();
    let (tx, rx) = mpsc::channel(capacity);
    (
        ChannelRequester {
            topic: topic.clone(),
            tx,
        },
        ChannelEndpoint { topic, rx },
    )
}

/// Channel-based requester (operator side of request/response)
pub struct ChannelRequester<Req, Res> {
    topic: String,
    tx: mpsc::Sender<PendingRequest<Req, Res>>,
}

impl<Req, Res> ChannelRequester<Req, Res> {
    /// Topic this requester is bound to
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl<Req, Res> Requester<Req, Res> for ChannelRequester<Req, Res>
where
    Req: Serialize + Clone + Send + Sync + 'static,
    Res: DeserializeOwned + Send + 'static,
{
    async fn request(&self, req: &Req) -> Result<Res, TransportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                request: req.clone(),
                reply_tx,
            })
            .await
            .map_err(|_| TransportError::ChannelClosed)?;

        reply_rx.await.map_err(|_| TransportError::ChannelClosed)
    }
}

/// Channel-based endpoint (serving side of request/response)
pub struct ChannelEndpoint<Req, Res> {
    topic: String,
    rx: mpsc::Receiver<PendingRequest<Req, Res>>,
}

impl<Req, Res> ChannelEndpoint<Req, Res> {
    /// Topic this endpoint serves
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl<Req, Res> Endpoint<Req, Res> for ChannelEndpoint<Req, Res>
where
    Req: DeserializeOwned + Send + 'static,
    Res: Serialize + Send + 'static,
{
    async fn next(&mut self) -> Option<(Req, ReplyTo<Res>)> {
        self.rx.recv().await.map(|p| (p.request, p.reply_tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pubsub() {
        let (publisher, mut subscriber) = ChannelPublisher::<String>::pair("t/pub", 10);

        publisher.publish(&"hello".to_string()).await.unwrap();

        let msg = subscriber.next().await.unwrap();
        assert_eq!(msg, "hello");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let (publisher, mut sub1) = ChannelPublisher::<i32>::pair("t/multi", 10);
        let mut sub2 = publisher.subscribe();

        publisher.publish(&42).await.unwrap();

        assert_eq!(sub1.next().await.unwrap(), 42);
        assert_eq!(sub2.next().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_request_response() {
        let (requester, mut endpoint) = rpc_pair::<String, String>("t/rpc", 10);

        let handle = tokio::spawn(async move {
            if let Some((req, reply_tx)) = endpoint.next().await {
                let _ = reply_tx.send(format!("Echo: {}", req));
            }
        });

        let response = requester.request(&"test".to_string()).await.unwrap();
        assert_eq!(response, "Echo: test");

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_against_torn_down_endpoint() {
        let (requester, endpoint) = rpc_pair::<String, String>("t/gone", 10);
        drop(endpoint);

        let err = requester.request(&"test".to_string()).await.unwrap_err();
        assert!(matches!(err, TransportError::ChannelClosed));
    }
}
