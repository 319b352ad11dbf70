//! Operator notifications
//!
//! Fire-and-forget free text on the `notify` topic. No buffering and no
//! retry; a publish failure surfaces to the caller, whose policy it is.

use crate::error::TransportError;
use crate::messages::telemetry::NotifyMessage;
use crate::transport::Publisher;
use std::sync::Arc;

pub struct Notifier {
    publisher: Arc<dyn Publisher<NotifyMessage>>,
}

impl Notifier {
    pub fn new(publisher: Arc<dyn Publisher<NotifyMessage>>) -> Self {
        Self { publisher }
    }

    pub async fn send(&self, text: impl Into<String>) -> Result<(), TransportError> {
        self.publisher
            .publish(&NotifyMessage { msg: text.into() })
            .await
    }

    /// Lifecycle hook; the publisher's lifetime is tied to the connection,
    /// so there is nothing to do.
    pub fn start(&self) {}

    /// See [`Notifier::start`].
    pub fn stop(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Subscriber;
    use crate::transport::channel::ChannelPublisher;

    #[tokio::test]
    async fn test_send_publishes_the_text() {
        let (publisher, mut sub) = ChannelPublisher::pair("t/notify", 8);
        let notifier = Notifier::new(Arc::new(publisher));

        notifier.send("filled 0.5 BTC @ 50000").await.unwrap();

        let msg = sub.next().await.unwrap();
        assert_eq!(msg.msg, "filled 0.5 BTC @ 50000");
    }

    #[tokio::test]
    async fn test_send_surfaces_publish_failure() {
        let (publisher, sub) = ChannelPublisher::<NotifyMessage>::pair("t/notify", 8);
        drop(sub);
        let notifier = Notifier::new(Arc::new(publisher));

        assert!(notifier.send("lost").await.is_err());
    }
}
