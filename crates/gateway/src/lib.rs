//! hbot Gateway
//!
//! Remote bridge for a running hbot instance. Exposes the application's
//! command surface and event stream over a publish/subscribe bus under a
//! per-instance topic namespace (`hbot/{uid}/...`). Provides:
//! - Transport abstraction (tokio channels, with traits for real buses)
//! - Wire message types for commands, events, notifications, and logs
//! - Command dispatch, event forwarding, notifier, and log sink components
//!
//! ## Architecture
//!
//! ```text
//!      Operator (remote console)
//!              │
//!              │ hbot/{uid}/start ... hbot/{uid}/balance/paper   (rpc)
//!              │ hbot/{uid}/events|notify|log|hb                 (pub/sub)
//!         ┌────▼────┐
//!         │ Gateway │  owns the connection, heartbeat, and components
//!         └────┬────┘
//!    ┌─────────┼──────────┬───────────┐
//! ┌──▼───┐ ┌───▼────┐ ┌───▼────┐ ┌────▼───┐
//! │ Cmds │ │ Events │ │ Notify │ │ LogSink│
//! └──┬───┘ └───▲────┘ └────────┘ └────────┘
//!    │ calls   │ fires
//! ┌──▼─────────┴──┐
//! │  Application  │  (port; the running bot)
//! └───────────────┘
//! ```
//!
//! ## Transport
//!
//! Currently uses tokio channels for single-process operation. The
//! `Publisher`/`Subscriber`/`Requester`/`Endpoint` traits are the seam
//! where a real bus client (MQTT, NATS, etc.) plugs in; connection
//! management, QoS, and wire serialization belong to that client, not here.

pub mod app;
pub mod commands;
pub mod error;
pub mod events;
pub mod gateway;
pub mod log_sink;
pub mod messages;
pub mod notifier;
pub mod transport;

// Re-export commonly used types
pub use app::{Application, StartOptions};
pub use commands::{CommandEndpoints, Commands};
pub use error::TransportError;
pub use events::{EventForwarder, EventHub, RaisedEvent};
pub use gateway::{BridgeConfig, Gateway, OperatorLink};
pub use log_sink::BusLogSink;
pub use messages::{
    command::{
        BalanceLimitRequest, BalanceLimitResponse, BalancePaperRequest, BalancePaperResponse,
        ConfigRequest, ConfigResponse, HistoryRequest, HistoryResponse, ImportRequest,
        ImportResponse, StartRequest, StartResponse, StatusCode, StatusRequest, StatusResponse,
        StopRequest, StopResponse,
    },
    telemetry::{EventMessage, HeartbeatMessage, LogMessage, NotifyMessage},
};
pub use notifier::Notifier;
pub use transport::{
    ConnectionParams, Endpoint, Publisher, Requester, Subscriber, Topics,
    channel::{ChannelEndpoint, ChannelPublisher, ChannelRequester, ChannelSubscriber, rpc_pair},
};
