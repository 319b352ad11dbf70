//! Gateway: owns the connection, the heartbeat, and the bridge components
//!
//! Constructed once per application run. Connection parameters are
//! resolved at construction and held for the gateway's lifetime; each
//! component registers exactly once, gated by its toggle.

use crate::app::Application;
use crate::commands::{CommandEndpoints, Commands};
use crate::events::EventForwarder;
use crate::log_sink::BusLogSink;
use crate::messages::command::{
    BalanceLimitRequest, BalanceLimitResponse, BalancePaperRequest, BalancePaperResponse,
    ConfigRequest, ConfigResponse, HistoryRequest, HistoryResponse, ImportRequest, ImportResponse,
    StartRequest, StartResponse, StatusRequest, StatusResponse, StopRequest, StopResponse,
};
use crate::messages::telemetry::{EventMessage, HeartbeatMessage, LogMessage, NotifyMessage};
use crate::notifier::Notifier;
use crate::transport::channel::{ChannelPublisher, ChannelRequester, ChannelSubscriber, rpc_pair};
use crate::transport::{ConnectionParams, Publisher, Topics};
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const RPC_CAPACITY: usize = 16;
const EVENT_CAPACITY: usize = 256;
const LOG_CAPACITY: usize = 256;
const NOTIFY_CAPACITY: usize = 64;
const HEARTBEAT_CAPACITY: usize = 16;

/// Bridge configuration: connection parameters, component toggles, and the
/// heartbeat period
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub connection: ConnectionParams,
    /// Serve remote commands
    pub commands: bool,
    /// Forward domain events
    pub events: bool,
    /// Publish operator notifications
    pub notifier: bool,
    pub heartbeat_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionParams::default(),
            commands: true,
            events: true,
            notifier: true,
            heartbeat_interval_ms: 10_000,
        }
    }
}

/// Operator-side handles over the in-process transport: one requester per
/// command topic, one subscriber per one-way topic. A remote console - or
/// a test - drives the gateway through these.
pub struct OperatorLink {
    pub start: ChannelRequester<StartRequest, StartResponse>,
    pub stop: ChannelRequester<StopRequest, StopResponse>,
    pub config: ChannelRequester<ConfigRequest, ConfigResponse>,
    pub import: ChannelRequester<ImportRequest, ImportResponse>,
    pub status: ChannelRequester<StatusRequest, StatusResponse>,
    pub history: ChannelRequester<HistoryRequest, HistoryResponse>,
    pub balance_limit: ChannelRequester<BalanceLimitRequest, BalanceLimitResponse>,
    pub balance_paper: ChannelRequester<BalancePaperRequest, BalancePaperResponse>,
    pub events: ChannelSubscriber<EventMessage>,
    pub notify: ChannelSubscriber<NotifyMessage>,
    pub log: ChannelSubscriber<LogMessage>,
    pub heartbeat: ChannelSubscriber<HeartbeatMessage>,
}

/// Owns the bus-facing side of the bridge
pub struct Gateway {
    topics: Topics,
    params: ConnectionParams,
    commands: Option<Commands>,
    forwarder: Option<EventForwarder>,
    notifier: Option<Arc<Notifier>>,
    log_publisher: Arc<dyn Publisher<LogMessage>>,
    heartbeat: Option<JoinHandle<()>>,
}

impl Gateway {
    /// Build the bridge over the in-process channel transport and return
    /// it together with the operator-side handles.
    ///
    /// Must be called from within the gateway runtime: component tasks are
    /// spawned here.
    pub fn connect(app: Arc<dyn Application>, config: BridgeConfig) -> (Self, OperatorLink) {
        let topics = Topics::new(app.instance_id());
        let params = config.connection.clone();
        info!(
            "connecting node '{}' to {}:{} (ssl: {})",
            topics.node_name(),
            params.host,
            params.port,
            params.ssl
        );

        let (start_rq, start_ep) = rpc_pair(topics.start(), RPC_CAPACITY);
        let (stop_rq, stop_ep) = rpc_pair(topics.stop(), RPC_CAPACITY);
        let (config_rq, config_ep) = rpc_pair(topics.config(), RPC_CAPACITY);
        let (import_rq, import_ep) = rpc_pair(topics.import(), RPC_CAPACITY);
        let (status_rq, status_ep) = rpc_pair(topics.status(), RPC_CAPACITY);
        let (history_rq, history_ep) = rpc_pair(topics.history(), RPC_CAPACITY);
        let (balance_limit_rq, balance_limit_ep) = rpc_pair(topics.balance_limit(), RPC_CAPACITY);
        let (balance_paper_rq, balance_paper_ep) = rpc_pair(topics.balance_paper(), RPC_CAPACITY);

        let commands = config.commands.then(|| {
            info!("starting remote commands");
            Commands::attach(
                app.clone(),
                CommandEndpoints {
                    start: Box::new(start_ep),
                    stop: Box::new(stop_ep),
                    config: Box::new(config_ep),
                    import: Box::new(import_ep),
                    status: Box::new(status_ep),
                    history: Box::new(history_ep),
                    balance_limit: Box::new(balance_limit_ep),
                    balance_paper: Box::new(balance_paper_ep),
                },
            )
        });

        let (event_pub, event_sub) = ChannelPublisher::pair(topics.events(), EVENT_CAPACITY);
        let forwarder = config.events.then(|| {
            info!("starting remote events");
            EventForwarder::attach(Arc::new(event_pub), app.markets(), app.app_events())
        });

        let (notify_pub, notify_sub) = ChannelPublisher::pair(topics.notify(), NOTIFY_CAPACITY);
        let notifier = config.notifier.then(|| {
            info!("starting remote notifier");
            Arc::new(Notifier::new(Arc::new(notify_pub)))
        });

        let (log_pub, log_sub) = ChannelPublisher::pair(topics.log(), LOG_CAPACITY);
        let log_publisher: Arc<dyn Publisher<LogMessage>> = Arc::new(log_pub);

        let (hb_pub, hb_sub) = ChannelPublisher::pair(topics.heartbeat(), HEARTBEAT_CAPACITY);
        let heartbeat = spawn_heartbeat(
            Arc::new(hb_pub),
            Duration::from_millis(config.heartbeat_interval_ms),
        );

        let gateway = Self {
            topics,
            params,
            commands,
            forwarder,
            notifier,
            log_publisher,
            heartbeat: Some(heartbeat),
        };
        let link = OperatorLink {
            start: start_rq,
            stop: stop_rq,
            config: config_rq,
            import: import_rq,
            status: status_rq,
            history: history_rq,
            balance_limit: balance_limit_rq,
            balance_paper: balance_paper_rq,
            events: event_sub,
            notify: notify_sub,
            log: log_sub,
            heartbeat: hb_sub,
        };
        (gateway, link)
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// The notifier, when its toggle was on
    pub fn notifier(&self) -> Option<Arc<Notifier>> {
        self.notifier.clone()
    }

    /// Build a log sink publishing on this instance's `log` topic. The
    /// host registers it with the logging system explicitly; constructing
    /// it has no global effect.
    pub fn log_sink(&self, level: log::LevelFilter) -> BusLogSink {
        BusLogSink::new(self.log_publisher.clone(), level)
    }

    /// Tear down every registration this gateway made. Safe to call more
    /// than once; also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(mut commands) = self.commands.take() {
            commands.detach();
        }
        if let Some(mut forwarder) = self.forwarder.take() {
            forwarder.detach();
        }
        if let Some(heartbeat) = self.heartbeat.take() {
            heartbeat.abort();
        }
        debug!("gateway '{}' shut down", self.topics.node_name());
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_heartbeat(
    publisher: Arc<dyn Publisher<HeartbeatMessage>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let msg = HeartbeatMessage {
                timestamp: Utc::now().timestamp(),
            };
            if let Err(e) = publisher.publish(&msg).await {
                debug!("heartbeat publish failed: {}", e);
            }
        }
    })
}
