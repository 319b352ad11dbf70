//! Integration test: Operator <-> Gateway <-> Application
//!
//! Drives the full bridge over the channel transport: commands in through
//! the operator requesters, events/notifications/logs/heartbeats out
//! through the operator subscribers.

use async_trait::async_trait;
use hbot_core::{
    AppError, AppResult, EventKind, EventPayload, MarketEventKind, Side, TradeRecord,
};
use hbot_gateway::{
    Application, BridgeConfig, ConnectionParams, EventHub, Gateway, StartOptions, StatusCode,
    Subscriber,
    messages::command::{
        BalanceLimitRequest, BalancePaperRequest, ConfigRequest, HistoryRequest, ImportRequest,
        StartRequest, StatusRequest, StopRequest,
    },
    transport::Requester,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for the running bot
struct StubApplication {
    markets: Vec<Arc<EventHub>>,
    calls: Mutex<Vec<String>>,
    fail_start: bool,
}

impl StubApplication {
    fn new() -> Self {
        Self {
            markets: vec![
                Arc::new(EventHub::new("binance")),
                Arc::new(EventHub::new("kucoin")),
            ],
            calls: Mutex::new(Vec::new()),
            fail_start: false,
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Application for StubApplication {
    fn instance_id(&self) -> &str {
        "itest-bot"
    }

    async fn start(&self, opts: StartOptions) -> AppResult<()> {
        if self.fail_start {
            return Err(AppError::command("another strategy is running"));
        }
        self.record(format!("start:{}", opts.script.as_deref().unwrap_or("-")));
        Ok(())
    }

    async fn stop(&self, skip_order_cancellation: bool) -> AppResult<()> {
        self.record(format!("stop:{}", skip_order_cancellation));
        Ok(())
    }

    async fn interactive_config(&self) -> AppResult<()> {
        self.record("interactive_config");
        Ok(())
    }

    fn configurable_keys(&self) -> Vec<String> {
        vec!["bid_spread".to_string(), "order_amount".to_string()]
    }

    async fn apply_config(&self, key: &str, value: &str) -> AppResult<()> {
        self.record(format!("apply:{}={}", key, value));
        Ok(())
    }

    async fn import_strategy(&self, config_file: &str) -> AppResult<()> {
        self.record(format!("import:{}", config_file));
        Ok(())
    }

    async fn notify(&self, text: &str) {
        self.record(format!("notify:{}", text));
    }

    async fn strategy_status(&self) -> AppResult<String> {
        Ok("\n  markets: 2\n  strategy: running\n".to_string())
    }

    async fn display_history(
        &self,
        days: f64,
        _verbose: bool,
        _precision: Option<u32>,
    ) -> AppResult<()> {
        self.record(format!("display_history:{}", days));
        Ok(())
    }

    async fn history_trades(&self, _days: f64) -> AppResult<Vec<TradeRecord>> {
        Ok(vec![TradeRecord::new(
            1_700_000_000,
            "binance",
            "BTC-USDT",
            Side::Buy,
            dec!(50000),
            dec!(0.25),
            "ord-7",
        )])
    }

    async fn balance_limit(
        &self,
        exchange: &str,
        asset: &str,
        amount: Decimal,
    ) -> AppResult<String> {
        Ok(format!("{}: {} limited to {}", exchange, asset, amount))
    }

    async fn balance_paper(&self, asset: &str, amount: Decimal) -> AppResult<String> {
        Ok(format!("paper {} = {}", asset, amount))
    }

    fn markets(&self) -> Vec<Arc<EventHub>> {
        self.markets.clone()
    }
}

#[derive(Serialize)]
struct FillEvent {
    order_id: String,
    amount: f64,
    timestamp: i64,
}

fn connect(app: Arc<StubApplication>) -> (Gateway, hbot_gateway::OperatorLink) {
    Gateway::connect(
        app,
        BridgeConfig {
            connection: ConnectionParams::default(),
            heartbeat_interval_ms: 50,
            ..BridgeConfig::default()
        },
    )
}

#[tokio::test]
async fn test_command_round_trip() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (gateway, link) = connect(app.clone());

    assert_eq!(gateway.topics().uid(), "itest-bot");
    assert_eq!(gateway.params().port, 1883);
    assert_eq!(link.start.topic(), "hbot/itest-bot/start");
    assert_eq!(link.balance_paper.topic(), "hbot/itest-bot/balance/paper");

    // start
    let response = link
        .start
        .request(&StartRequest {
            script: Some("pmm.py".to_string()),
            ..StartRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::Ok);

    // config applies allow-listed keys only
    let response = link
        .config
        .request(&ConfigRequest {
            params: vec![
                ("bid_spread".to_string(), "0.2".to_string()),
                ("not_a_key".to_string(), "x".to_string()),
            ],
        })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(
        response.changes,
        vec![("bid_spread".to_string(), "0.2".to_string())]
    );

    // status comes back trimmed
    let response = link.status.request(&StatusRequest::default()).await.unwrap();
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.data, "markets: 2\n  strategy: running");

    // history carries the window's fills
    let response = link
        .history
        .request(&HistoryRequest {
            days: 1.0,
            verbose: false,
            precision: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(response.trades.len(), 1);
    assert_eq!(response.trades[0].order_id, "ord-7");

    // balances
    let response = link
        .balance_limit
        .request(&BalanceLimitRequest {
            exchange: "binance".to_string(),
            asset: "BTC".to_string(),
            amount: dec!(2),
        })
        .await
        .unwrap();
    assert_eq!(response.data, "binance: BTC limited to 2");

    let response = link
        .balance_paper
        .request(&BalancePaperRequest {
            asset: "USDT".to_string(),
            amount: dec!(10000),
        })
        .await
        .unwrap();
    assert_eq!(response.data, "paper USDT = 10000");

    // import without a strategy name never reaches the app
    let response = link
        .import
        .request(&ImportRequest { strategy: None })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::Ok);

    // stop
    let response = link
        .stop
        .request(&StopRequest {
            skip_order_cancellation: false,
        })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::Ok);

    let calls = app.calls();
    assert!(calls.contains(&"start:pmm.py".to_string()));
    assert!(calls.contains(&"apply:bid_spread=0.2".to_string()));
    assert!(calls.contains(&"stop:false".to_string()));
    assert!(!calls.iter().any(|c| c.starts_with("import:")));
}

#[tokio::test]
async fn test_application_failure_is_contained() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication {
        fail_start: true,
        ..StubApplication::new()
    });
    let (_gateway, link) = connect(app);

    let response = link.start.request(&StartRequest::default()).await.unwrap();

    assert_eq!(response.status, StatusCode::Error);
    assert_eq!(response.msg, "another strategy is running");
}

#[tokio::test]
async fn test_market_event_reaches_the_operator() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (_gateway, mut link) = connect(app.clone());

    // fired from a foreign thread, as connectors do
    let hub = app.markets[0].clone();
    std::thread::spawn(move || {
        hub.fire(
            EventKind::Market(MarketEventKind::OrderFilled),
            EventPayload::record(&FillEvent {
                order_id: "ord-9".to_string(),
                amount: 0.5,
                timestamp: 1_700_000_500,
            }),
        );
    })
    .join()
    .unwrap();

    let msg = tokio::time::timeout(Duration::from_secs(1), link.events.next())
        .await
        .expect("timed out waiting for event")
        .unwrap();

    assert_eq!(msg.event_type, "OrderFilled");
    assert_eq!(msg.timestamp, 1_700_000_500);
    assert_eq!(msg.data.get("order_id"), Some(&json!("ord-9")));
    assert_eq!(msg.data.get("amount"), Some(&json!(0.5)));
    assert!(!msg.data.contains_key("timestamp"));
}

#[tokio::test]
async fn test_notifier_and_log_sink_publish() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (gateway, mut link) = connect(app);

    let notifier = gateway.notifier().expect("notifier enabled by default");
    notifier.send("maker order created").await.unwrap();
    let msg = tokio::time::timeout(Duration::from_secs(1), link.notify.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(msg.msg, "maker order created");

    let sink = gateway.log_sink(log::LevelFilter::Info);
    log::Log::log(
        &sink,
        &log::Record::builder()
            .level(log::Level::Info)
            .target("connector")
            .args(format_args!("order book synced"))
            .build(),
    );
    let msg = tokio::time::timeout(Duration::from_secs(1), link.log.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(msg.level_name, "INFO");
    assert_eq!(msg.logger_name, "connector");
    assert!(msg.msg.contains("order book synced"));
}

#[tokio::test]
async fn test_heartbeat_ticks() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (_gateway, mut link) = connect(app);

    let msg = tokio::time::timeout(Duration::from_secs(1), link.heartbeat.next())
        .await
        .expect("no heartbeat within a second")
        .unwrap();
    assert!(msg.timestamp > 0);
}

#[tokio::test]
async fn test_disabled_commands_close_the_topic() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (_gateway, link) = Gateway::connect(
        app,
        BridgeConfig {
            commands: false,
            ..BridgeConfig::default()
        },
    );

    assert!(link.start.request(&StartRequest::default()).await.is_err());
}

#[tokio::test]
async fn test_shutdown_detaches_event_listeners() {
    let _ = env_logger::try_init();
    let app = Arc::new(StubApplication::new());
    let (mut gateway, _link) = connect(app.clone());

    let filled = EventKind::Market(MarketEventKind::OrderFilled);
    for hub in &app.markets {
        assert_eq!(hub.listener_count(filled), 1);
    }

    gateway.shutdown();

    for hub in &app.markets {
        assert!(hub.is_empty());
    }
}
