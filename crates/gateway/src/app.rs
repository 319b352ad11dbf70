//! Application port
//!
//! The gateway's view of the running bot. Every delegated operation
//! returns an explicit `AppResult` so the command dispatcher can contain a
//! failure with a pattern match; the application never panics across this
//! boundary.

use crate::events::EventHub;
use async_trait::async_trait;
use hbot_core::{AppResult, TradeRecord};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Options forwarded by the start command
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub log_level: Option<String>,
    pub restore: bool,
    pub script: Option<String>,
    pub is_quickstart: bool,
}

/// Operations the gateway delegates to the running application
#[async_trait]
pub trait Application: Send + Sync {
    /// Stable identifier embedded in every topic name
    fn instance_id(&self) -> &str;

    async fn start(&self, opts: StartOptions) -> AppResult<()>;

    async fn stop(&self, skip_order_cancellation: bool) -> AppResult<()>;

    /// Prompt-driven configuration flow, used when no parameters are given
    async fn interactive_config(&self) -> AppResult<()>;

    /// Allow-list of keys the config command may touch
    fn configurable_keys(&self) -> Vec<String>;

    async fn apply_config(&self, key: &str, value: &str) -> AppResult<()>;

    /// Import a strategy from its config file name (`{strategy}.yml`)
    async fn import_strategy(&self, config_file: &str) -> AppResult<()>;

    /// The application's own notification path (terminal, other bridges).
    /// Infallible by contract: a notification that cannot be delivered is
    /// dropped by the application, not reported back.
    async fn notify(&self, text: &str);

    /// Compute the current strategy status text
    async fn strategy_status(&self) -> AppResult<String>;

    /// Render history to the application's own output for the given window
    async fn display_history(
        &self,
        days: f64,
        verbose: bool,
        precision: Option<u32>,
    ) -> AppResult<()>;

    /// Fills within the given window, newest last
    async fn history_trades(&self, days: f64) -> AppResult<Vec<TradeRecord>>;

    async fn balance_limit(
        &self,
        exchange: &str,
        asset: &str,
        amount: Decimal,
    ) -> AppResult<String>;

    async fn balance_paper(&self, asset: &str, amount: Decimal) -> AppResult<String>;

    /// Event hubs of the currently connected markets/connectors
    fn markets(&self) -> Vec<Arc<EventHub>>;

    /// Application-level event hub, if the application exposes one
    fn app_events(&self) -> Option<Arc<EventHub>> {
        None
    }
}
