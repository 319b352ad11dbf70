//! Log sink: streams log records to the `log` topic
//!
//! `BusLogSink` implements [`log::Log`] but is explicitly constructed and
//! explicitly registered by the host (alone via `log::set_boxed_logger`,
//! or as one sink of a fan-out logger). The gateway never installs it
//! globally itself.
//!
//! Record emission must never fail: a record the sink cannot format,
//! enqueue, or publish is dropped silently so the logging delivery loop is
//! never interrupted. In particular the publishing task swallows transport
//! errors instead of logging them; logging must not feed back into logging.

use crate::messages::telemetry::LogMessage;
use crate::transport::Publisher;
use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Numeric levels on the conventional 10..40 scale remote consoles expect
fn level_no(level: Level) -> u8 {
    match level {
        Level::Error => 40,
        Level::Warn => 30,
        Level::Info => 20,
        Level::Debug | Level::Trace => 10,
    }
}

pub struct BusLogSink {
    tx: mpsc::UnboundedSender<LogMessage>,
    level: LevelFilter,
}

impl BusLogSink {
    /// Spawn the publishing task and return the sink.
    ///
    /// Must be called from within the gateway runtime.
    pub fn new(publisher: Arc<dyn Publisher<LogMessage>>, level: LevelFilter) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogMessage>();

        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let _ = publisher.publish(&msg).await;
            }
        });

        Self { tx, level }
    }

    /// Format one record and hand it to the publishing task. Never fails.
    pub fn emit(&self, record: &Record) {
        let msg = LogMessage {
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
            msg: format!(
                "{} - {} - {}",
                record.target(),
                record.level(),
                record.args()
            ),
            level_no: level_no(record.level()),
            level_name: record.level().to_string(),
            logger_name: record.target().to_string(),
        };
        let _ = self.tx.send(msg);
    }
}

impl log::Log for BusLogSink {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.emit(record);
        }
    }

    fn flush(&self) {}
}
