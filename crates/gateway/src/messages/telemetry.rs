//! One-way messages: events, notifications, log records, heartbeats

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A domain event normalized for the `events` topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    /// Epoch seconds; taken from the payload's own `timestamp` field when
    /// present, wall clock otherwise
    pub timestamp: i64,
    /// Label from the event kind table, `"Unknown"` outside it
    #[serde(rename = "type")]
    pub event_type: String,
    /// Remaining normalized payload fields
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// A log record formatted for the `log` topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Epoch seconds with sub-second precision
    pub timestamp: f64,
    /// Formatted record text
    pub msg: String,
    pub level_no: u8,
    pub level_name: String,
    pub logger_name: String,
}

/// Free-text operator notification for the `notify` topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyMessage {
    pub msg: String,
}

/// Periodic liveness signal for the `hb` topic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatMessage {
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_message_wire_field_is_type() {
        let mut data = Map::new();
        data.insert("amount".to_string(), json!(5));

        let msg = EventMessage {
            timestamp: 1000,
            event_type: "OrderFilled".to_string(),
            data,
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "OrderFilled");
        assert_eq!(json["timestamp"], 1000);
        assert_eq!(json["data"]["amount"], 5);
    }

    #[test]
    fn test_log_message_round_trip() {
        let msg = LogMessage {
            timestamp: 1_700_000_000.25,
            msg: "strategy - INFO - tick".to_string(),
            level_no: 20,
            level_name: "INFO".to_string(),
            logger_name: "strategy".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        let back: LogMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
