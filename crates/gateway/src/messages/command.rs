//! Command request/response pairs
//!
//! One pair per command topic. Every response carries a `status`/`msg`
//! head; payload fields stay at their defaults unless the command
//! succeeded (config is the one exception, see `ConfigResponse::changes`).

use hbot_core::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response status. `Ok` serializes as 200, `Error` as 400 - the numeric
/// codes remote consoles already key on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum StatusCode {
    #[default]
    Ok,
    Error,
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> u16 {
        match code {
            StatusCode::Ok => 200,
            StatusCode::Error => 400,
        }
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, String> {
        match code {
            200 => Ok(StatusCode::Ok),
            400 => Ok(StatusCode::Error),
            other => Err(format!("unknown status code: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub restore: bool,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub is_quickstart: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
}

impl StartResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopRequest {
    #[serde(default)]
    pub skip_order_cancellation: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
}

impl StopResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRequest {
    /// `(key, value)` pairs, applied in order. Empty triggers the
    /// interactive configuration flow.
    #[serde(default)]
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
    /// Allow-listed pairs accepted for application, in request order. On
    /// failure this retains everything accumulated up to and including the
    /// pair whose application failed.
    #[serde(default)]
    pub changes: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
}

impl ImportResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
    /// Trimmed strategy status text
    #[serde(default)]
    pub data: String,
}

impl StatusResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
            data: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Window to report, in days back from now
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub precision: Option<u32>,
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self {
            days: 0.0,
            verbose: false,
            precision: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

impl HistoryResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
            trades: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceLimitRequest {
    pub exchange: String,
    pub asset: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceLimitResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: String,
}

impl BalanceLimitResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
            data: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancePaperRequest {
    pub asset: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalancePaperResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: String,
}

impl BalancePaperResponse {
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Error,
            msg: msg.into(),
            data: String::new(),
        }
    }
}
