//! Wire message types for the remote bridge
//!
//! Field names here are part of the remote contract and must stay stable
//! for client compatibility. How the bytes travel is the bus client's
//! concern; these types only fix the shapes.

pub mod command;
pub mod telemetry;

pub use command::{
    BalanceLimitRequest, BalanceLimitResponse, BalancePaperRequest, BalancePaperResponse,
    ConfigRequest, ConfigResponse, HistoryRequest, HistoryResponse, ImportRequest, ImportResponse,
    StartRequest, StartResponse, StatusCode, StatusRequest, StatusResponse, StopRequest,
    StopResponse,
};
pub use telemetry::{EventMessage, HeartbeatMessage, LogMessage, NotifyMessage};
