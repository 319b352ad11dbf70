//! Error types for the gateway crate

use thiserror::Error;

/// Transport-level errors
///
/// Connection recovery is the bus client's concern; these only report what
/// a publish/request call observed.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Channel closed")]
    ChannelClosed,

    #[error("Timeout waiting for response")]
    Timeout,
}
