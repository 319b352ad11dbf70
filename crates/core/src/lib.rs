//! hbot Core Domain
//!
//! Pure domain types for the hbot remote bridge.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! The bridge itself (bus transport, command dispatch, event forwarding)
//! lives in `hbot-gateway`; this crate only defines what flows through it:
//! event kinds and their wire labels, the payload shapes an event can carry,
//! trade records, and the application-side failure type.

pub mod error;
pub mod events;
pub mod payload;
pub mod trade;

// Re-export commonly used types at crate root
pub use error::{AppError, AppResult};
pub use events::{EventKind, MarketEventKind};
pub use payload::EventPayload;
pub use trade::{Side, TradeRecord};
