//! Event kinds raised by markets/connectors, and their wire labels.
//!
//! The market event set is closed: connectors only ever raise the kinds
//! listed here, and each kind maps to a stable human-readable label that
//! remote consumers key on. Application-level event codes are an open
//! numeric space with no labels assigned yet.

/// Order/trade lifecycle and liquidity/position events raised by a
/// market/connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketEventKind {
    BuyOrderCreated,
    BuyOrderCompleted,
    SellOrderCreated,
    SellOrderCompleted,
    OrderFilled,
    OrderCancelled,
    OrderExpired,
    OrderFailure,
    FundingPaymentCompleted,
    RangePositionLiquidityAdded,
    RangePositionLiquidityRemoved,
    RangePositionUpdate,
    RangePositionUpdateFailure,
    RangePositionFeeCollected,
    RangePositionClosed,
}

impl MarketEventKind {
    /// The full closed set, in registration order.
    pub const ALL: [MarketEventKind; 15] = [
        MarketEventKind::BuyOrderCreated,
        MarketEventKind::BuyOrderCompleted,
        MarketEventKind::SellOrderCreated,
        MarketEventKind::SellOrderCompleted,
        MarketEventKind::OrderFilled,
        MarketEventKind::OrderCancelled,
        MarketEventKind::OrderExpired,
        MarketEventKind::OrderFailure,
        MarketEventKind::FundingPaymentCompleted,
        MarketEventKind::RangePositionLiquidityAdded,
        MarketEventKind::RangePositionLiquidityRemoved,
        MarketEventKind::RangePositionUpdate,
        MarketEventKind::RangePositionUpdateFailure,
        MarketEventKind::RangePositionFeeCollected,
        MarketEventKind::RangePositionClosed,
    ];

    /// Wire label for this kind. Part of the remote contract.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BuyOrderCreated => "BuyOrderCreated",
            Self::BuyOrderCompleted => "BuyOrderCompleted",
            Self::SellOrderCreated => "SellOrderCreated",
            Self::SellOrderCompleted => "SellOrderCompleted",
            Self::OrderFilled => "OrderFilled",
            Self::OrderCancelled => "OrderCancelled",
            Self::OrderExpired => "OrderExpired",
            Self::OrderFailure => "OrderFailure",
            Self::FundingPaymentCompleted => "FundingPaymentCompleted",
            Self::RangePositionLiquidityAdded => "RangePositionLiquidityAdded",
            Self::RangePositionLiquidityRemoved => "RangePositionLiquidityRemoved",
            Self::RangePositionUpdate => "RangePositionUpdate",
            Self::RangePositionUpdateFailure => "RangePositionUpdateFailure",
            Self::RangePositionFeeCollected => "RangePositionFeeCollected",
            Self::RangePositionClosed => "RangePositionClosed",
        }
    }
}

/// Any event identifier the forwarder can be asked to bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A kind from the closed market/connector table.
    Market(MarketEventKind),
    /// Application-defined event code; none are mapped to labels yet.
    App(u16),
}

impl EventKind {
    /// Wire label. Identifiers outside the closed table map to `"Unknown"`.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Market(kind) => kind.label(),
            EventKind::App(_) => "Unknown",
        }
    }
}

impl From<MarketEventKind> for EventKind {
    fn from(kind: MarketEventKind) -> Self {
        EventKind::Market(kind)
    }
}
