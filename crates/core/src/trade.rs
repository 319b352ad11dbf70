use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// A completed fill as reported in the history payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Fill time, epoch seconds
    pub timestamp: i64,
    /// Connector the fill happened on
    pub market: String,
    /// Trading pair, e.g. `BTC-USDT`
    pub symbol: String,
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    /// Client order id the fill belongs to
    pub order_id: String,
}

impl TradeRecord {
    pub fn new(
        timestamp: i64,
        market: impl Into<String>,
        symbol: impl Into<String>,
        side: Side,
        price: Decimal,
        amount: Decimal,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            market: market.into(),
            symbol: symbol.into(),
            side,
            price,
            amount,
            order_id: order_id.into(),
        }
    }

    /// Notional value of the fill (price * amount).
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}
