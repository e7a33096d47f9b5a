use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{enums::PriceMove, utils::fmt_thousands};
use crate::series::LatestPrice;

/// Headline price of the selected symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTicker {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub updated_at: String,
    /// Movement against the price shown before this refresh
    pub movement: PriceMove,
}

impl PriceTicker {
    pub fn new(latest: &LatestPrice, previous_price: Option<f64>) -> Self {
        Self {
            symbol: latest.symbol.clone(),
            price: latest.price,
            change_24h: latest.change_24h.unwrap_or(0.0),
            updated_at: latest.timestamp.clone(),
            movement: PriceMove::between(previous_price, latest.price),
        }
    }

    pub fn change_icon(&self) -> &'static str {
        if self.change_24h >= 0.0 {
            "📈"
        } else {
            "📉"
        }
    }
}

impl fmt::Display for PriceTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ${} {} {:.2}% (24h) [{}] updated {}",
            self.symbol,
            fmt_thousands(self.price, 2),
            self.change_icon(),
            self.change_24h.abs(),
            self.movement,
            self.updated_at
        )
    }
}
