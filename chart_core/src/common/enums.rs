use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Side of the reference line a value falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
}

impl Side {
    /// Ties go to `Above`.
    pub fn classify(value: f64, reference: f64) -> Self {
        if value >= reference {
            Side::Above
        } else {
            Side::Below
        }
    }
}

/// Chart timeframe as accepted by the chart endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Minute,
    #[default]
    Hour,
    Day,
}

/// Direction of a price update relative to the previously shown price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PriceMove {
    Up,
    Down,
    Unchanged,
}

impl PriceMove {
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        match previous {
            Some(prev) if current > prev => PriceMove::Up,
            Some(prev) if current < prev => PriceMove::Down,
            _ => PriceMove::Unchanged,
        }
    }
}

/// Chart panels rendered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Price,
    Volume,
    Volatility,
}

/// Periodic refresh kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Refresh {
    Prices,
    Charts,
}
