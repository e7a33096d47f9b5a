pub mod boll;
pub mod ema;
pub mod indicator_set;
pub mod kdj;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod volatility;

pub use indicator_set::{BollingerColumns, Column, IndicatorColumns, KdjColumns};
