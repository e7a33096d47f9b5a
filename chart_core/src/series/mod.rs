pub mod chart_data;
pub mod kline_bar;
pub mod records;

pub use chart_data::{build_chart_data, ChartData};
pub use kline_bar::KLineBar;
pub use records::{LatestPrice, OhlcvRecord, PriceRecord, VolatilityRecord, VolumeRecord};
