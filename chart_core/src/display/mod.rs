pub mod chart_stats;
pub mod indicator_panel;
pub mod price_info;
pub mod ticker;
pub mod volume_bars;

pub use chart_stats::{ChartStats, StatField};
pub use indicator_panel::IndicatorPanel;
pub use price_info::PriceInfo;
pub use ticker::PriceTicker;
pub use volume_bars::{classify_bars, VolumeBar};
