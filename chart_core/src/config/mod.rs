pub mod chart_config;

pub use chart_config::{ChartConfig, ConfigWithCheck, IndicatorConfig};
