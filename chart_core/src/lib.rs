pub mod common;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod math;
pub mod segment;
pub mod series;
pub mod wire;

pub use common::chart_error::{ChartError, ErrCode};
pub use config::ChartConfig;
pub use dashboard::RenderContext;
pub use segment::{intersect, split, Sample, SegmentPair};
