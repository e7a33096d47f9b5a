pub mod context;
pub mod view;

pub use context::RenderContext;
pub use view::{ChartView, PanelBody, PanelView};
