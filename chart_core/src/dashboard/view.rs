use serde::{Deserialize, Serialize};

use crate::common::enums::{Panel, Timeframe};
use crate::display::{classify_bars, ChartStats, StatField, VolumeBar};
use crate::segment::{
    reference::{reference_line, series_mean},
    sample::values,
    split, Point, SegmentPair, Sample,
};

/// What a panel draws besides its reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelBody {
    /// Two line series meeting on the reference line
    Line(SegmentPair),
    /// Bars colored by side of the reference
    Bars { bars: Vec<VolumeBar> },
}

/// Everything one chart panel needs for a refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub panel: Panel,
    pub reference: f64,
    pub reference_line: Vec<Point>,
    pub stats: ChartStats,
    /// Stats that differ from the previous refresh of this panel
    pub changed: Vec<StatField>,
    pub body: PanelBody,
}

impl PanelView {
    /// `None` when the series carries no values
    pub fn build(
        panel: Panel,
        series: &[Sample],
        previous: Option<&ChartStats>,
    ) -> Option<Self> {
        let reference = series_mean(series)?;
        let stats = ChartStats::new(&values(series), reference)?;
        let body = match panel {
            Panel::Volume => PanelBody::Bars {
                bars: classify_bars(series, reference),
            },
            Panel::Price | Panel::Volatility => PanelBody::Line(split(series, reference)),
        };
        Some(Self {
            panel,
            reference,
            reference_line: reference_line(series, reference),
            changed: stats.changed_fields(previous),
            stats,
            body,
        })
    }
}

/// One chart refresh of the selected symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub panels: Vec<PanelView>,
}

impl ChartView {
    pub fn panel(&self, panel: Panel) -> Option<&PanelView> {
        self.panels.iter().find(|p| p.panel == panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::enums::Side;

    #[test]
    fn test_line_panel() {
        let series = vec![Sample::new(0.0, 10.0), Sample::new(1.0, 20.0), Sample::new(2.0, 5.0)];
        let view = PanelView::build(Panel::Price, &series, None).unwrap();
        assert!((view.reference - 35.0 / 3.0).abs() < 1e-12);
        assert_eq!(view.reference_line.len(), 3);
        assert_eq!(view.stats.side, Side::Below);
        match &view.body {
            PanelBody::Line(pair) => assert_eq!(pair.len(), 5),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_bar_panel() {
        let series = vec![Sample::new(0.0, 1.0), Sample::new(1.0, 3.0)];
        let view = PanelView::build(Panel::Volume, &series, None).unwrap();
        match &view.body {
            PanelBody::Bars { bars } => {
                assert_eq!(bars[0].side, Side::Below);
                assert_eq!(bars[1].side, Side::Above);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_empty_series() {
        assert!(PanelView::build(Panel::Price, &[], None).is_none());
    }

    #[test]
    fn test_body_json_shape() {
        let body = PanelBody::Bars { bars: Vec::new() };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "bars");
    }
}
