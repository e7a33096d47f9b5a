use serde::{Deserialize, Serialize};
use std::fmt;

use crate::series::KLineBar;

/// Latest candle with its change against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub change: f64,
    pub change_pct: f64,
}

impl PriceInfo {
    /// `None` without bars. A single bar is compared with itself.
    pub fn from_bars(bars: &[KLineBar]) -> Option<Self> {
        let latest = bars.last()?;
        let previous = if bars.len() > 1 {
            &bars[bars.len() - 2]
        } else {
            latest
        };
        let change = latest.close - previous.close;
        Some(Self {
            close: latest.close,
            open: latest.open,
            high: latest.high,
            low: latest.low,
            volume: latest.volume,
            change,
            change_pct: change / previous.close * 100.0,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

impl fmt::Display for PriceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { "+" } else { "" };
        write!(
            f,
            "close {:.2} open {:.2} high {:.2} low {:.2} volume {:.2} change {}{:.2} ({:.2}%)",
            self.close,
            self.open,
            self.high,
            self.low,
            self.volume,
            sign,
            self.change,
            self.change_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::Time;

    fn bar(close: f64) -> KLineBar {
        KLineBar::new(Time::from_millis(0), close, close, close, close, 3.0)
    }

    #[test]
    fn test_change_vs_previous() {
        let info = PriceInfo::from_bars(&[bar(100.0), bar(95.0)]).unwrap();
        assert_eq!(info.change, -5.0);
        assert!((info.change_pct + 5.0).abs() < 1e-12);
        assert!(!info.is_positive());
        assert_eq!(
            info.to_string(),
            "close 95.00 open 95.00 high 95.00 low 95.00 volume 3.00 change -5.00 (-5.00%)"
        );
    }

    #[test]
    fn test_single_bar() {
        let info = PriceInfo::from_bars(&[bar(10.0)]).unwrap();
        assert_eq!(info.change, 0.0);
        assert!(info.is_positive());
        assert!(info.to_string().ends_with("change +0.00 (0.00%)"));
        assert!(PriceInfo::from_bars(&[]).is_none());
    }
}
