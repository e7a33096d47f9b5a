use serde::{Deserialize, Serialize};

use crate::common::chart_error::{ChartError, ErrCode};
use crate::common::time::Time;

/// On the wire a bar is `[timestamp_ms, open, high, low, close, volume]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawBar(f64, f64, f64, f64, f64, f64);

/// One candle of the k-line endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBar", into = "RawBar")]
pub struct KLineBar {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<RawBar> for KLineBar {
    fn from(raw: RawBar) -> Self {
        Self {
            time: Time::from_millis(raw.0 as i64),
            open: raw.1,
            high: raw.2,
            low: raw.3,
            close: raw.4,
            volume: raw.5,
        }
    }
}

impl From<KLineBar> for RawBar {
    fn from(bar: KLineBar) -> Self {
        RawBar(
            bar.time.millis as f64,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
        )
    }
}

impl KLineBar {
    pub fn new(time: Time, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Fails when high/low do not bound open and close, or a price is negative.
    /// With `autofix` the bounds are widened instead.
    pub fn check(&mut self, autofix: bool) -> Result<(), ChartError> {
        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if !(min_price.is_finite() && max_price.is_finite() && self.volume.is_finite()) {
            return Err(ChartError::new(
                format!("{} bar has non-finite values", self.time),
                ErrCode::KlDataInvalid,
            ));
        }
        if min_price < 0.0 {
            return Err(ChartError::new(
                format!("{} price={} is below zero", self.time, min_price),
                ErrCode::PriceBelowZero,
            ));
        }

        if self.low > min_price {
            if autofix {
                self.low = min_price;
            } else {
                return Err(ChartError::new(
                    format!(
                        "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.time, self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                self.high = max_price;
            } else {
                return Err(ChartError::new(
                    format!(
                        "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.time, self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_json() {
        let bar: KLineBar =
            serde_json::from_str("[1704067200000, 100.0, 110.0, 95.0, 105.0, 12.5]").unwrap();
        assert_eq!(bar.time.millis, 1_704_067_200_000);
        assert_eq!(bar.high, 110.0);
        assert_eq!(bar.close, 105.0);
        assert_eq!(bar.volume, 12.5);

        let json = serde_json::to_string(&bar).unwrap();
        assert_eq!(json, "[1704067200000.0,100.0,110.0,95.0,105.0,12.5]");
    }

    #[test]
    fn test_short_array_rejected() {
        assert!(serde_json::from_str::<KLineBar>("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_check() {
        let t = Time::from_millis(0);
        let mut ok = KLineBar::new(t, 10.0, 12.0, 9.0, 11.0, 1.0);
        ok.check(false).unwrap();

        let mut bad = KLineBar::new(t, 10.0, 10.5, 9.0, 11.0, 1.0);
        assert_eq!(bad.check(false).unwrap_err().errcode, ErrCode::KlDataInvalid);
        bad.check(true).unwrap();
        assert_eq!(bad.high, 11.0);

        let mut negative = KLineBar::new(t, -1.0, 1.0, -1.0, 0.5, 1.0);
        assert_eq!(negative.check(true).unwrap_err().errcode, ErrCode::PriceBelowZero);
    }
}
