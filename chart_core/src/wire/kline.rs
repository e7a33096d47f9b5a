use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::chart_error::{ChartError, ErrCode};
use crate::config::IndicatorConfig;
use crate::math::IndicatorColumns;
use crate::series::KLineBar;

/// `data` of the k-line endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KlinePayload {
    pub kline: Vec<KLineBar>,
    #[serde(default)]
    pub indicators: IndicatorColumns,
}

impl KlinePayload {
    /// Bars plus freshly computed indicators. Too few bars leave the
    /// indicators empty, as the endpoint does.
    pub fn from_bars(mut bars: Vec<KLineBar>, conf: &IndicatorConfig) -> Result<Self, ChartError> {
        bars.sort_by_key(|b| b.time);
        for bar in bars.iter_mut() {
            bar.check(true)?;
        }
        let indicators = match IndicatorColumns::compute(&bars, conf) {
            Ok(set) => set,
            Err(e) if e.errcode == ErrCode::NotEnoughData => {
                warn!("{}", e);
                IndicatorColumns::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            kline: bars,
            indicators,
        })
    }

    /// Bars must be in time order and indicator columns aligned with them
    pub fn check(&self) -> Result<(), ChartError> {
        if let Some(w) = self.kline.windows(2).find(|w| w[1].time < w[0].time) {
            return Err(ChartError::new(
                format!("bar {} comes after {}", w[1].time, w[0].time),
                ErrCode::KlDataInvalid,
            ));
        }
        self.indicators.check_aligned(self.kline.len())
    }
}
