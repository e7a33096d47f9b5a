use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    boll::BollModel, kdj::KdjModel, ma::MaModel, macd::MacdModel, rsi::RsiModel,
    volatility::VolatilityModel,
};
use crate::common::chart_error::{ChartError, ErrCode};
use crate::config::IndicatorConfig;
use crate::series::KLineBar;

pub type Column = Vec<Option<f64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerColumns {
    #[serde(default)]
    pub upper: Column,
    #[serde(default)]
    pub middle: Column,
    #[serde(default)]
    pub lower: Column,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KdjColumns {
    #[serde(default)]
    pub k: Column,
    #[serde(default)]
    pub d: Column,
    #[serde(default)]
    pub j: Column,
}

/// Per-bar indicator values, one entry per k-line bar, `None` during warm-up.
/// Field names follow the `indicators` object of the k-line endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumns {
    #[serde(default)]
    pub ma5: Column,
    #[serde(default)]
    pub ma10: Column,
    #[serde(default)]
    pub ma20: Column,
    #[serde(default)]
    pub ma50: Column,
    #[serde(default)]
    pub rsi: Column,
    #[serde(default)]
    pub macd_line: Column,
    #[serde(default, rename = "signal_line", alias = "macd_signal")]
    pub macd_signal: Column,
    #[serde(default)]
    pub macd_hist: Column,
    #[serde(default)]
    pub bollinger: BollingerColumns,
    #[serde(default)]
    pub volume_ma: Column,
    #[serde(default)]
    pub volatility: Column,
    #[serde(default)]
    pub kdj: KdjColumns,
}

impl IndicatorColumns {
    fn with_capacity(n: usize) -> Self {
        let col = || Vec::with_capacity(n);
        Self {
            ma5: col(),
            ma10: col(),
            ma20: col(),
            ma50: col(),
            rsi: col(),
            macd_line: col(),
            macd_signal: col(),
            macd_hist: col(),
            bollinger: BollingerColumns {
                upper: col(),
                middle: col(),
                lower: col(),
            },
            volume_ma: col(),
            volatility: col(),
            kdj: KdjColumns {
                k: col(),
                d: col(),
                j: col(),
            },
        }
    }

    /// Every column with its wire name
    pub fn columns(&self) -> Vec<(&'static str, &Column)> {
        vec![
            ("ma5", &self.ma5),
            ("ma10", &self.ma10),
            ("ma20", &self.ma20),
            ("ma50", &self.ma50),
            ("rsi", &self.rsi),
            ("macd_line", &self.macd_line),
            ("signal_line", &self.macd_signal),
            ("macd_hist", &self.macd_hist),
            ("bollinger.upper", &self.bollinger.upper),
            ("bollinger.middle", &self.bollinger.middle),
            ("bollinger.lower", &self.bollinger.lower),
            ("volume_ma", &self.volume_ma),
            ("volatility", &self.volatility),
            ("kdj.k", &self.kdj.k),
            ("kdj.d", &self.kdj.d),
            ("kdj.j", &self.kdj.j),
        ]
    }

    /// Columns must be empty (not sent) or have one entry per bar
    pub fn check_aligned(&self, bar_count: usize) -> Result<(), ChartError> {
        for (name, col) in self.columns() {
            if !col.is_empty() && col.len() != bar_count {
                return Err(ChartError::new(
                    format!("indicator {} has {} values for {} bars", name, col.len(), bar_count),
                    ErrCode::KlDataNotAlign,
                ));
            }
        }
        Ok(())
    }

    /// Compute every indicator over `bars` (oldest first).
    pub fn compute(bars: &[KLineBar], conf: &IndicatorConfig) -> Result<Self, ChartError> {
        if bars.len() < conf.min_bars {
            return Err(ChartError::new(
                format!("{} bars, at least {} needed", bars.len(), conf.min_bars),
                ErrCode::NotEnoughData,
            ));
        }

        let mut ma = [5, 10, 20, 50].map(MaModel::new);
        let mut rsi = RsiModel::new(conf.rsi_period);
        let mut macd = MacdModel::new(conf.macd_fast, conf.macd_slow, conf.macd_signal);
        let mut boll = BollModel::new(conf.boll_n, conf.boll_k);
        let mut volume_ma = MaModel::new(conf.volume_ma_period);
        let mut volatility = VolatilityModel::new(conf.volatility_period);
        let mut kdj = KdjModel::new(conf.kdj_n, conf.kdj_k, conf.kdj_d);

        let mut out = Self::with_capacity(bars.len());
        for bar in bars {
            let [ma5, ma10, ma20, ma50] = &mut ma;
            out.ma5.push(ma5.add(bar.close));
            out.ma10.push(ma10.add(bar.close));
            out.ma20.push(ma20.add(bar.close));
            out.ma50.push(ma50.add(bar.close));

            out.rsi.push(rsi.add(bar.close));

            let m = macd.add(bar.close);
            out.macd_line.push(m.line);
            out.macd_signal.push(m.signal);
            out.macd_hist.push(m.hist);

            let b = boll.add(bar.close);
            out.bollinger.upper.push(b.map(|b| b.up));
            out.bollinger.middle.push(b.map(|b| b.mid));
            out.bollinger.lower.push(b.map(|b| b.down));

            out.volume_ma.push(volume_ma.add(bar.volume));
            out.volatility.push(volatility.add(bar.close));

            let k = kdj.add(bar.high, bar.low, bar.close);
            out.kdj.k.push(k.map(|k| k.k));
            out.kdj.d.push(k.map(|k| k.d));
            out.kdj.j.push(k.map(|k| k.j));
        }

        debug!(bars = bars.len(), "computed indicators");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::Time;

    fn bars(closes: &[f64]) -> Vec<KLineBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                KLineBar::new(
                    Time::from_millis(i as i64 * 60_000),
                    c,
                    c + 1.0,
                    c - 1.0,
                    c,
                    100.0 + i as f64,
                )
            })
            .collect()
    }

    fn first_some(col: &Column) -> Option<usize> {
        col.iter().position(Option::is_some)
    }

    #[test]
    fn test_not_enough_bars() {
        let err = IndicatorColumns::compute(&bars(&[1.0; 19]), &IndicatorConfig::default())
            .unwrap_err();
        assert_eq!(err.errcode, ErrCode::NotEnoughData);
    }

    #[test]
    fn test_warm_up_positions() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let set = IndicatorColumns::compute(&bars(&closes), &IndicatorConfig::default()).unwrap();

        for (_, col) in set.columns() {
            assert_eq!(col.len(), 60);
        }
        assert_eq!(first_some(&set.ma5), Some(4));
        assert_eq!(first_some(&set.ma50), Some(49));
        assert_eq!(first_some(&set.rsi), Some(14));
        assert_eq!(first_some(&set.macd_line), Some(25));
        assert_eq!(first_some(&set.macd_signal), Some(33));
        assert_eq!(first_some(&set.macd_hist), Some(33));
        assert_eq!(first_some(&set.bollinger.upper), Some(19));
        assert_eq!(first_some(&set.volume_ma), Some(19));
        assert_eq!(first_some(&set.volatility), Some(19));
        assert_eq!(first_some(&set.kdj.k), Some(8));
        assert_eq!(set.kdj.k[8], Some(50.0));
        set.check_aligned(60).unwrap();
    }

    #[test]
    fn test_short_set_leaves_long_columns_empty() {
        let set = IndicatorColumns::compute(&bars(&[10.0; 20]), &IndicatorConfig::default()).unwrap();
        assert!(set.ma50.iter().all(Option::is_none));
        assert!(set.macd_line.iter().all(Option::is_none));
        assert_eq!(set.ma20[19], Some(10.0));
    }

    #[test]
    fn test_rising_prices() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let set = IndicatorColumns::compute(&bars(&closes), &IndicatorConfig::default()).unwrap();
        assert_eq!(set.rsi[29], Some(100.0));
        assert_eq!(set.ma5[29], Some(28.0));
        let upper = set.bollinger.upper[29].unwrap();
        let lower = set.bollinger.lower[29].unwrap();
        assert!(upper > 20.5 && lower < 20.5);
    }

    #[test]
    fn test_signal_column_wire_name() {
        let cols = IndicatorColumns {
            macd_signal: vec![None, Some(0.25)],
            ..Default::default()
        };
        let json = serde_json::to_value(&cols).unwrap();
        assert_eq!(json["signal_line"][1], 0.25);
        assert!(json.get("macd_signal").is_none());

        let legacy: IndicatorColumns =
            serde_json::from_str(r#"{"macd_signal": [null, 0.5]}"#).unwrap();
        assert_eq!(legacy.macd_signal, vec![None, Some(0.5)]);
    }

    #[test]
    fn test_misaligned_columns() {
        let cols = IndicatorColumns {
            rsi: vec![None, Some(50.0)],
            ..Default::default()
        };
        cols.check_aligned(2).unwrap();
        let err = cols.check_aligned(3).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlDataNotAlign);
    }
}
