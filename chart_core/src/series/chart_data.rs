use serde::{Deserialize, Serialize};
use tracing::debug;

use super::records::{OhlcvRecord, PriceRecord, VolatilityRecord, VolumeRecord};
use crate::common::{chart_error::ChartError, time::Time, utils::population_std};
use crate::segment::Series;

/// Payload of the chart endpoints: the three panel series of one symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub price_data: Vec<PriceRecord>,
    #[serde(default)]
    pub volume_data: Vec<VolumeRecord>,
    #[serde(default)]
    pub volatility_data: Vec<VolatilityRecord>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.price_data.is_empty() && self.volume_data.is_empty() && self.volatility_data.is_empty()
    }

    /// Validate every record
    pub fn check(&self) -> Result<(), ChartError> {
        self.price_data.iter().try_for_each(PriceRecord::check)?;
        self.volume_data.iter().try_for_each(VolumeRecord::check)?;
        self.volatility_data.iter().try_for_each(VolatilityRecord::check)
    }

    pub fn price_series(&self) -> Result<Series, ChartError> {
        self.price_data.iter().map(PriceRecord::to_sample).collect()
    }

    pub fn volume_series(&self) -> Result<Series, ChartError> {
        self.volume_data.iter().map(VolumeRecord::to_sample).collect()
    }

    pub fn volatility_series(&self) -> Result<Series, ChartError> {
        self.volatility_data.iter().map(VolatilityRecord::to_sample).collect()
    }
}

/// Build the three panel series of `symbol` from raw OHLCV rows.
///
/// Rows are filtered by symbol and ordered by date. Volatility is the
/// population std-dev of closes over a trailing window of
/// `min(max_window, n)` rows, so the first `window - 1` rows have none.
pub fn build_chart_data(
    records: &[OhlcvRecord],
    symbol: &str,
    max_window: usize,
) -> Result<ChartData, ChartError> {
    let mut rows: Vec<(Time, &OhlcvRecord)> = records
        .iter()
        .filter(|r| r.symbol.eq_ignore_ascii_case(symbol))
        .map(|r| Time::parse(&r.date).map(|t| (t, r)))
        .collect::<Result<_, _>>()?;

    if rows.is_empty() {
        debug!(symbol, "no rows for symbol");
        return Ok(ChartData::default());
    }
    rows.sort_by_key(|(t, _)| *t);

    let window = max_window.min(rows.len()).max(1);
    let closes: Vec<f64> = rows.iter().map(|(_, r)| r.close).collect();

    let mut data = ChartData {
        price_data: Vec::with_capacity(rows.len()),
        volume_data: Vec::with_capacity(rows.len()),
        volatility_data: Vec::with_capacity(rows.len() + 1 - window),
    };

    for (i, (_, rec)) in rows.iter().enumerate() {
        rec.check()?;
        data.price_data.push(PriceRecord {
            date: rec.date.clone(),
            price: rec.close,
            open: Some(rec.open),
            high: Some(rec.high),
            low: Some(rec.low),
        });
        data.volume_data.push(VolumeRecord {
            date: rec.date.clone(),
            volume: rec.volume,
        });

        if i + 1 >= window {
            let window_closes = &closes[i + 1 - window..=i];
            let mid = window_closes.iter().sum::<f64>() / window as f64;
            let volatility = population_std(window_closes).unwrap_or(0.0);
            data.volatility_data.push(VolatilityRecord {
                date: rec.date.clone(),
                volatility: Some(volatility),
                volatility_percent: if mid > 0.0 { volatility / mid * 100.0 } else { 0.0 },
            });
        }
    }

    debug!(
        symbol,
        rows = data.price_data.len(),
        volatility_rows = data.volatility_data.len(),
        "built chart data"
    );
    Ok(data)
}
