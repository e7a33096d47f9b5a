use serde::{Deserialize, Serialize};

use crate::common::{
    chart_error::{ChartError, ErrCode},
    time::Time,
};
use crate::segment::Sample;
use crate::wire::serde_util::{lenient_f64, lenient_opt_f64};

fn check_value(what: &str, date: &str, value: f64, allow_negative: bool) -> Result<(), ChartError> {
    if !value.is_finite() {
        return Err(ChartError::new(
            format!("{} {} is not finite: {}", date, what, value),
            ErrCode::KlDataInvalid,
        ));
    }
    if !allow_negative && value < 0.0 {
        return Err(ChartError::new(
            format!("{} {}={} is below zero", date, what, value),
            ErrCode::PriceBelowZero,
        ));
    }
    Ok(())
}

/// One row of `price_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64::deserialize", skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64::deserialize", skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64::deserialize", skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
}

impl PriceRecord {
    pub fn check(&self) -> Result<(), ChartError> {
        check_value("price", &self.date, self.price, false)?;
        for (name, v) in [("open", self.open), ("high", self.high), ("low", self.low)] {
            if let Some(v) = v {
                check_value(name, &self.date, v, false)?;
            }
        }
        Ok(())
    }

    pub fn to_sample(&self) -> Result<Sample, ChartError> {
        Ok(Sample::new(Time::parse(&self.date)?.as_f64(), self.price))
    }
}

/// One row of `volume_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub date: String,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub volume: f64,
}

impl VolumeRecord {
    pub fn check(&self) -> Result<(), ChartError> {
        check_value("volume", &self.date, self.volume, false)
    }

    pub fn to_sample(&self) -> Result<Sample, ChartError> {
        Ok(Sample::new(Time::parse(&self.date)?.as_f64(), self.volume))
    }
}

/// One row of `volatility_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRecord {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_opt_f64::deserialize", skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub volatility_percent: f64,
}

impl VolatilityRecord {
    pub fn check(&self) -> Result<(), ChartError> {
        check_value("volatility_percent", &self.date, self.volatility_percent, false)
    }

    pub fn to_sample(&self) -> Result<Sample, ChartError> {
        Ok(Sample::new(
            Time::parse(&self.date)?.as_f64(),
            self.volatility_percent,
        ))
    }
}

/// One entry of `/api/latest_prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPrice {
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64::deserialize")]
    pub change_24h: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

impl LatestPrice {
    /// First record of `symbol`; the endpoint lists the newest first.
    pub fn find<'a>(prices: &'a [LatestPrice], symbol: &str) -> Option<&'a LatestPrice> {
        prices.iter().find(|p| p.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn check(&self) -> Result<(), ChartError> {
        check_value("price", &self.timestamp, self.price, false)?;
        if let Some(change) = self.change_24h {
            check_value("change_24h", &self.timestamp, change, true)?;
        }
        Ok(())
    }
}

/// A raw OHLCV row as stored by the scraper, input of the chart-data builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    pub symbol: String,
    pub date: String,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub open: f64,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub high: f64,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub low: f64,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub close: f64,
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub volume: f64,
}

impl OhlcvRecord {
    pub fn check(&self) -> Result<(), ChartError> {
        for (name, v) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            check_value(name, &self.date, v, false)?;
        }
        Ok(())
    }
}
