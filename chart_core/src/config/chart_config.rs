use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::common::{
    chart_error::{ChartError, ErrCode},
    enums::Timeframe,
};

/// Key/value configuration that remembers which keys were consumed, so
/// unknown keys can be reported after all known ones are read.
#[derive(Debug, Default)]
pub struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    /// Take `key` out of the config. Missing and `null` values give `None`.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, ChartError> {
        match self.conf.remove(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                ChartError::new(format!("bad value for {}: {}", key, e), ErrCode::ConfigError)
            }),
        }
    }

    pub fn check(&self) -> Result<(), ChartError> {
        let mut unknown: Vec<&String> = self.conf.keys().collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(ChartError::new(
            format!("unknown para = {:?}", unknown),
            ErrCode::ParaError,
        ))
    }
}

/// Periods of the technical indicators
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub boll_n: usize,
    pub boll_k: f64,
    pub kdj_n: usize,
    pub kdj_k: usize,
    pub kdj_d: usize,
    pub volatility_period: usize,
    pub volume_ma_period: usize,
    /// Below this many bars no indicator is computed
    pub min_bars: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            boll_n: 20,
            boll_k: 2.0,
            kdj_n: 9,
            kdj_k: 3,
            kdj_d: 3,
            volatility_period: 20,
            volume_ma_period: 20,
            min_bars: 20,
        }
    }
}

impl IndicatorConfig {
    fn check(&self) -> Result<(), ChartError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd.fast", self.macd_fast),
            ("macd.slow", self.macd_slow),
            ("macd.signal", self.macd_signal),
            ("boll_n", self.boll_n),
            ("kdj.n", self.kdj_n),
            ("kdj.k", self.kdj_k),
            ("kdj.d", self.kdj_d),
            ("volume_ma_period", self.volume_ma_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ChartError::new(
                format!("{} must be positive", name),
                ErrCode::ConfigError,
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ChartError::new(
                format!(
                    "macd.fast={} must be below macd.slow={}",
                    self.macd_fast, self.macd_slow
                ),
                ErrCode::ConfigError,
            ));
        }
        if self.volatility_period < 2 {
            return Err(ChartError::new(
                "volatility_period needs at least two prices",
                ErrCode::ConfigError,
            ));
        }
        if !self.boll_k.is_finite() || self.boll_k < 0.0 {
            return Err(ChartError::new(
                format!("boll_k={} is invalid", self.boll_k),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub indicator: IndicatorConfig,
    /// Upper bound of the rolling window used for the volatility panel
    pub volatility_window: usize,
    pub price_refresh: Duration,
    pub chart_refresh: Duration,
    pub default_symbol: String,
    pub default_timeframe: Timeframe,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            indicator: IndicatorConfig::default(),
            volatility_window: 10,
            price_refresh: Duration::from_millis(5_000),
            chart_refresh: Duration::from_millis(30_000),
            default_symbol: "BTC".to_string(),
            default_timeframe: Timeframe::Hour,
        }
    }
}

impl ChartConfig {
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, ChartError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();
        let ind = default.indicator.clone();

        let macd: HashMap<String, usize> = conf.get("macd")?.unwrap_or_default();
        let kdj: HashMap<String, usize> = conf.get("kdj")?.unwrap_or_default();
        for (group, map, allowed) in [
            ("macd", &macd, &["fast", "slow", "signal"][..]),
            ("kdj", &kdj, &["n", "k", "d"][..]),
        ] {
            if let Some(k) = map.keys().find(|k| !allowed.contains(&k.as_str())) {
                return Err(ChartError::new(
                    format!("unknown para = {}.{}", group, k),
                    ErrCode::ParaError,
                ));
            }
        }

        let indicator = IndicatorConfig {
            rsi_period: conf.get("rsi_period")?.unwrap_or(ind.rsi_period),
            macd_fast: macd.get("fast").copied().unwrap_or(ind.macd_fast),
            macd_slow: macd.get("slow").copied().unwrap_or(ind.macd_slow),
            macd_signal: macd.get("signal").copied().unwrap_or(ind.macd_signal),
            boll_n: conf.get("boll_n")?.unwrap_or(ind.boll_n),
            boll_k: conf.get("boll_k")?.unwrap_or(ind.boll_k),
            kdj_n: kdj.get("n").copied().unwrap_or(ind.kdj_n),
            kdj_k: kdj.get("k").copied().unwrap_or(ind.kdj_k),
            kdj_d: kdj.get("d").copied().unwrap_or(ind.kdj_d),
            volatility_period: conf.get("volatility_period")?.unwrap_or(ind.volatility_period),
            volume_ma_period: conf.get("volume_ma_period")?.unwrap_or(ind.volume_ma_period),
            min_bars: conf.get("min_indicator_bars")?.unwrap_or(ind.min_bars),
        };
        indicator.check()?;

        let default_timeframe = match conf.get::<String>("default_timeframe")? {
            Some(s) => Timeframe::from_str(&s).map_err(|_| {
                ChartError::new(format!("unknown timeframe={}", s), ErrCode::ConfigError)
            })?,
            None => default.default_timeframe,
        };

        let config = Self {
            indicator,
            volatility_window: conf
                .get("volatility_window")?
                .unwrap_or(default.volatility_window),
            price_refresh: conf
                .get("price_refresh_ms")?
                .map(Duration::from_millis)
                .unwrap_or(default.price_refresh),
            chart_refresh: conf
                .get("chart_refresh_ms")?
                .map(Duration::from_millis)
                .unwrap_or(default.chart_refresh),
            default_symbol: conf
                .get::<String>("default_symbol")?
                .map(|s| s.to_uppercase())
                .unwrap_or(default.default_symbol),
            default_timeframe,
        };

        if config.volatility_window == 0 {
            return Err(ChartError::new(
                "volatility_window must be positive",
                ErrCode::ConfigError,
            ));
        }
        if config.price_refresh.is_zero() || config.chart_refresh.is_zero() {
            return Err(ChartError::new(
                "refresh intervals must be positive",
                ErrCode::ConfigError,
            ));
        }

        conf.check()?;
        Ok(config)
    }

    /// Parse a JSON object, e.g. the contents of a config file
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let conf: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Self::new(Some(conf))
    }
}
