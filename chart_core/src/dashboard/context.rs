use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::view::{ChartView, PanelView};
use crate::common::{
    chart_error::{ChartError, ErrCode},
    enums::{Panel, Refresh, Timeframe},
};
use crate::config::ChartConfig;
use crate::display::{ChartStats, PriceTicker};
use crate::series::{ChartData, LatestPrice};

/// Interval bookkeeping for one refresh kind
#[derive(Debug, Clone)]
struct Poll {
    kind: Refresh,
    every: Duration,
    last: Option<Instant>,
}

impl Poll {
    fn new(kind: Refresh, every: Duration) -> Self {
        Self {
            kind,
            every,
            last: None,
        }
    }

    fn take_due(&mut self, now: Instant) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.every,
        };
        if due {
            self.last = Some(now);
        }
        due
    }
}

/// Dashboard state owned by the caller: the selected symbol and timeframe,
/// the last shown price per symbol, the last stats per panel and the polling
/// lifecycle. Time is always passed in, nothing runs in the background.
#[derive(Debug)]
pub struct RenderContext {
    config: ChartConfig,
    symbol: String,
    timeframe: Timeframe,
    running: bool,
    polls: [Poll; 2],
    previous_prices: HashMap<String, f64>,
    last_stats: HashMap<Panel, ChartStats>,
}

impl RenderContext {
    pub fn new(config: ChartConfig) -> Self {
        let polls = [
            Poll::new(Refresh::Prices, config.price_refresh),
            Poll::new(Refresh::Charts, config.chart_refresh),
        ];
        Self {
            symbol: config.default_symbol.clone(),
            timeframe: config.default_timeframe,
            config,
            running: false,
            polls,
            previous_prices: HashMap::new(),
            last_stats: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin polling; every refresh is due on the next `due` call.
    pub fn start(&mut self) {
        for poll in self.polls.iter_mut() {
            poll.last = None;
        }
        self.running = true;
        info!(symbol = %self.symbol, timeframe = %self.timeframe, "polling started");
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("polling stopped");
        }
        self.running = false;
    }

    /// Refreshes whose interval elapsed at `now`. Reported refreshes are
    /// considered done. Empty while stopped.
    pub fn due(&mut self, now: Instant) -> Vec<Refresh> {
        if !self.running {
            return Vec::new();
        }
        self.polls
            .iter_mut()
            .filter_map(|poll| poll.take_due(now).then_some(poll.kind))
            .collect()
    }

    /// Switch symbol or timeframe. Chart stats from the old selection are
    /// dropped and the chart refresh becomes due.
    pub fn select(&mut self, symbol: &str, timeframe: Timeframe) {
        let symbol = symbol.to_uppercase();
        if symbol == self.symbol && timeframe == self.timeframe {
            return;
        }
        debug!(from = %self.symbol, to = %symbol, %timeframe, "selection changed");
        self.symbol = symbol;
        self.timeframe = timeframe;
        self.last_stats.clear();
        if let Some(poll) = self.polls.iter_mut().find(|p| p.kind == Refresh::Charts) {
            poll.last = None;
        }
    }

    /// Apply a latest-prices payload. Returns the ticker of the selected
    /// symbol, or `None` when the payload does not list it.
    pub fn apply_prices(&mut self, prices: &[LatestPrice]) -> Result<Option<PriceTicker>, ChartError> {
        let Some(latest) = LatestPrice::find(prices, &self.symbol) else {
            warn!(symbol = %self.symbol, "no latest price for symbol");
            return Ok(None);
        };
        latest.check()?;

        let previous = self.previous_prices.get(&self.symbol).copied();
        let ticker = PriceTicker::new(latest, previous);
        self.previous_prices.insert(self.symbol.clone(), latest.price);
        Ok(Some(ticker))
    }

    /// Apply a chart payload of the selected symbol and build every panel
    pub fn apply_chart(&mut self, data: &ChartData) -> Result<ChartView, ChartError> {
        if data.is_empty() {
            return Err(ChartError::new(
                format!("no chart data for {}", self.symbol),
                ErrCode::NoData,
            ));
        }
        data.check()?;

        let series = [
            (Panel::Price, data.price_series()?),
            (Panel::Volume, data.volume_series()?),
            (Panel::Volatility, data.volatility_series()?),
        ];

        let mut panels = Vec::with_capacity(series.len());
        for (panel, samples) in series {
            let Some(view) = PanelView::build(panel, &samples, self.last_stats.get(&panel)) else {
                debug!(%panel, "panel has no values");
                continue;
            };
            self.last_stats.insert(panel, view.stats);
            panels.push(view);
        }

        Ok(ChartView {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            panels,
        })
    }
}
