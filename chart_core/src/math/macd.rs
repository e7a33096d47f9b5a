use serde::{Deserialize, Serialize};

use super::ema::EmaModel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdItem {
    pub line: Option<f64>,
    pub signal: Option<f64>,
    pub hist: Option<f64>,
}

/// MACD: line = EMA(fast) - EMA(slow), signal = EMA(signal) of the line,
/// histogram = line - signal. The signal EMA only sees bars where the line
/// exists.
#[derive(Debug, Clone)]
pub struct MacdModel {
    fast: EmaModel,
    slow: EmaModel,
    signal: EmaModel,
}

impl MacdModel {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast: EmaModel::new(fast_period),
            slow: EmaModel::new(slow_period),
            signal: EmaModel::new(signal_period),
        }
    }

    pub fn add(&mut self, price: f64) -> MacdItem {
        let fast = self.fast.add(price);
        let slow = self.slow.add(price);

        let line = match (fast, slow) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        };
        let signal = line.and_then(|l| self.signal.add(l));
        let hist = match (line, signal) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        };

        MacdItem { line, signal, hist }
    }
}
