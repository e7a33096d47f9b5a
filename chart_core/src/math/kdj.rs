use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kdj {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// KDJ stochastic oscillator.
///
/// RSV is taken over the last `rsv_period` bars (50 when the range is flat).
/// K and D both start at 50 on the first full window and are then smoothed
/// with `k_period` and `d_period`; J = 3K - 2D.
///
/// This follows the batch indicator processor. The k-line endpoint seeds
/// K = D = RSV on the first window instead, so served KDJ columns differ from
/// recomputed ones during the first bars.
#[derive(Debug, Clone)]
pub struct KdjModel {
    rsv_period: usize,
    k_period: usize,
    d_period: usize,
    highs: VecDeque<f64>,
    lows: VecDeque<f64>,
    last: Option<(f64, f64)>,
}

impl KdjModel {
    pub const INITIAL: f64 = 50.0;

    pub fn new(rsv_period: usize, k_period: usize, d_period: usize) -> Self {
        Self {
            rsv_period,
            k_period,
            d_period,
            highs: VecDeque::with_capacity(rsv_period + 1),
            lows: VecDeque::with_capacity(rsv_period + 1),
            last: None,
        }
    }

    fn rsv(&self, close: f64) -> f64 {
        let highest = self.highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = self.lows.iter().copied().fold(f64::INFINITY, f64::min);
        if highest == lowest {
            Self::INITIAL
        } else {
            (close - lowest) / (highest - lowest) * 100.0
        }
    }

    pub fn add(&mut self, high: f64, low: f64, close: f64) -> Option<Kdj> {
        self.highs.push_back(high);
        self.lows.push_back(low);
        if self.highs.len() > self.rsv_period {
            self.highs.pop_front();
            self.lows.pop_front();
        }
        if self.highs.len() < self.rsv_period {
            return None;
        }

        let (k, d) = match self.last {
            None => (Self::INITIAL, Self::INITIAL),
            Some((last_k, last_d)) => {
                let rsv = self.rsv(close);
                let kp = self.k_period as f64;
                let dp = self.d_period as f64;
                let k = (last_k * (kp - 1.0) + rsv) / kp;
                let d = (last_d * (dp - 1.0) + k) / dp;
                (k, d)
            }
        };
        self.last = Some((k, d));

        Some(Kdj {
            k,
            d,
            j: 3.0 * k - 2.0 * d,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_fifty() {
        let mut kdj = KdjModel::new(3, 3, 3);
        assert_eq!(kdj.add(10.0, 8.0, 9.0), None);
        assert_eq!(kdj.add(11.0, 9.0, 10.0), None);
        let first = kdj.add(12.0, 10.0, 12.0).unwrap();
        assert_eq!(first, Kdj { k: 50.0, d: 50.0, j: 50.0 });
    }

    #[test]
    fn test_smoothing() {
        let mut kdj = KdjModel::new(2, 3, 3);
        kdj.add(10.0, 0.0, 5.0);
        kdj.add(10.0, 0.0, 5.0);
        // window highs [10, 10], lows [0, 0] -> rsv = 100
        let v = kdj.add(10.0, 0.0, 10.0).unwrap();
        let k = (50.0 * 2.0 + 100.0) / 3.0;
        let d = (50.0 * 2.0 + k) / 3.0;
        assert!((v.k - k).abs() < 1e-12);
        assert!((v.d - d).abs() < 1e-12);
        assert!((v.j - (3.0 * k - 2.0 * d)).abs() < 1e-12);
    }

    #[test]
    fn test_flat_range_keeps_fifty() {
        let mut kdj = KdjModel::new(2, 3, 3);
        let last = (0..10).filter_map(|_| kdj.add(5.0, 5.0, 5.0)).last().unwrap();
        assert!((last.k - 50.0).abs() < 1e-12);
        assert!((last.d - 50.0).abs() < 1e-12);
    }
}
