use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::common::utils::{mean, population_std};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollMetric {
    pub up: f64,
    pub mid: f64,
    pub down: f64,
}

/// Bollinger bands: `mid ± k * std` over the last `period` prices, with the
/// population standard deviation, as the batch indicator processor does. The
/// k-line endpoint uses the sample standard deviation, so its bands are
/// slightly wider than recomputed ones.
#[derive(Debug, Clone)]
pub struct BollModel {
    period: usize,
    k: f64,
    prices: VecDeque<f64>,
}

impl BollModel {
    pub fn new(period: usize, k: f64) -> Self {
        Self {
            period,
            k,
            prices: VecDeque::with_capacity(period + 1),
        }
    }

    pub fn add(&mut self, price: f64) -> Option<BollMetric> {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
        if self.prices.len() < self.period {
            return None;
        }

        let window = self.prices.make_contiguous();
        let mid = mean(window)?;
        let std_dev = population_std(window)?;

        Some(BollMetric {
            up: mid + self.k * std_dev,
            mid,
            down: mid - self.k * std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let mut boll = BollModel::new(4, 2.0);
        assert_eq!(boll.add(1.0), None);
        assert_eq!(boll.add(3.0), None);
        assert_eq!(boll.add(1.0), None);
        // window [1, 3, 1, 3]: mean 2, std 1
        let m = boll.add(3.0).unwrap();
        assert_eq!(m, BollMetric { up: 4.0, mid: 2.0, down: 0.0 });
        // window slides to [3, 1, 3, 3]
        let m = boll.add(3.0).unwrap();
        assert_eq!(m.mid, 2.5);
    }
}
