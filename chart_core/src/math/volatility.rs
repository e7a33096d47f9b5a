use std::collections::VecDeque;

use crate::common::utils::population_std;

/// Trading periods per year used to annualise
pub const ANNUALISATION_PERIODS: f64 = 252.0;

/// Annualised volatility: population std-dev of the simple returns inside the
/// last `period` prices, scaled by sqrt(252)
#[derive(Debug, Clone)]
pub struct VolatilityModel {
    period: usize,
    prices: VecDeque<f64>,
}

impl VolatilityModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prices: VecDeque::with_capacity(period + 1),
        }
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
        if self.prices.len() < self.period {
            return None;
        }

        let window = self.prices.make_contiguous();
        let returns: Vec<f64> = window.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
        population_std(&returns).map(|std| std * ANNUALISATION_PERIODS.sqrt())
    }
}
