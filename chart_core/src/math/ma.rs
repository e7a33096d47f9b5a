use std::collections::VecDeque;

/// Simple moving average over the last `period` values
#[derive(Debug, Clone)]
pub struct MaModel {
    period: usize,
    window: VecDeque<f64>,
}

impl MaModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period + 1),
        }
    }

    /// `None` until `period` values have been seen
    pub fn add(&mut self, value: f64) -> Option<f64> {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }

        if self.window.len() == self.period {
            Some(self.window.iter().sum::<f64>() / self.period as f64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_up_and_values() {
        let mut ma = MaModel::new(3);
        let out: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 8.0].iter().map(|&v| ma.add(v)).collect();
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_period_one() {
        let mut ma = MaModel::new(1);
        assert_eq!(ma.add(7.0), Some(7.0));
        assert_eq!(ma.add(9.0), Some(9.0));
    }
}
