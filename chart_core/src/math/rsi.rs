/// Relative strength index with Wilder smoothing.
///
/// The first value is produced once `period` price changes are known, from
/// their simple averages; after that each average is smoothed as
/// `(avg * (period - 1) + current) / period`.
#[derive(Debug, Clone)]
pub struct RsiModel {
    period: usize,
    last_price: Option<f64>,
    changes: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg: Option<(f64, f64)>,
}

impl RsiModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_price: None,
            changes: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg: None,
        }
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = self.last_price.replace(price)?;
        let change = price - last_price;
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };
        let period = self.period as f64;

        self.avg = match self.avg {
            Some((avg_gain, avg_loss)) => Some((
                (avg_gain * (period - 1.0) + gain) / period,
                (avg_loss * (period - 1.0) + loss) / period,
            )),
            None => {
                self.changes += 1;
                self.gain_sum += gain;
                self.loss_sum += loss;
                if self.changes == self.period {
                    Some((self.gain_sum / period, self.loss_sum / period))
                } else {
                    None
                }
            }
        };

        let (avg_gain, avg_loss) = self.avg?;
        if avg_loss == 0.0 {
            Some(100.0)
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_at_period() {
        let mut rsi = RsiModel::new(3);
        let out: Vec<Option<f64>> = [10.0, 11.0, 12.0, 13.0].iter().map(|&p| rsi.add(p)).collect();
        assert_eq!(out, vec![None, None, None, Some(100.0)]);
    }

    #[test]
    fn test_wilder_smoothing() {
        let mut rsi = RsiModel::new(2);
        assert_eq!(rsi.add(10.0), None);
        assert_eq!(rsi.add(12.0), None);
        // gains [2, 0], losses [0, 1] -> avg 1 / 0.5 -> rs 2
        let v = rsi.add(11.0).unwrap();
        assert!((v - (100.0 - 100.0 / 3.0)).abs() < 1e-12);
        // avg_gain = (1 + 0) / 2 = 0.5, avg_loss = (0.5 + 1) / 2 = 0.75
        let v = rsi.add(10.0).unwrap();
        let rs = 0.5 / 0.75;
        assert!((v - (100.0 - 100.0 / (1.0 + rs))).abs() < 1e-12);
    }

    #[test]
    fn test_all_losses() {
        let mut rsi = RsiModel::new(2);
        rsi.add(3.0);
        rsi.add(2.0);
        assert_eq!(rsi.add(1.0), Some(0.0));
    }
}
