/// Exponential moving average seeded with the simple average of the first
/// `period` values
#[derive(Debug, Clone)]
pub struct EmaModel {
    period: usize,
    seed: Vec<f64>,
    value: Option<f64>,
}

impl EmaModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed: Vec::with_capacity(period),
            value: None,
        }
    }

    fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    pub fn add(&mut self, value: f64) -> Option<f64> {
        self.value = match self.value {
            Some(prev) => {
                let m = self.multiplier();
                Some(value * m + prev * (1.0 - m))
            }
            None => {
                self.seed.push(value);
                if self.seed.len() == self.period {
                    Some(self.seed.iter().sum::<f64>() / self.period as f64)
                } else {
                    None
                }
            }
        };
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}
