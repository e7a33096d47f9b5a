use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::utils::fmt_opt;
use crate::math::{Column, IndicatorColumns};

/// Latest value of every indicator, formatted for display. Missing values
/// read `--`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPanel {
    pub ma5: String,
    pub ma10: String,
    pub ma20: String,
    pub rsi: String,
    pub macd: String,
    pub volatility: String,
    pub bollinger_upper: String,
    pub bollinger_lower: String,
    pub kdj_k: String,
    pub kdj_d: String,
    pub kdj_j: String,
}

fn latest(col: &Column) -> Option<f64> {
    col.last().copied().flatten()
}

impl IndicatorPanel {
    pub fn latest(set: &IndicatorColumns) -> Self {
        let volatility = match latest(&set.volatility) {
            Some(v) => format!("{}%", fmt_opt(Some(v), 2)),
            None => "--".to_string(),
        };
        Self {
            ma5: fmt_opt(latest(&set.ma5), 2),
            ma10: fmt_opt(latest(&set.ma10), 2),
            ma20: fmt_opt(latest(&set.ma20), 2),
            rsi: fmt_opt(latest(&set.rsi), 2),
            macd: fmt_opt(latest(&set.macd_line), 4),
            volatility,
            bollinger_upper: fmt_opt(latest(&set.bollinger.upper), 2),
            bollinger_lower: fmt_opt(latest(&set.bollinger.lower), 2),
            kdj_k: fmt_opt(latest(&set.kdj.k), 2),
            kdj_d: fmt_opt(latest(&set.kdj.d), 2),
            kdj_j: fmt_opt(latest(&set.kdj.j), 2),
        }
    }
}

impl fmt::Display for IndicatorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MA5 {}  MA10 {}  MA20 {}", self.ma5, self.ma10, self.ma20)?;
        writeln!(f, "RSI {}  MACD {}  Volatility {}", self.rsi, self.macd, self.volatility)?;
        writeln!(f, "BOLL upper {}  lower {}", self.bollinger_upper, self.bollinger_lower)?;
        write!(f, "KDJ K {}  D {}  J {}", self.kdj_k, self.kdj_d, self.kdj_j)
    }
}
