use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{
    enums::Side,
    utils::{fmt_thousands, pct_change},
};

/// Summary shown under a chart: latest value, the reference (mean) and the
/// change over the whole window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStats {
    pub current: f64,
    pub average: f64,
    pub change_pct: f64,
    pub side: Side,
}

/// Stats fields, used to report which ones changed between refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    Current,
    Average,
    Trend,
}

impl ChartStats {
    /// `None` for an empty slice
    pub fn new(values: &[f64], reference: f64) -> Option<Self> {
        let first = *values.first()?;
        let current = *values.last()?;
        Some(Self {
            current,
            average: reference,
            change_pct: pct_change(first, current),
            side: Side::classify(current, reference),
        })
    }

    pub fn is_above_average(&self) -> bool {
        self.side == Side::Above
    }

    pub fn trend_arrow(&self) -> &'static str {
        if self.change_pct >= 0.0 {
            "↗"
        } else {
            "↘"
        }
    }

    /// Fields that differ from `previous`, empty when there is nothing to
    /// compare with. The trend compares the magnitude of the change.
    pub fn changed_fields(&self, previous: Option<&ChartStats>) -> Vec<StatField> {
        let Some(prev) = previous else {
            return Vec::new();
        };
        let mut changed = Vec::new();
        if prev.current != self.current {
            changed.push(StatField::Current);
        }
        if prev.average != self.average {
            changed.push(StatField::Average);
        }
        if prev.change_pct.abs() != self.change_pct.abs() {
            changed.push(StatField::Trend);
        }
        changed
    }
}

impl fmt::Display for ChartStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "current {} ({}) | average {} | trend {} {:.2}%",
            fmt_thousands(self.current, 2),
            self.side,
            fmt_thousands(self.average, 2),
            self.trend_arrow(),
            self.change_pct.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let stats = ChartStats::new(&[100.0, 120.0, 110.0], 110.0).unwrap();
        assert_eq!(stats.current, 110.0);
        assert!((stats.change_pct - 10.0).abs() < 1e-12);
        // tie counts as above
        assert!(stats.is_above_average());
        assert_eq!(stats.trend_arrow(), "↗");
        assert!(ChartStats::new(&[], 1.0).is_none());
    }

    #[test]
    fn test_falling() {
        let stats = ChartStats::new(&[200.0, 150.0], 175.0).unwrap();
        assert_eq!(stats.side, Side::Below);
        assert_eq!(stats.trend_arrow(), "↘");
        assert_eq!(
            stats.to_string(),
            "current 150 (below) | average 175 | trend ↘ 25.00%"
        );
    }

    #[test]
    fn test_changed_fields() {
        let a = ChartStats::new(&[100.0, 110.0], 105.0).unwrap();
        assert!(a.changed_fields(None).is_empty());
        assert!(a.changed_fields(Some(&a)).is_empty());

        let b = ChartStats::new(&[100.0, 90.0], 105.0).unwrap();
        // +10% and -10% have the same magnitude
        assert_eq!(b.changed_fields(Some(&a)), vec![StatField::Current]);

        let c = ChartStats::new(&[100.0, 90.0], 95.0).unwrap();
        assert_eq!(c.changed_fields(Some(&a)), vec![StatField::Current, StatField::Average]);
    }
}
