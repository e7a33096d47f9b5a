use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::chart_error::{ChartError, ErrCode};

/// A point in time carried as epoch milliseconds, the x axis of every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    pub millis: i64,
}

impl Time {
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Parse an API date. Supports "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DDTHH:MM:SS",
    /// "YYYY-MM-DD" and RFC 3339. Naive values are taken as UTC.
    pub fn parse(time_str: &str) -> Result<Self, ChartError> {
        let s = time_str.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_millis(dt.timestamp_millis()));
        }
        let datetime = if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            dt
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            dt
        } else {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                ChartError::new(
                    format!("unparseable date {:?}: {}", time_str, e),
                    ErrCode::SrcDataFormatError,
                )
            })?;
            date.and_time(NaiveTime::MIN)
        };
        Ok(Self::from_millis(datetime.and_utc().timestamp_millis()))
    }

    pub fn as_f64(&self) -> f64 {
        self.millis as f64
    }

    pub fn to_str(&self) -> String {
        match DateTime::from_timestamp_millis(self.millis) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.millis.to_string(),
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let a = Time::parse("2024-01-02 03:04:05").unwrap();
        let b = Time::parse("2024-01-02T03:04:05").unwrap();
        let c = Time::parse("2024-01-02T03:04:05Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.millis, 1_704_164_645_000);

        let d = Time::parse("2024-01-02").unwrap();
        assert_eq!(d.millis, 1_704_153_600_000);
    }

    #[test]
    fn test_parse_error() {
        let err = Time::parse("yesterday").unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
    }

    #[test]
    fn test_round_trip_display() {
        let t = Time::parse("2023-06-30 23:59:00").unwrap();
        assert_eq!(t.to_string(), "2023-06-30 23:59:00");
    }
}
