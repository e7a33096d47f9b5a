use super::sample::{values, Point, Sample};
use super::splitter::{split, SegmentPair};
use crate::common::utils::mean;

/// Mean of the non-null values of a series
pub fn series_mean(series: &[Sample]) -> Option<f64> {
    mean(&values(series))
}

/// Constant line at `reference`, one point per sample x
pub fn reference_line(series: &[Sample], reference: f64) -> Vec<Point> {
    series.iter().map(|s| Point::new(s.x, reference)).collect()
}

/// Split a series around its own mean. `None` when it has no values.
pub fn segment_series(series: &[Sample]) -> Option<(f64, SegmentPair)> {
    let reference = series_mean(series)?;
    Some((reference, split(series, reference)))
}
