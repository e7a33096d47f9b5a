//! Average-crossing segmentation.
//!
//! A series is split into an `above` and a `below` sequence, aligned entry by
//! entry. At every original sample exactly one side carries the value and the
//! other a gap, so two differently styled lines never connect unrelated
//! stretches. Where consecutive samples straddle the reference, the
//! interpolated crossing is pushed to both sides so the two lines meet on the
//! reference line.
//!
//! Input with NaN values is not guarded against; the output is unspecified.

use serde::{Deserialize, Serialize};

use super::sample::{Point, Sample};
use crate::common::enums::Side;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentPair {
    pub above: Vec<Sample>,
    pub below: Vec<Sample>,
}

impl SegmentPair {
    fn with_capacity(cap: usize) -> Self {
        Self {
            above: Vec::with_capacity(cap),
            below: Vec::with_capacity(cap),
        }
    }

    fn push_classified(&mut self, sample: Sample, side: Side) {
        match side {
            Side::Above => {
                self.above.push(sample);
                self.below.push(sample.to_gap());
            }
            Side::Below => {
                self.below.push(sample);
                self.above.push(sample.to_gap());
            }
        }
    }

    fn push_shared(&mut self, point: Point) {
        self.above.push(point.into());
        self.below.push(point.into());
    }

    pub fn len(&self) -> usize {
        self.above.len()
    }

    pub fn is_empty(&self) -> bool {
        self.above.is_empty()
    }
}

/// Crossing of the segment (x1, y1)-(x2, y2) with the horizontal line y = h.
///
/// Returns `None` when `y1 == y2`. `t` is not clamped to [0, 1]; callers only
/// ask for pairs that straddle `h`.
pub fn intersect(x1: f64, y1: f64, x2: f64, y2: f64, h: f64) -> Option<Point> {
    if y1 == y2 {
        return None;
    }
    let t = (h - y1) / (y2 - y1);
    let x = x1 + t * (x2 - x1);
    Some(Point::new(x, h))
}

/// Split `series` around `reference`.
///
/// Samples with `y >= reference` go to `above`, the rest to `below`. Gap
/// samples in the input stay gaps on both sides and never produce a crossing.
pub fn split(series: &[Sample], reference: f64) -> SegmentPair {
    let mut pair = SegmentPair::with_capacity(series.len() + series.len() / 2);

    for (i, &current) in series.iter().enumerate() {
        match current.y {
            Some(y) => pair.push_classified(current, Side::classify(y, reference)),
            None => {
                pair.above.push(current);
                pair.below.push(current);
            }
        }

        let Some(&next) = series.get(i + 1) else {
            continue;
        };
        if let (Some(y1), Some(y2)) = (current.y, next.y) {
            if Side::classify(y1, reference) != Side::classify(y2, reference) {
                if let Some(crossing) = intersect(current.x, y1, next.x, y2, reference) {
                    pair.push_shared(crossing);
                }
            }
        }
    }

    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn series(points: &[(f64, f64)]) -> Vec<Sample> {
        points.iter().map(|&p| Sample::from(p)).collect()
    }

    fn straddles(series: &[Sample], reference: f64) -> usize {
        series
            .windows(2)
            .filter(|w| {
                let (a, b) = (w[0].y.unwrap(), w[1].y.unwrap());
                Side::classify(a, reference) != Side::classify(b, reference) && a != b
            })
            .count()
    }

    #[test]
    fn test_intersect() {
        let p = intersect(0.0, 0.0, 10.0, 10.0, 5.0).unwrap();
        assert!((p.x - 5.0).abs() < EPS);
        assert_eq!(p.y, 5.0);

        let p = intersect(2.0, 8.0, 4.0, 4.0, 7.0).unwrap();
        assert!((p.x - 2.5).abs() < EPS);
    }

    #[test]
    fn test_intersect_horizontal() {
        assert_eq!(intersect(0.0, 5.0, 1.0, 5.0, 5.0), None);
        assert_eq!(intersect(0.0, 5.0, 1.0, 5.0, 3.0), None);
    }

    #[test]
    fn test_intersect_unclamped() {
        // h outside [y1, y2] extrapolates
        let p = intersect(0.0, 0.0, 1.0, 1.0, 2.0).unwrap();
        assert!((p.x - 2.0).abs() < EPS);
    }

    #[test]
    fn test_worked_example() {
        let s = series(&[(0.0, 10.0), (1.0, 20.0), (2.0, 5.0)]);
        let reference = (10.0 + 20.0 + 5.0) / 3.0;
        let pair = split(&s, reference);

        assert_eq!(pair.above.len(), 5);
        assert_eq!(pair.below.len(), 5);

        let x1 = (reference - 10.0) / 10.0;
        let x2 = 1.0 + (reference - 20.0) / (5.0 - 20.0);

        assert_eq!(pair.above[0], Sample::gap(0.0));
        assert_eq!(pair.below[0], Sample::new(0.0, 10.0));

        assert!((pair.above[1].x - x1).abs() < EPS);
        assert_eq!(pair.above[1].y, Some(reference));
        assert_eq!(pair.above[1], pair.below[1]);

        assert_eq!(pair.above[2], Sample::new(1.0, 20.0));
        assert_eq!(pair.below[2], Sample::gap(1.0));

        assert!((pair.above[3].x - x2).abs() < EPS);
        assert!((x2 - 1.5556).abs() < 1e-4);
        assert_eq!(pair.above[3], pair.below[3]);

        assert_eq!(pair.above[4], Sample::gap(2.0));
        assert_eq!(pair.below[4], Sample::new(2.0, 5.0));
    }

    #[test]
    fn test_single_sample() {
        let pair = split(&series(&[(0.0, 7.0)]), 7.0);
        assert_eq!(pair.above, vec![Sample::new(0.0, 7.0)]);
        assert_eq!(pair.below, vec![Sample::gap(0.0)]);
    }

    #[test]
    fn test_degenerate_pair() {
        let pair = split(&series(&[(0.0, 5.0), (1.0, 5.0)]), 5.0);
        assert_eq!(pair.len(), 2);
        assert!(pair.below.iter().all(Sample::is_gap));
    }

    #[test]
    fn test_tie_goes_above() {
        let pair = split(&series(&[(0.0, 3.0), (1.0, 5.0), (2.0, 7.0)]), 5.0);
        // 3 -> 5 straddles (below -> above), 5 -> 7 does not
        assert_eq!(pair.len(), 4);
        assert_eq!(pair.above[2], Sample::new(1.0, 5.0));
        assert_eq!(pair.below[2], Sample::gap(1.0));
        // the crossing sits exactly on the tied sample
        assert!((pair.above[1].x - 1.0).abs() < EPS);
    }

    #[test]
    fn test_lengths_and_exclusivity() {
        let s = series(&[
            (0.0, 1.0),
            (1.0, 9.0),
            (2.0, 9.0),
            (3.0, 2.0),
            (4.0, 6.0),
            (5.0, 4.0),
            (6.0, 5.0),
            (7.0, 5.0),
        ]);
        let reference = 5.0;
        let pair = split(&s, reference);
        let crossings = straddles(&s, reference);
        assert_eq!(pair.above.len(), s.len() + crossings);
        assert_eq!(pair.below.len(), s.len() + crossings);

        // walk the output, skipping shared crossings, and match originals
        let mut originals = s.iter();
        for (a, b) in pair.above.iter().zip(pair.below.iter()) {
            if a == b {
                assert_eq!(a.y, Some(reference));
                continue;
            }
            let orig = originals.next().unwrap();
            let y = orig.y.unwrap();
            assert_eq!(a.x, orig.x);
            assert_eq!(b.x, orig.x);
            if y >= reference {
                assert_eq!(a.y, Some(y));
                assert!(b.is_gap());
            } else {
                assert_eq!(b.y, Some(y));
                assert!(a.is_gap());
            }
        }
        assert!(originals.next().is_none());
    }

    #[test]
    fn test_crossing_strictly_between() {
        let s = series(&[(100.0, 1.0), (200.0, 3.0), (300.0, 0.5)]);
        let pair = split(&s, 2.0);
        let crossings: Vec<&Sample> = pair
            .above
            .iter()
            .zip(pair.below.iter())
            .filter(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect();
        assert_eq!(crossings.len(), 2);
        assert!(crossings[0].x > 100.0 && crossings[0].x < 200.0);
        assert!(crossings[1].x > 200.0 && crossings[1].x < 300.0);
    }

    #[test]
    fn test_gap_input_passes_through() {
        let s = vec![Sample::new(0.0, 1.0), Sample::gap(1.0), Sample::new(2.0, 9.0)];
        let pair = split(&s, 5.0);
        assert_eq!(pair.len(), 3);
        assert_eq!(pair.above[1], Sample::gap(1.0));
        assert_eq!(pair.below[1], Sample::gap(1.0));
    }
}
