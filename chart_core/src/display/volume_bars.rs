use serde::{Deserialize, Serialize};

use crate::common::enums::Side;
use crate::segment::Sample;

/// A bar of the volume panel, colored by its side of the average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub x: f64,
    pub y: f64,
    pub side: Side,
}

/// Classify every non-gap sample against `reference`. Ties are above.
pub fn classify_bars(series: &[Sample], reference: f64) -> Vec<VolumeBar> {
    series
        .iter()
        .filter_map(|s| {
            s.y.map(|y| VolumeBar {
                x: s.x,
                y,
                side: Side::classify(y, reference),
            })
        })
        .collect()
}
