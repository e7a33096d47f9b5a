use serde::{Deserialize, Serialize};

/// A concrete (x, y) coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One entry of a chart series. `y == None` is a gap marker: the rendered
/// line is broken at this x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    pub fn gap(x: f64) -> Self {
        Self { x, y: None }
    }

    pub fn is_gap(&self) -> bool {
        self.y.is_none()
    }

    /// The same x with the value removed
    pub fn to_gap(self) -> Self {
        Self::gap(self.x)
    }
}

impl From<Point> for Sample {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

pub type Series = Vec<Sample>;

/// Non-null y values of a series, in order
pub fn values(series: &[Sample]) -> Vec<f64> {
    series.iter().filter_map(|s| s.y).collect()
}
