pub mod reference;
pub mod sample;
pub mod splitter;

pub use sample::{Point, Sample, Series};
pub use splitter::{intersect, split, SegmentPair};
