//! Chart geometry for the envelope and filter-cutoff displays
//!
//! Both charts plot into normalized chart space: x and y run from -1.0 to
//! 1.0, with y = -1.0 as the chart floor. The widgets layer maps these points
//! onto a canvas and fills down to the floor.

mod cutoff;
mod envelope;

pub use cutoff::{cutoff_curve, FilterCutoff, CUTOFF_POINTS};
pub use envelope::{envelope_curve, exp_curve, Adsr, CURVE_POINTS_PER_SEGMENT, ENVELOPE_POINTS};

/// Chart floor in normalized units
pub const CHART_FLOOR: f32 = -1.0;

/// A point in normalized chart/scope space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
