//! Filter cutoff chart
//!
//! Two ramps: the high-pass edge rising from the left and the low-pass edge
//! falling to the right. Where the ramps meet below the chart top they share
//! the intersection point; otherwise each flattens out at the top.

use super::{Point, CHART_FLOOR};

/// Points in a cutoff series
pub const CUTOFF_POINTS: usize = 4;

const CHART_MAX_X: f32 = 2.0;
const HP_START: f32 = -2.95;
const LP_START: f32 = -1.05;

/// High-pass and low-pass cutoff, each normalized 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterCutoff {
    pub high_pass: f32,
    pub low_pass: f32,
}

/// Compute the plotted cutoff series
pub fn cutoff_curve(cutoff: &FilterCutoff) -> [Point; CUTOFF_POINTS] {
    let lp = (cutoff.low_pass * CHART_MAX_X).clamp(0.0, CHART_MAX_X);
    let hp = (cutoff.high_pass * CHART_MAX_X).clamp(0.0, CHART_MAX_X);

    let hp_x = HP_START + 2.0 * hp;
    let lp_x = LP_START + 2.0 * lp;

    // Intersection of the two 45° ramps
    let x = ((lp_x - 1.0) + (hp_x + 1.0)) / 2.0;
    let y = x - (hp_x + 1.0);
    let meets_below_top = y < 1.0;

    let hp_end_x = if meets_below_top { x } else { hp_x + 2.0 };
    let lp_start_x = if meets_below_top { x } else { lp_x - 2.0 };

    [
        Point::new(hp_x, CHART_FLOOR),
        Point::new(hp_end_x, hp_end_x - (hp_x + 1.0)),
        Point::new(lp_start_x, -lp_start_x + (lp_x - 1.0)),
        Point::new(lp_x, CHART_FLOOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_wide_open_filter_plateaus_at_top() {
        let points = cutoff_curve(&FilterCutoff { high_pass: 0.0, low_pass: 1.0 });
        assert!((points[0].x - HP_START).abs() < EPS);
        assert!((points[0].y + 1.0).abs() < EPS);
        assert!((points[1].y - 1.0).abs() < EPS);
        assert!((points[2].y - 1.0).abs() < EPS);
        assert!((points[1].x + 0.95).abs() < EPS);
        assert!((points[2].x - 0.95).abs() < EPS);
        assert!((points[3].y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_extreme_ramps_meet_at_midpoint() {
        let points = cutoff_curve(&FilterCutoff { high_pass: 1.0, low_pass: 0.0 });
        assert!(points[1].x.abs() < EPS);
        assert!(points[2].x.abs() < EPS);
        assert!((points[1].y - points[2].y).abs() < EPS);
    }

    #[test]
    fn test_start_offsets_track_parameters() {
        let a = cutoff_curve(&FilterCutoff { high_pass: 0.2, low_pass: 0.8 });
        let b = cutoff_curve(&FilterCutoff { high_pass: 0.4, low_pass: 0.6 });
        // 0.2 more high-pass moves the start right by 0.8 chart units
        assert!((b[0].x - a[0].x - 0.8).abs() < EPS);
        assert!((a[3].x - b[3].x - 0.8).abs() < EPS);
    }
}
