//! ADSR envelope curve
//!
//! Attack rises along an exponential with a negative growth constant, decay
//! and release fall along one with a positive constant. Each curved segment is
//! sampled at a fixed point count so the plotted series always has
//! `ENVELOPE_POINTS` entries, even when a segment has zero duration.

use super::{Point, CHART_FLOOR};

/// Points sampled per curved segment
pub const CURVE_POINTS_PER_SEGMENT: usize = 20;

/// Total points in an envelope series (three curved segments plus four joints)
pub const ENVELOPE_POINTS: usize = CURVE_POINTS_PER_SEGMENT * 3 + 4;

const CHART_MAX_X: f32 = 2.0;
const CHART_MAX_Y: f32 = 2.0;
const ATTACK_EXP: f32 = -2.0;
const DECAY_EXP: f32 = 5.0;
const RELEASE_EXP: f32 = 5.0;
const EXP_X_INC: f32 = 1.0 / CURVE_POINTS_PER_SEGMENT as f32;

/// Envelope parameters, each normalized 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub level: f32,
}

/// Exponential curve shape `(1 - e^(|x|·k)) / (1 - e^k)`
#[inline]
pub fn exp_curve(x: f32, k: f32) -> f32 {
    (1.0 - (x.abs() * k).exp()) / (1.0 - k.exp())
}

/// Compute the plotted envelope series
///
/// The envelope is horizontally centred: the attack, decay and release
/// segments take a third of their scaled value each, and sustain takes the
/// width left over by the decay.
pub fn envelope_curve(adsr: &Adsr) -> Vec<Point> {
    let mut points = Vec::with_capacity(ENVELOPE_POINTS);

    let level = (adsr.level * CHART_MAX_Y).clamp(0.0, CHART_MAX_Y);
    let attack = (adsr.attack * CHART_MAX_X).clamp(0.0, CHART_MAX_X);
    let decay = (adsr.decay * CHART_MAX_X).clamp(0.0, CHART_MAX_X);
    let sustain = (adsr.sustain * level).clamp(0.0, CHART_MAX_Y);
    let release = (adsr.release * CHART_MAX_X).clamp(0.0, CHART_MAX_X);

    let sustain_dur = (2.0 / 3.0) - (decay / 3.0);
    let mut x_offset =
        -1.0 + (2.0 - (attack / 3.0) - (decay / 3.0) - sustain_dur - (release / 3.0)) / 2.0;

    // Attack
    if attack > 0.0 {
        push_curve(&mut points, x_offset, attack, 0.0, ATTACK_EXP, |val| {
            CHART_FLOOR + val * level
        });
    } else {
        points.push(Point::new(x_offset, CHART_FLOOR));
        points.extend(
            std::iter::repeat(Point::new(x_offset, CHART_FLOOR + level))
                .take(CURVE_POINTS_PER_SEGMENT - 1),
        );
    }
    x_offset += attack / 3.0;
    points.push(Point::new(x_offset, CHART_FLOOR + level));

    // Decay
    if sustain < level {
        if decay > 0.0 {
            push_curve(&mut points, x_offset, decay, -1.0, DECAY_EXP, |val| {
                CHART_FLOOR + (level - sustain) * val + sustain
            });
        } else {
            points.extend(
                std::iter::repeat(Point::new(x_offset, CHART_FLOOR + sustain))
                    .take(CURVE_POINTS_PER_SEGMENT),
            );
        }
    } else {
        // Sustain at the peak: decay is a flat line
        let plot_x_inc = (decay / 3.0) / CURVE_POINTS_PER_SEGMENT as f32;
        points.extend((0..CURVE_POINTS_PER_SEGMENT).map(|i| {
            Point::new(x_offset + plot_x_inc * i as f32, CHART_FLOOR + level)
        }));
    }
    x_offset += decay / 3.0;
    points.push(Point::new(x_offset, CHART_FLOOR + sustain));

    // Sustain
    x_offset += sustain_dur;
    points.push(Point::new(x_offset, CHART_FLOOR + sustain));

    // Release
    if release > 0.0 {
        push_curve(&mut points, x_offset, release, -1.0, RELEASE_EXP, |val| {
            CHART_FLOOR + sustain * val
        });
    } else {
        points.extend(
            std::iter::repeat(Point::new(x_offset, CHART_FLOOR)).take(CURVE_POINTS_PER_SEGMENT),
        );
    }
    x_offset += release / 3.0;
    points.push(Point::new(x_offset, CHART_FLOOR));

    points
}

/// Sample one curved segment starting at `start_x` with width `duration / 3`
fn push_curve(
    points: &mut Vec<Point>,
    start_x: f32,
    duration: f32,
    exp_start: f32,
    k: f32,
    y_of: impl Fn(f32) -> f32,
) {
    let plot_x_inc = (duration / 3.0) / CURVE_POINTS_PER_SEGMENT as f32;
    let mut exp_x = exp_start;
    let mut plot_x = start_x;
    for _ in 0..CURVE_POINTS_PER_SEGMENT {
        points.push(Point::new(plot_x, y_of(exp_curve(exp_x, k))));
        exp_x += EXP_X_INC;
        plot_x += plot_x_inc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_exp_curve_endpoints() {
        assert!(approx(exp_curve(0.0, ATTACK_EXP), 0.0));
        assert!(approx(exp_curve(1.0, ATTACK_EXP), 1.0));
        assert!(approx(exp_curve(-1.0, DECAY_EXP), 1.0));
    }

    #[test]
    fn test_point_count_is_fixed() {
        let shapes = [
            Adsr::default(),
            Adsr { attack: 0.5, decay: 0.3, sustain: 0.6, release: 0.4, level: 1.0 },
            Adsr { attack: 1.0, decay: 1.0, sustain: 1.0, release: 1.0, level: 0.5 },
        ];
        for adsr in shapes {
            assert_eq!(envelope_curve(&adsr).len(), ENVELOPE_POINTS);
        }
    }

    #[test]
    fn test_zero_time_segments_are_vertical() {
        // attack = decay = release = 0, sustain and level at max
        let adsr = Adsr { attack: 0.0, decay: 0.0, sustain: 1.0, release: 0.0, level: 1.0 };
        let points = envelope_curve(&adsr);
        let left = -1.0 / 3.0;
        let right = 1.0 / 3.0;

        // Vertical attack at the left edge
        assert!(approx(points[0].x, left) && approx(points[0].y, -1.0));
        for p in &points[1..=41] {
            assert!(approx(p.x, left), "x {} != {}", p.x, left);
            assert!(approx(p.y, 1.0));
        }
        // Flat sustain across the middle
        assert!(approx(points[42].x, right) && approx(points[42].y, 1.0));
        // Vertical release at the right edge
        for p in &points[43..] {
            assert!(approx(p.x, right));
            assert!(approx(p.y, -1.0));
        }
    }

    #[test]
    fn test_attack_rises_to_level() {
        let adsr = Adsr { attack: 0.5, decay: 0.5, sustain: 0.5, release: 0.5, level: 1.0 };
        let points = envelope_curve(&adsr);
        assert!(approx(points[0].y, -1.0));
        // Rising through the attack samples
        for pair in points[..CURVE_POINTS_PER_SEGMENT].windows(2) {
            assert!(pair[1].y >= pair[0].y);
            assert!(pair[1].x > pair[0].x);
        }
        // Attack joint sits at the peak
        assert!(approx(points[CURVE_POINTS_PER_SEGMENT].y, 1.0));
        // Decay starts at the peak and settles on the sustain level
        assert!(approx(points[CURVE_POINTS_PER_SEGMENT + 1].y, 1.0));
        let sustain_y = -1.0 + 0.5 * 2.0;
        assert!(approx(points[2 * CURVE_POINTS_PER_SEGMENT + 1].y, sustain_y));
        assert!(approx(points.last().map(|p| p.y).unwrap_or_default(), -1.0));
    }

    #[test]
    fn test_envelope_is_centred() {
        let adsr = Adsr { attack: 0.25, decay: 0.75, sustain: 0.4, release: 0.6, level: 0.8 };
        let points = envelope_curve(&adsr);
        let first = points.first().map(|p| p.x).unwrap_or_default();
        let last = points.last().map(|p| p.x).unwrap_or_default();
        assert!(approx(first, -last));
    }

    #[test]
    fn test_values_are_clamped() {
        let adsr = Adsr { attack: 3.0, decay: -1.0, sustain: 2.0, release: 5.0, level: 4.0 };
        let points = envelope_curve(&adsr);
        assert!(points.iter().all(|p| p.y <= 1.0 + EPS && p.y >= -1.0 - EPS));
    }
}
