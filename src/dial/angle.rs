//! Mapping from pointer coordinates to dial angles and minutes.
//!
//! Angles are clock angles: 0° points up (12 o'clock) and grows clockwise.
//! Coordinates are screen coordinates, so `y` grows downward.

use crate::types::MAX_MINUTES;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns the clock angle of `point` around `center`, in `[0, 360)`.
pub fn angle_from_point(point: Point, center: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let angle = dy.atan2(dx).to_degrees() + 90.0;
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Converts a clock angle to whole minutes in `[1, MAX_MINUTES]`.
///
/// The dial never yields zero: the very top of the dial sets one minute.
pub fn angle_to_minutes(angle: f64) -> u32 {
    // `as` saturates and maps NaN to 0, which the clamp lifts to 1.
    let minutes = (angle / 360.0 * f64::from(MAX_MINUTES)).round() as i64;
    minutes.clamp(1, i64::from(MAX_MINUTES)) as u32
}

/// Minutes selected by a pointer at `point` on a dial centered at `center`.
pub fn minutes_from_point(point: Point, center: Point) -> u32 {
    angle_to_minutes(angle_from_point(point, center))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(100.0, 100.0);

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    mod angle_from_point_tests {
        use super::*;

        #[test]
        fn test_cardinal_directions() {
            assert_close(angle_from_point(Point::new(100.0, 0.0), CENTER), 0.0);
            assert_close(angle_from_point(Point::new(200.0, 100.0), CENTER), 90.0);
            assert_close(angle_from_point(Point::new(100.0, 200.0), CENTER), 180.0);
            assert_close(angle_from_point(Point::new(0.0, 100.0), CENTER), 270.0);
        }

        #[test]
        fn test_upper_left_quadrant_wraps_positive() {
            // 45° before 12 o'clock
            let angle = angle_from_point(Point::new(50.0, 50.0), CENTER);
            assert_close(angle, 315.0);
        }

        #[test]
        fn test_range_over_full_circle() {
            for step in 0..720 {
                let theta = f64::from(step) * 0.5_f64.to_radians();
                let point = Point::new(CENTER.x + theta.cos() * 80.0, CENTER.y + theta.sin() * 80.0);
                let angle = angle_from_point(point, CENTER);
                assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
            }
        }

        #[test]
        fn test_point_at_center_is_defined() {
            let angle = angle_from_point(CENTER, CENTER);
            assert!((0.0..360.0).contains(&angle));
        }
    }

    mod angle_to_minutes_tests {
        use super::*;

        #[test]
        fn test_top_clamps_to_one_minute() {
            assert_eq!(angle_to_minutes(0.0), 1);
        }

        #[test]
        fn test_just_below_full_turn_is_sixty() {
            assert_eq!(angle_to_minutes(359.999), 60);
        }

        #[test]
        fn test_half_turn_is_thirty() {
            assert_eq!(angle_to_minutes(180.0), 30);
        }

        #[test]
        fn test_rounds_to_nearest_minute() {
            // 6° per minute
            assert_eq!(angle_to_minutes(8.9), 1);
            assert_eq!(angle_to_minutes(9.0), 2);
            assert_eq!(angle_to_minutes(92.0), 15);
        }

        #[test]
        fn test_range_and_monotonic() {
            let mut previous = 0;
            for step in 0..3600 {
                let minutes = angle_to_minutes(f64::from(step) * 0.1);
                assert!((1..=MAX_MINUTES).contains(&minutes));
                assert!(minutes >= previous);
                previous = minutes;
            }
        }

        #[test]
        fn test_total_over_odd_inputs() {
            assert_eq!(angle_to_minutes(-90.0), 1);
            assert_eq!(angle_to_minutes(720.0), 60);
            assert_eq!(angle_to_minutes(f64::NAN), 1);
            assert_eq!(angle_to_minutes(f64::INFINITY), 60);
            assert_eq!(angle_to_minutes(f64::NEG_INFINITY), 1);
        }
    }

    #[test]
    fn test_minutes_from_point() {
        assert_eq!(minutes_from_point(Point::new(100.0, 200.0), CENTER), 30);
        assert_eq!(minutes_from_point(Point::new(200.0, 100.0), CENTER), 15);
    }
}
