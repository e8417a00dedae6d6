//! Overlap tests for axis-aligned squares and circles
//!
//! Squares are centered on their position with `size` as the side length;
//! circles use `size` as the diameter. Touching counts as overlapping.

use glam::Vec2;

/// Clamp `v` into `[lo, hi]`. Caller guarantees `lo <= hi`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Axis-aligned square vs square, closed intervals
pub fn square_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    let reach = a_size / 2.0 + b_size / 2.0;
    let d = (a_pos - b_pos).abs();
    d.x <= reach && d.y <= reach
}

/// Circle vs axis-aligned square
///
/// Projects the circle center onto the square and compares the distance to
/// that closest point against the radius.
pub fn circle_square_overlap(circle_pos: Vec2, diameter: f32, square_pos: Vec2, side: f32) -> bool {
    let r = diameter / 2.0;
    let half = side / 2.0;

    let closest = Vec2::new(
        clamp(circle_pos.x, square_pos.x - half, square_pos.x + half),
        clamp(circle_pos.y, square_pos.y - half, square_pos.y + half),
    );

    circle_pos.distance_squared(closest) <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_cases() {
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(v in -1.0e6f32..1.0e6, lo in -1.0e3f32..1.0e3, span in 0.0f32..1.0e3) {
            let hi = lo + span;
            let c = clamp(v, lo, hi);
            prop_assert!(c >= lo && c <= hi);
            if v >= lo && v <= hi {
                prop_assert_eq!(c, v);
            }
        }
    }

    #[test]
    fn test_square_overlap() {
        let a = Vec2::ZERO;

        assert!(square_overlap(a, 10.0, Vec2::new(4.0, 0.0), 10.0));
        // Edge-touching
        assert!(square_overlap(a, 10.0, Vec2::new(10.0, 0.0), 10.0));
        assert!(square_overlap(a, 10.0, Vec2::new(10.0, -10.0), 10.0));
        assert!(!square_overlap(a, 10.0, Vec2::new(10.001, 0.0), 10.0));
        assert!(!square_overlap(a, 10.0, Vec2::new(0.0, -10.01), 10.0));
    }

    #[test]
    fn test_circle_square_overlap() {
        // Square bounds [-1, 1]
        let sq = Vec2::ZERO;

        // Center inside
        assert!(circle_square_overlap(Vec2::ZERO, 2.0, sq, 2.0));
        // Far away
        assert!(!circle_square_overlap(Vec2::new(10.0, 10.0), 2.0, sq, 2.0));
        // Tangent to right edge at (1, 0)
        assert!(circle_square_overlap(Vec2::new(2.0, 0.0), 2.0, sq, 2.0));
        // Near a corner but outside the radius
        assert!(!circle_square_overlap(Vec2::new(1.8, 1.8), 2.0, sq, 2.0));
    }
}
