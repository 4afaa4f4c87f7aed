//! 2D vector helpers
//!
//! Thin free functions over `glam::Vec2`. Every function returns a new value;
//! inputs are taken by copy and never mutated.

use glam::Vec2;

/// Construct a point
#[inline]
pub fn point(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Magnitude of `v`
#[inline]
pub fn length(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Heading of `v` in radians, `atan2(y, x)`
#[inline]
pub fn angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing from `from` toward `to`.
///
/// Returns `Vec2::ZERO` when the two points coincide.
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let len = length(delta);
    if len > 0.0 { delta / len } else { Vec2::ZERO }
}

/// Distance between `a` and `b`
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    length(a - b)
}

/// Convert polar (theta, r) to cartesian (x, y)
#[inline]
pub fn from_polar(theta: f32, r: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_direction_of_coincident_points_is_zero() {
        let p = point(12.0, -3.5);
        assert_eq!(direction(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_direction_axis_aligned() {
        let d = direction(point(1.0, 1.0), point(1.0, 11.0));
        assert!((d.x).abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_and_length() {
        assert!((length(point(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert!((distance(point(1.0, 1.0), point(4.0, 5.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_and_polar() {
        assert!((angle(point(0.0, 2.0)) - PI / 2.0).abs() < 1e-6);

        let v = from_polar(PI, 2.0);
        assert!((v.x + 2.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
        assert!((angle(from_polar(0.75, 3.0)) - 0.75).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn direction_has_unit_length(
            ax in -1.0e4f32..1.0e4, ay in -1.0e4f32..1.0e4,
            bx in -1.0e4f32..1.0e4, by in -1.0e4f32..1.0e4,
        ) {
            let a = point(ax, ay);
            let b = point(bx, by);
            prop_assume!(distance(a, b) > 1e-3);
            prop_assert!((length(direction(a, b)) - 1.0).abs() < 1e-4);
        }
    }
}
