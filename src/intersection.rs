#![warn(missing_docs)]
//! Intersection of two rays, each given by a start point, an angle to the normal and a [`Side`].
//!
//! The rays are treated as infinite lines. Parallel (or collinear) rays do not yield a position.
use approx::relative_eq;
use uom::si::f64::Angle;

use crate::geometry::{ray_point, Point, Side};

/// Nominal length used to construct a second point on each ray.
pub const RAY_LENGTH: f64 = 1000.0;

/// Intersect the two rays starting at `p1` and `p2`.
///
/// Each ray is constructed via [`ray_point`] and converted into a line with slope `(end.y - start.y) / (end.x - start.x)`.
/// Returns `None` if the rays are parallel (including two rays along the normal) or the result is not finite.
#[must_use]
pub fn intersect(
    p1: &Point,
    angle1: Angle,
    side1: Side,
    p2: &Point,
    angle2: Angle,
    side2: Side,
) -> Option<Point> {
    let e1 = ray_point(p1, angle1, RAY_LENGTH, side1);
    let e2 = ray_point(p2, angle2, RAY_LENGTH, side2);
    line_intersection((p1, &e1), (p2, &e2))
}

fn slope(start: &Point, end: &Point) -> Option<f64> {
    let dx = end.x - start.x;
    if dx.abs() <= f64::EPSILON * RAY_LENGTH {
        // vertical line
        None
    } else {
        Some((end.y - start.y) / dx)
    }
}

fn line_intersection(line1: (&Point, &Point), line2: (&Point, &Point)) -> Option<Point> {
    let (s1, s2) = (line1.0, line2.0);
    let intersection = match (slope(line1.0, line1.1), slope(line2.0, line2.1)) {
        (None, None) => None,
        (None, Some(m2)) => Some(Point::new(s1.x, m2.mul_add(s1.x - s2.x, s2.y))),
        (Some(m1), None) => Some(Point::new(s2.x, m1.mul_add(s2.x - s1.x, s1.y))),
        (Some(m1), Some(m2)) => {
            if relative_eq!(m1, m2, epsilon = 1e-12, max_relative = 1e-12) {
                None
            } else {
                let x = (m1.mul_add(s1.x, -s1.y) - m2.mul_add(s2.x, -s2.y)) / (m1 - m2);
                Some(Point::new(x, m1.mul_add(x - s1.x, s1.y)))
            }
        }
    };
    intersection.filter(|p| p.x.is_finite() && p.y.is_finite())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::degree;
    use approx::assert_abs_diff_eq;

    #[test]
    fn symmetric_rays() {
        let p = intersect(
            &Point::new(250.0, 450.0),
            degree!(30.0),
            Side::Right,
            &Point::new(550.0, 450.0),
            degree!(30.0),
            Side::Left,
        )
        .unwrap();
        assert_abs_diff_eq!(p.x, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 450.0 - 150.0 * f64::sqrt(3.0), epsilon = 1e-9);
    }
    #[test]
    fn asymmetric_rays() {
        // 45° from the left point and along the normal from the right point
        let p = intersect(
            &Point::new(0.0, 100.0),
            degree!(45.0),
            Side::Right,
            &Point::new(40.0, 100.0),
            degree!(0.0),
            Side::Left,
        )
        .unwrap();
        assert_abs_diff_eq!(p.x, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 60.0, epsilon = 1e-9);
        let q = intersect(
            &Point::new(40.0, 100.0),
            degree!(0.0),
            Side::Left,
            &Point::new(0.0, 100.0),
            degree!(45.0),
            Side::Right,
        )
        .unwrap();
        assert_abs_diff_eq!(q.x, p.x, epsilon = 1e-9);
        assert_abs_diff_eq!(q.y, p.y, epsilon = 1e-9);
    }
    #[test]
    fn intersection_below_start_points() {
        // diverging rays upwards meet below the interface
        let p = intersect(
            &Point::new(0.0, 0.0),
            degree!(45.0),
            Side::Left,
            &Point::new(100.0, 0.0),
            degree!(45.0),
            Side::Right,
        )
        .unwrap();
        assert_abs_diff_eq!(p.x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 50.0, epsilon = 1e-9);
    }
    #[test]
    fn parallel_rays() {
        assert!(intersect(
            &Point::new(250.0, 450.0),
            degree!(30.0),
            Side::Left,
            &Point::new(550.0, 450.0),
            degree!(30.0),
            Side::Left,
        )
        .is_none());
        assert!(intersect(
            &Point::new(250.0, 450.0),
            degree!(0.0),
            Side::Left,
            &Point::new(550.0, 450.0),
            degree!(0.0),
            Side::Right,
        )
        .is_none());
    }
    #[test]
    fn collinear_rays() {
        assert!(intersect(
            &Point::new(250.0, 450.0),
            degree!(20.0),
            Side::Right,
            &Point::new(250.0, 450.0),
            degree!(20.0),
            Side::Right,
        )
        .is_none());
    }
}
